//! GIF container parser: walks the block stream to locate the first image's
//! palette and LZW data (spec.md §4.E).
//!
//! Grounded on `original_source/gif.py`'s `get_gif_info`/`get_first_image_info`
//! /`get_image_info` (offset bookkeeping, extension-skipping dispatch), adapted
//! from a seekable file handle to an in-memory byte slice with an explicit
//! cursor, in the style of `vpx::mod.rs`'s block-walking reads.

use byteorder::{ByteOrder, LittleEndian};
use log::warn;

use crate::error::GifError;
use crate::subblock;

/// Offsets and sizes needed to decode the first image in a GIF byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: u16,
    pub height: u16,
    pub interlaced: bool,
    pub palette_offset: usize,
    pub palette_bits: u8,
    pub lzw_min_code_size: u8,
    pub lzw_data_offset: usize,
}

fn need(data: &[u8], pos: usize, n: usize) -> Result<(), GifError> {
    if pos + n > data.len() {
        Err(GifError::Truncated)
    } else {
        Ok(())
    }
}

/// Parses `data` and returns the header for the first image descriptor found.
pub fn parse(data: &[u8]) -> Result<ImageHeader, GifError> {
    need(data, 0, 6)?;
    if &data[0..3] != b"GIF" {
        return Err(GifError::NotGif);
    }
    if &data[3..6] != b"87a" && &data[3..6] != b"89a" {
        warn!("unknown GIF version {:?}", String::from_utf8_lossy(&data[3..6]));
    }

    need(data, 6, 7)?;
    let packed = data[10];
    let mut pos = 13;

    let mut gct_offset = None;
    let mut gct_bits = 0u8;
    if packed & 0x80 != 0 {
        gct_bits = (packed & 0x07) + 1;
        gct_offset = Some(pos);
        let table_bytes = 3usize * (1usize << gct_bits);
        need(data, pos, table_bytes)?;
        pos += table_bytes;
    }

    loop {
        need(data, pos, 1)?;
        let block_type = data[pos];
        pos += 1;
        match block_type {
            b',' => {
                need(data, pos, 9)?;
                let width = LittleEndian::read_u16(&data[pos + 4..pos + 6]);
                let height = LittleEndian::read_u16(&data[pos + 6..pos + 8]);
                let img_packed = data[pos + 8];
                pos += 9;
                if width == 0 || height == 0 {
                    return Err(GifError::ImageAreaZero);
                }

                let (palette_offset, palette_bits) = if img_packed & 0x80 != 0 {
                    let lct_bits = (img_packed & 0x07) + 1;
                    let lct_offset = pos;
                    let table_bytes = 3usize * (1usize << lct_bits);
                    need(data, pos, table_bytes)?;
                    pos += table_bytes;
                    (lct_offset, lct_bits)
                } else if let Some(offset) = gct_offset {
                    (offset, gct_bits)
                } else {
                    return Err(GifError::NoPalette);
                };

                need(data, pos, 1)?;
                let lzw_min_code_size = data[pos];
                pos += 1;
                if !(2..=11).contains(&lzw_min_code_size) {
                    return Err(GifError::BadLzwMinCodeSize(lzw_min_code_size));
                }

                return Ok(ImageHeader {
                    width,
                    height,
                    interlaced: img_packed & 0x40 != 0,
                    palette_offset,
                    palette_bits,
                    lzw_min_code_size,
                    lzw_data_offset: pos,
                });
            }
            b'!' => {
                need(data, pos, 1)?;
                let label = data[pos];
                pos += 1;
                match label {
                    0x01 | 0xF9 | 0xFF => {
                        need(data, pos, 1)?;
                        let block_size = data[pos] as usize;
                        pos += 1;
                        need(data, pos, block_size)?;
                        pos += block_size;
                        pos = subblock::skip_subblocks(data, pos)?;
                    }
                    0xFE => {
                        pos = subblock::skip_subblocks(data, pos)?;
                    }
                    _ => return Err(GifError::BadExtension(label)),
                }
            }
            b';' => return Err(GifError::NoImage),
            other => return Err(GifError::BadBlockType(other)),
        }
    }
}
