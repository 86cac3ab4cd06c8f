//! A GIF87a/89a single-image encoder and decoder.
//!
//! See `SPEC_FULL.md` for the full component breakdown; briefly: a block
//! parser/writer for the GIF container, a from-scratch LZW decoder/encoder
//! matching GIF's canonical quirks, an interlace/deinterlace transform, and
//! RGB-to-palette conversion, wired together by [`decode`] and [`encode`].

pub mod bitio;
pub mod error;
pub mod interlace;
pub mod lzw_decode;
pub mod lzw_encode;
pub mod palette;
pub mod parser;
pub mod subblock;
pub mod writer;

use log::info;

use error::{DriverError, EncodeError, GifError};
use lzw_encode::EncodeOptions as LzwEncodeOptions;
use palette::Rgb;

/// Options recognized by [`decode`] (spec.md §6).
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    /// Log code/bit/pixel counts after a successful decode.
    pub verbose: bool,
}

/// Options recognized by [`encode`] (spec.md §6).
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeOptions {
    /// Don't emit a CLEAR when the encoder dictionary saturates; keep
    /// compressing against the frozen dictionary instead.
    pub no_dict_reset: bool,
    /// Log code/bit/pixel counts after encoding.
    pub verbose: bool,
}

/// Decodes a single-image GIF byte stream into `(width, height, rgb_bytes)`.
pub fn decode(gif_bytes: &[u8], options: DecodeOptions) -> Result<(u16, u16, Vec<u8>), DriverError> {
    let header = parser::parse(gif_bytes)?;

    let palette_len = 3usize << header.palette_bits;
    let palette_bytes = gif_bytes
        .get(header.palette_offset..header.palette_offset + palette_len)
        .ok_or(GifError::Truncated)?;
    let palette: Vec<Rgb> = palette_bytes
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();

    let (lzw_data, _) = subblock::read_subblocks(gif_bytes, header.lzw_data_offset)?;
    let (mut indices, stats) = lzw_decode::decode_with_stats(&lzw_data, header.lzw_min_code_size)?;

    if header.palette_bits < 8 {
        let limit = 1u16 << header.palette_bits;
        if indices.iter().any(|&i| i as u16 >= limit) {
            return Err(DriverError::Decode(GifError::BadIndex));
        }
    }

    if header.interlaced {
        indices = interlace::deinterlace(&indices, header.width as usize, header.height as usize);
    }

    if options.verbose {
        info!(
            "decode: {} codes, {} bits, {} pixels",
            stats.code_count, stats.total_bits, stats.pixel_count
        );
    }

    let rgb = palette::indices_to_rgb(&indices, &palette);
    Ok((header.width, header.height, rgb))
}

/// Encodes a headerless RGB raster into a single-image GIF87a byte stream.
///
/// `rgb_bytes` must have a length that is a positive multiple of
/// `width * 3`, with the inferred height in `[1, 65535]`; it must contain at
/// most 256 distinct colors.
pub fn encode(width: u16, rgb_bytes: &[u8], options: EncodeOptions) -> Result<Vec<u8>, DriverError> {
    let row_bytes = width as usize * 3;
    if width == 0 || row_bytes == 0 || rgb_bytes.is_empty() || !rgb_bytes.len().is_multiple_of(row_bytes) {
        return Err(DriverError::Encode(EncodeError::BadRgbSize));
    }
    let height = rgb_bytes.len() / row_bytes;
    if height > 65535 {
        return Err(DriverError::Encode(EncodeError::BadRgbSize));
    }
    let height = height as u16;

    let palette = palette::build_palette(rgb_bytes)?;
    let indices = palette::rgb_to_indices(rgb_bytes, &palette);
    let (_, gct_bits) = palette::pack_color_table(&palette);
    let lzw_min_code_size = gct_bits.max(2);

    let (lzw_bytes, stats) = lzw_encode::encode(
        &indices,
        lzw_min_code_size,
        LzwEncodeOptions { no_dict_reset: options.no_dict_reset },
    );

    if options.verbose {
        info!(
            "encode: {} codes, {} bits, {} pixels",
            stats.code_count, stats.total_bits, stats.pixel_count
        );
    }

    Ok(writer::write_gif(width, height, &palette, &indices, &lzw_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn solid_color_round_trips() {
        let rgb = vec![0u8; 12]; // 2x2, all black
        let gif_bytes = encode(2, &rgb, EncodeOptions::default()).unwrap();
        let (width, height, decoded) = decode(&gif_bytes, DecodeOptions::default()).unwrap();
        assert_eq!((width, height), (2, 2));
        assert_eq!(decoded, rgb);
    }

    #[test]
    fn horizontal_gradient_round_trips() {
        #[rustfmt::skip]
        let rgb = vec![
            0x00, 0x00, 0x00, 0x55, 0x55, 0x55,
            0xAA, 0xAA, 0xAA, 0xFF, 0xFF, 0xFF,
        ];
        let gif_bytes = encode(4, &rgb, EncodeOptions::default()).unwrap();
        let (width, height, decoded) = decode(&gif_bytes, DecodeOptions::default()).unwrap();
        assert_eq!((width, height), (4, 1));
        assert_eq!(decoded, rgb);
    }

    #[test]
    fn too_many_colors_is_rejected_before_any_output() {
        let mut rgb = Vec::new();
        for i in 0..257u32 {
            rgb.extend_from_slice(&[(i >> 8) as u8, (i & 0xFF) as u8, 0]);
        }
        assert!(matches!(
            encode(257, &rgb, EncodeOptions::default()),
            Err(DriverError::Encode(EncodeError::TooManyColors(257)))
        ));
    }

    #[test]
    fn bad_rgb_size_is_rejected() {
        let rgb = vec![0u8; 7];
        assert!(matches!(
            encode(2, &rgb, EncodeOptions::default()),
            Err(DriverError::Encode(EncodeError::BadRgbSize))
        ));
    }

    #[test]
    fn malformed_inputs_fail_with_stated_error_kinds() {
        assert!(matches!(
            decode(&[0x47, 0x49, 0x46, 0x38, 0x39], DecodeOptions::default()),
            Err(DriverError::Decode(GifError::Truncated))
        ));
        assert!(matches!(
            decode(b"PNG\x00\x00\x00\x00", DecodeOptions::default()),
            Err(DriverError::Decode(GifError::NotGif))
        ));
    }
}
