//! GIF container writer: emits a minimal single-image GIF87a file
//! (spec.md §4.F).
//!
//! Grounded on `original_source/gif.py`'s `generate_gif` (field-by-field
//! emission order and sub-block chunking) using `byteorder`'s
//! `WriteBytesExt` for the little-endian fields, in the style of
//! `vpx::version.rs`'s `write_u32::<LittleEndian>`.

use byteorder::{LittleEndian, WriteBytesExt};

use crate::palette::{pack_color_table, Rgb};
use crate::subblock;

/// Assembles a GIF87a file with a single image and a Global Color Table.
///
/// `width`/`height` describe `indices` (row-major, `width * height` bytes);
/// `palette` is the distinct-color palette `indices` references into.
pub fn write_gif(width: u16, height: u16, palette: &[Rgb], indices: &[u8], lzw_bytes: &[u8]) -> Vec<u8> {
    let (gct_bytes, gct_bits) = pack_color_table(palette);
    let lzw_min_code_size = gct_bits.max(2);

    let mut out = Vec::with_capacity(13 + gct_bytes.len() + indices.len());
    out.extend_from_slice(b"GIF87a");
    out.write_u16::<LittleEndian>(width).unwrap();
    out.write_u16::<LittleEndian>(height).unwrap();
    out.push(0x80 | (gct_bits - 1));
    out.push(0); // background color index
    out.push(0); // pixel aspect ratio
    out.extend_from_slice(&gct_bytes);

    out.push(b',');
    out.write_u16::<LittleEndian>(0).unwrap(); // left
    out.write_u16::<LittleEndian>(0).unwrap(); // top
    out.write_u16::<LittleEndian>(width).unwrap();
    out.write_u16::<LittleEndian>(height).unwrap();
    out.push(0); // packed: no LCT, no interlace

    out.push(lzw_min_code_size);
    out.extend_from_slice(&subblock::write_subblocks(lzw_bytes));
    out.push(b';');

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lzw_decode, lzw_encode, palette as pal, parser, subblock as sb};
    use pretty_assertions::assert_eq;

    #[test]
    fn writes_a_parseable_gif() {
        let rgb = vec![0u8, 0, 0, 255, 255, 255, 0, 0, 0, 255, 255, 255];
        let built_palette = pal::build_palette(&rgb).unwrap();
        let indices = pal::rgb_to_indices(&rgb, &built_palette);
        let (_, gct_bits) = pack_color_table(&built_palette);
        let lzw_min_code_size = gct_bits.max(2);
        let (lzw_bytes, _) = lzw_encode::encode(&indices, lzw_min_code_size, Default::default());

        let gif_bytes = write_gif(4, 1, &built_palette, &indices, &lzw_bytes);

        let header = parser::parse(&gif_bytes).unwrap();
        assert_eq!(header.width, 4);
        assert_eq!(header.height, 1);
        assert_eq!(header.lzw_min_code_size, lzw_min_code_size);

        let palette_len = 3usize << header.palette_bits;
        let palette_bytes =
            &gif_bytes[header.palette_offset..header.palette_offset + palette_len];
        let (lzw_data, _) = sb::read_subblocks(&gif_bytes, header.lzw_data_offset).unwrap();
        let decoded = lzw_decode::decode(&lzw_data, header.lzw_min_code_size).unwrap();
        assert_eq!(decoded, indices);

        let restored_palette: Vec<Rgb> = palette_bytes
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        let restored_rgb = pal::indices_to_rgb(&decoded, &restored_palette);
        assert_eq!(restored_rgb, rgb);
    }
}
