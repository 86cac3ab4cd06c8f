//! RGB ↔ indexed-color conversion (spec.md §4.H).
//!
//! Grounded on the teacher's `vpx::color::Color` in spirit (a small,
//! const-friendly color type with explicit byte-order conversions) but
//! built around 3-byte RGB triples rather than VPX's 4-byte ARGB, since a
//! GIF color table has no alpha channel.

use std::collections::BTreeSet;

use crate::error::EncodeError;

/// An RGB triple.
pub type Rgb = [u8; 3];

/// Scans `rgb` (row-major RGB triples) and builds a deterministic palette:
/// the distinct colors present, in sorted byte-string order. Fails if more
/// than 256 distinct colors are present.
pub fn build_palette(rgb: &[u8]) -> Result<Vec<Rgb>, EncodeError> {
    let mut set: BTreeSet<Rgb> = BTreeSet::new();
    for triple in rgb.chunks_exact(3) {
        set.insert([triple[0], triple[1], triple[2]]);
        if set.len() > 256 {
            return Err(EncodeError::TooManyColors(set.len()));
        }
    }
    Ok(set.into_iter().collect())
}

/// Maps each RGB pixel in `rgb` to its index in `palette` (which must
/// contain every color present in `rgb`, e.g. as returned by
/// [`build_palette`]).
pub fn rgb_to_indices(rgb: &[u8], palette: &[Rgb]) -> Vec<u8> {
    let lookup: std::collections::HashMap<Rgb, u8> = palette
        .iter()
        .enumerate()
        .map(|(i, &c)| (c, i as u8))
        .collect();
    rgb.chunks_exact(3)
        .map(|t| lookup[&[t[0], t[1], t[2]]])
        .collect()
}

/// Expands an indexed raster into RGB bytes using `palette`.
pub fn indices_to_rgb(indices: &[u8], palette: &[Rgb]) -> Vec<u8> {
    let mut out = Vec::with_capacity(indices.len() * 3);
    for &i in indices {
        let c = palette[i as usize];
        out.extend_from_slice(&c);
    }
    out
}

/// Serializes a palette as the packed byte array a GIF color table expects:
/// `count.next_power_of_two()` (clamped to at least 2) entries, padded with
/// black. Returns the bytes and the table's bit depth `k` (table length is
/// `2^k`).
pub fn pack_color_table(palette: &[Rgb]) -> (Vec<u8>, u8) {
    let k = palette_bits(palette.len());
    let table_len = 1usize << k;
    let mut bytes = Vec::with_capacity(table_len * 3);
    for i in 0..table_len {
        if let Some(c) = palette.get(i) {
            bytes.extend_from_slice(c);
        } else {
            bytes.extend_from_slice(&[0, 0, 0]);
        }
    }
    (bytes, k)
}

/// The bit depth `k` such that `2^k >= count.max(1)`, clamped to at least 1
/// (spec.md §4.F: `gct_bits = max(1, ceil(log2(palette_color_count)))`).
pub fn palette_bits(count: usize) -> u8 {
    let mut k = 0u8;
    while (1usize << k) < count.max(1) {
        k += 1;
    }
    k.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn palette_round_trips_through_indices() {
        #[rustfmt::skip]
        let rgb = vec![
            0x00, 0x00, 0x00, 0x55, 0x55, 0x55,
            0xAA, 0xAA, 0xAA, 0xFF, 0xFF, 0xFF,
        ];
        let palette = build_palette(&rgb).unwrap();
        assert_eq!(palette.len(), 4);
        let indices = rgb_to_indices(&rgb, &palette);
        let restored = indices_to_rgb(&indices, &palette);
        assert_eq!(restored, rgb);
    }

    #[test]
    fn more_than_256_colors_is_rejected() {
        let mut rgb = Vec::new();
        for i in 0..257u32 {
            rgb.extend_from_slice(&[(i >> 8) as u8, (i & 0xFF) as u8, 0]);
        }
        assert!(matches!(
            build_palette(&rgb),
            Err(EncodeError::TooManyColors(257))
        ));
    }

    #[test]
    fn palette_bits_covers_boundary_sizes() {
        assert_eq!(palette_bits(1), 1);
        assert_eq!(palette_bits(2), 1);
        assert_eq!(palette_bits(3), 2);
        assert_eq!(palette_bits(4), 2);
        assert_eq!(palette_bits(16), 4);
        assert_eq!(palette_bits(256), 8);
    }

    #[test]
    fn pack_color_table_pads_with_black() {
        let palette = vec![[1, 2, 3], [4, 5, 6], [7, 8, 9]];
        let (bytes, k) = pack_color_table(&palette);
        assert_eq!(k, 2);
        assert_eq!(bytes.len(), 12);
        assert_eq!(&bytes[9..12], &[0, 0, 0]);
    }
}
