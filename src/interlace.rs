//! GIF's four-pass interlace row permutation (spec.md §4.G).
//!
//! No teacher or example file implements GIF interlacing; this is built
//! directly from the spec's schedule, kept in the module-per-concern shape
//! the rest of this crate (and the teacher) uses.

/// Returns the four pass row-index lists for an image of height `h`, in the
/// storage order the pass data appears in: pass 1 (every 8th row from 0),
/// pass 2 (every 8th from 4), pass 3 (every 4th from 2), pass 4 (every 2nd
/// from 1).
fn pass_rows(h: usize) -> [Vec<usize>; 4] {
    [
        (0..h).step_by(8).collect(),
        (4..h).step_by(8).collect(),
        (2..h).step_by(4).collect(),
        (1..h).step_by(2).collect(),
    ]
}

/// Reorders `rows` (in natural top-to-bottom order) into GIF's interlaced
/// storage order.
pub fn interlace(rows: &[&[u8]]) -> Vec<u8> {
    let h = rows.len();
    let mut out = Vec::new();
    for pass in pass_rows(h) {
        for row_index in pass {
            out.extend_from_slice(rows[row_index]);
        }
    }
    out
}

/// Inverse of [`interlace`]: given raster bytes stored in interlaced pass
/// order (row width `row_bytes`, `h` rows total), returns the bytes in
/// natural top-to-bottom order.
pub fn deinterlace(data: &[u8], row_bytes: usize, h: usize) -> Vec<u8> {
    let mut out = vec![0u8; row_bytes * h];
    let mut src_row = 0;
    for pass in pass_rows(h) {
        for dest_row in pass {
            let src_start = src_row * row_bytes;
            let dest_start = dest_row * row_bytes;
            out[dest_start..dest_start + row_bytes]
                .copy_from_slice(&data[src_start..src_start + row_bytes]);
            src_row += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows_for(h: usize) -> Vec<Vec<u8>> {
        (0..h).map(|r| vec![r as u8]).collect()
    }

    #[test]
    fn eight_row_pass_order_matches_spec_example() {
        // spec.md §8 scenario 3: pass order [r0, r4, r2, r6, r1, r3, r5, r7]
        let rows = rows_for(8);
        let refs: Vec<&[u8]> = rows.iter().map(|r| r.as_slice()).collect();
        let interlaced = interlace(&refs);
        assert_eq!(interlaced, vec![0, 4, 2, 6, 1, 3, 5, 7]);

        let restored = deinterlace(&interlaced, 1, 8);
        assert_eq!(restored, vec![0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn is_self_inverse_for_heights_one_through_nine() {
        for h in 1..=9 {
            let rows = rows_for(h);
            let refs: Vec<&[u8]> = rows.iter().map(|r| r.as_slice()).collect();
            let interlaced = interlace(&refs);
            let restored = deinterlace(&interlaced, 1, h);
            let flat: Vec<u8> = rows.iter().flatten().cloned().collect();
            assert_eq!(restored, flat, "height {h} failed to round-trip");
        }
    }

    #[test]
    fn single_row_is_unchanged() {
        let rows = rows_for(1);
        let refs: Vec<&[u8]> = rows.iter().map(|r| r.as_slice()).collect();
        let interlaced = interlace(&refs);
        assert_eq!(interlaced, vec![0]);
        assert_eq!(deinterlace(&interlaced, 1, 1), vec![0]);
    }
}
