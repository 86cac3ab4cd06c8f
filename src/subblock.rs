//! Pack/unpack the length-prefixed GIF sub-block chain.
//!
//! Grounded on the teacher's `vpx::lzw::from_blocks`/`to_blocks`, which do
//! the same thing for VPX's own (slightly different) LZW blob encoding; this
//! version reads from an absolute byte-stream cursor and carries the
//! spec's `Truncated` error instead of indexing/`unwrap`-panicking past the
//! end of the slice.

use crate::error::GifError;

/// Reads the sub-block chain starting at `data[pos]`, concatenating payload
/// bytes until a zero-length sub-block terminates it. Returns the
/// concatenated bytes and the position just past the terminator.
pub fn read_subblocks(data: &[u8], mut pos: usize) -> Result<(Vec<u8>, usize), GifError> {
    let mut out = Vec::new();
    loop {
        let size = *data.get(pos).ok_or(GifError::Truncated)? as usize;
        pos += 1;
        if size == 0 {
            return Ok((out, pos));
        }
        let end = pos + size;
        let chunk = data.get(pos..end).ok_or(GifError::Truncated)?;
        out.extend_from_slice(chunk);
        pos = end;
    }
}

/// Skips the sub-block chain starting at `data[pos]` without retaining the
/// payload. Returns the position just past the terminator.
pub fn skip_subblocks(data: &[u8], mut pos: usize) -> Result<usize, GifError> {
    loop {
        let size = *data.get(pos).ok_or(GifError::Truncated)? as usize;
        pos += 1;
        if size == 0 {
            return Ok(pos);
        }
        if pos + size > data.len() {
            return Err(GifError::Truncated);
        }
        pos += size;
    }
}

/// Encodes `payload` as a chain of sub-blocks of at most 255 bytes each,
/// terminated by an empty sub-block.
pub fn write_subblocks(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + payload.len() / 255 + 2);
    let mut rest = payload;
    while !rest.is_empty() {
        let n = rest.len().min(255);
        out.push(n as u8);
        out.extend_from_slice(&rest[..n]);
        rest = &rest[n..];
    }
    out.push(0);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn round_trips_small_payload() {
        let payload: Vec<u8> = (0..10).collect();
        let encoded = write_subblocks(&payload);
        let (decoded, end) = read_subblocks(&encoded, 0).unwrap();
        assert_eq!(decoded, payload);
        assert_eq!(end, encoded.len());
    }

    #[test]
    fn round_trips_empty_payload() {
        let encoded = write_subblocks(&[]);
        assert_eq!(encoded, vec![0]);
        let (decoded, end) = read_subblocks(&encoded, 0).unwrap();
        assert!(decoded.is_empty());
        assert_eq!(end, 1);
    }

    #[test]
    fn splits_into_255_byte_chunks() {
        let payload: Vec<u8> = (0..600).map(|i| (i % 256) as u8).collect();
        let encoded = write_subblocks(&payload);
        // 255 + 255 + 90 + terminator, each with a length byte
        assert_eq!(encoded[0], 255);
        assert_eq!(encoded[256], 255);
        assert_eq!(encoded[512], 90);
        assert_eq!(*encoded.last().unwrap(), 0);

        let (decoded, _) = read_subblocks(&encoded, 0).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn truncated_size_byte_errors() {
        assert!(matches!(read_subblocks(&[5, 1, 2], 0), Err(GifError::Truncated)));
    }

    #[test]
    fn skip_matches_read_end_position() {
        let payload: Vec<u8> = (0..300).map(|i| (i % 256) as u8).collect();
        let encoded = write_subblocks(&payload);
        let (_, read_end) = read_subblocks(&encoded, 0).unwrap();
        let skip_end = skip_subblocks(&encoded, 0).unwrap();
        assert_eq!(read_end, skip_end);
    }
}
