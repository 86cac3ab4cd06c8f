//! GIF LZW decoder: variable-width code stream → indexed pixel stream.
//!
//! Grounded on `vpx::lzw_reader::LzwReader::decompress`, which walks the
//! same prefix linked list and pushes bytes onto a stack to reverse them,
//! but is restructured per the design note in spec.md §9: a flat
//! `(prefix, suffix)` array instead of three parallel fixed-size arrays, and
//! the stricter post-CLEAR code validation spec.md §9 calls for (the
//! teacher silently clamps an out-of-range code to 0; this decoder rejects
//! it with `BadCode`).

use crate::bitio::BitReader;
use crate::error::GifError;

const NIL: u16 = u16::MAX;
const MAX_DICT_LEN: usize = 4096;

struct Dictionary {
    /// entries[i] = (prefix, suffix); prefix == NIL marks a root (suffix is the root's own byte)
    entries: Vec<(u16, u8)>,
    root_count: usize,
}

impl Dictionary {
    fn new(p: u8) -> Self {
        let root_count = 1usize << p;
        let mut entries = Vec::with_capacity(MAX_DICT_LEN);
        for i in 0..root_count {
            entries.push((NIL, i as u8));
        }
        // two reserved slots for CLEAR/END: no entry, just reserve the indices
        entries.push((NIL, 0));
        entries.push((NIL, 0));
        Dictionary { entries, root_count }
    }

    fn reset(&mut self) {
        self.entries.truncate(self.root_count + 2);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn push(&mut self, prefix: u16, suffix: u8) {
        self.entries.push((prefix, suffix));
    }

    /// Walks the prefix chain for `code`, pushing bytes into `out` in
    /// emission order (first byte of the entry first).
    fn emit(&self, code: u16, out: &mut Vec<u8>) {
        let start = out.len();
        let mut c = code;
        loop {
            let (prefix, suffix) = self.entries[c as usize];
            out.push(suffix);
            if prefix == NIL {
                break;
            }
            c = prefix;
        }
        out[start..].reverse();
    }

    /// Returns the first byte of the entry `code` would decode to, without
    /// allocating an output buffer.
    fn first_byte(&self, code: u16) -> u8 {
        let mut c = code;
        loop {
            let (prefix, suffix) = self.entries[c as usize];
            if prefix == NIL {
                return suffix;
            }
            c = prefix;
        }
    }
}

/// Statistics gathered during decoding, surfaced under `verbose` (spec.md §6).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    pub code_count: usize,
    pub total_bits: usize,
    pub pixel_count: usize,
}

/// Decodes an LZW code stream into indexed bytes.
///
/// `data` is the concatenated sub-block payload (see `subblock::read_subblocks`);
/// `min_code_size` is the `lzw_min_code_size` byte from the image descriptor.
pub fn decode(data: &[u8], min_code_size: u8) -> Result<Vec<u8>, GifError> {
    decode_with_stats(data, min_code_size).map(|(out, _)| out)
}

/// As [`decode`], but also returns code/bit/pixel counts for `verbose` output.
pub fn decode_with_stats(
    data: &[u8],
    min_code_size: u8,
) -> Result<(Vec<u8>, DecodeStats), GifError> {
    let p = min_code_size;
    let clear_code = 1u16 << p;
    let end_code = clear_code + 1;

    let mut dict = Dictionary::new(p);
    let mut code_len = p + 1;
    let mut prev_code: Option<u16> = None;
    let mut out = Vec::new();
    let mut reader = BitReader::new(data);
    let mut stats = DecodeStats::default();

    loop {
        let code = reader.read(code_len)?;
        stats.code_count += 1;
        stats.total_bits += code_len as usize;

        if code == clear_code {
            dict.reset();
            code_len = p + 1;
            prev_code = None;
            continue;
        }
        if code == end_code {
            break;
        }

        let dict_len = dict.len() as u16;
        match prev_code {
            None => {
                // first code after start or after CLEAR must be a root
                if code >= dict_len {
                    return Err(GifError::BadCode);
                }
                dict.emit(code, &mut out);
            }
            Some(prev) => {
                let suffix_source = if code < dict_len {
                    code
                } else if code == dict_len {
                    prev
                } else {
                    return Err(GifError::BadCode);
                };
                let b = dict.first_byte(suffix_source);
                if dict.len() < MAX_DICT_LEN {
                    dict.push(prev, b);
                }
                dict.emit(code, &mut out);
            }
        }
        prev_code = Some(code);

        if dict.len() == (1usize << code_len) && code_len < 12 {
            code_len += 1;
        }
    }

    stats.pixel_count = out.len();
    Ok((out, stats))
}
