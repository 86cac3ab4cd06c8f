//! GIF LZW encoder: indexed pixel stream → LZW code stream.
//!
//! Grounded on `vpx::lzw_writer::LzwWriter::compress_bits`/`output` for the
//! code-length-growth and clear-on-saturation bookkeeping, but replaces its
//! open-addressed hash table (`h_tab`/`code_tab`, sized for a fixed 12-bit
//! alphabet) with the trie design note in spec.md §9 — a `Vec<HashMap<u8,
//! u16>>` indexed by code, which reads directly as "from this code, which
//! byte leads to which new code" instead of re-deriving a hash every lookup.

use crate::bitio::BitWriter;

const MAX_CODE: u16 = 4094;

struct Trie {
    /// transitions[code] = { next_byte -> new_code }
    transitions: Vec<std::collections::HashMap<u8, u16>>,
    root_count: u16,
}

impl Trie {
    fn new(p: u8) -> Self {
        let root_count = 1u16 << p;
        // root_count roots + 2 reserved (CLEAR, END) slots, matching the
        // decoder's dictionary layout so code_len growth timing lines up.
        let transitions = (0..root_count + 2)
            .map(|_| std::collections::HashMap::new())
            .collect();
        Trie { transitions, root_count }
    }

    fn reset(&mut self) {
        self.transitions.truncate(self.root_count as usize + 2);
        for m in &mut self.transitions {
            m.clear();
        }
    }

    fn len(&self) -> u16 {
        self.transitions.len() as u16
    }

    fn lookup(&self, code: u16, byte: u8) -> Option<u16> {
        self.transitions[code as usize].get(&byte).copied()
    }

    fn insert(&mut self, code: u16, byte: u8, new_code: u16) {
        self.transitions[code as usize].insert(byte, new_code);
        self.transitions.push(std::collections::HashMap::new());
    }
}

/// Configuration shared across the codec (spec.md §6).
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeOptions {
    /// Don't emit a CLEAR when the dictionary saturates; keep compressing
    /// against the frozen dictionary instead.
    pub no_dict_reset: bool,
}

/// Statistics gathered during encoding, surfaced under `verbose` (spec.md §6).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeStats {
    pub code_count: usize,
    pub total_bits: usize,
    pub pixel_count: usize,
}

/// Encodes `indices` (indexed pixel bytes) into an LZW code stream packed
/// LSB-first, using initial code size `min_code_size` (the `lzw_min_code_size`
/// value, i.e. the initial code width minus one).
pub fn encode(indices: &[u8], min_code_size: u8, options: EncodeOptions) -> (Vec<u8>, EncodeStats) {
    let p = min_code_size;
    let clear_code = 1u16 << p;
    let end_code = clear_code + 1;

    let mut trie = Trie::new(p);
    let mut code_len = p + 1;
    let mut writer = BitWriter::new();
    let mut stats = EncodeStats { pixel_count: indices.len(), ..Default::default() };

    let emit = |writer: &mut BitWriter, stats: &mut EncodeStats, code: u16, width: u8| {
        writer.write(code, width);
        stats.code_count += 1;
        stats.total_bits += width as usize;
    };

    emit(&mut writer, &mut stats, clear_code, code_len);

    let mut pos = 0usize;
    while pos < indices.len() {
        // Greedy longest match starting at `pos`.
        let mut code = indices[pos] as u16;
        let mut entry_len = 1usize;
        while pos + entry_len < indices.len() {
            match trie.lookup(code, indices[pos + entry_len]) {
                Some(next) => {
                    code = next;
                    entry_len += 1;
                }
                None => break,
            }
        }

        emit(&mut writer, &mut stats, code, code_len);
        pos += entry_len;

        if pos < indices.len() {
            if trie.len() <= MAX_CODE {
                let new_code = trie.len();
                trie.insert(code, indices[pos], new_code);
                // The encoder's new entry is only *observed* by the decoder
                // while decoding the *next* code (it reconstructs prefix+first-byte
                // one code late), so its growth threshold runs one entry ahead of
                // the decoder's plain `== 2^code_len` check.
                if trie.len() == (1u16 << code_len) + 1 && code_len < 12 {
                    code_len += 1;
                }
            } else if !options.no_dict_reset {
                trie.reset();
                emit(&mut writer, &mut stats, clear_code, code_len);
                code_len = p + 1;
            }
            // else: frozen dictionary, keep compressing against it.
        }
    }

    emit(&mut writer, &mut stats, end_code, code_len);
    (writer.finish(), stats)
}
