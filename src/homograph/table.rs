//! Confusable character table.
//!
//! Maps each visually-confusable wide codepoint to the ASCII characters it
//! can be mistaken for. Built once at startup by inverting an embedded
//! dataset of canonical -> lookalike mappings; read-only afterwards.

use rustc_hash::FxHashMap;

/// Embedded confusable dataset, loaded at compile time.
///
/// One canonical ASCII character per line, a tab, then the characters that
/// can impersonate it.
const CONFUSABLES_DATASET: &str = include_str!("confusables.txt");

/// Lookup table from a wide codepoint to the ASCII characters it imitates.
pub struct ConfusableTable {
    entries: FxHashMap<char, Vec<char>>,
}

impl ConfusableTable {
    /// Build the table from the embedded dataset.
    pub fn embedded() -> Self {
        Self::from_dataset(CONFUSABLES_DATASET)
    }

    /// Invert a canonical -> lookalikes dataset into lookalike -> canonicals.
    ///
    /// Only lookalikes outside the 7-bit ASCII range are retained; a plain
    /// ASCII character cannot impersonate another in a lookup name. Lines
    /// whose canonical falls outside the ASCII range are dropped, so every
    /// key of the finished table is wide and every value is narrow.
    pub fn from_dataset(dataset: &str) -> Self {
        let mut entries: FxHashMap<char, Vec<char>> = FxHashMap::default();

        for line in dataset.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((canonical, lookalikes)) = line.split_once('\t') else {
                continue;
            };
            let Some(canonical) = canonical.chars().next() else {
                continue;
            };
            if !is_narrow(canonical) {
                continue;
            }

            for lookalike in lookalikes.chars() {
                if is_narrow(lookalike) {
                    continue;
                }
                let canonicals = entries.entry(lookalike).or_default();
                if !canonicals.contains(&canonical) {
                    canonicals.push(canonical);
                }
            }
        }

        Self { entries }
    }

    /// ASCII characters the given codepoint can be mistaken for, if any.
    pub fn confusables_of(&self, ch: char) -> Option<&[char]> {
        self.entries.get(&ch).map(Vec::as_slice)
    }

    /// Number of wide codepoints in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whether a codepoint sits in the 7-bit ASCII range.
pub(crate) fn is_narrow(ch: char) -> bool {
    (ch as u32) & 0xFF80 == 0
}
