//! Homograph expansion for lookup names.
//!
//! A homograph attack registers a name that renders like a protected name
//! but differs in codepoints (Cyrillic `а` for Latin `a`, and so on).
//! Expansion runs the substitution in reverse: it generates every string
//! reachable from an incoming name by swapping wide codepoints for their
//! ASCII lookalikes, so the caller can check each one against the reserved
//! name set.

mod table;

pub use table::ConfusableTable;

use rustc_hash::FxHashSet;

/// All variants of `name` with at least one confusable substitution applied.
///
/// Positions are visited left to right. At each position whose character is
/// wide and present in the table, every variant accumulated so far, plus
/// the original name, spawns one new variant per ASCII lookalike with that
/// position replaced. Characters in the ASCII range, or without a table
/// entry, pass through unchanged in every variant. The unmodified name is
/// never itself a member of the result.
///
/// Worst case is exponential in the number of substitutable positions, but
/// DNS labels are capped at 63 octets and per-character branching is small,
/// so the set stays manageable for real lookups.
pub fn expand(name: &str, table: &ConfusableTable) -> FxHashSet<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut variants: FxHashSet<String> = FxHashSet::default();

    for (i, &ch) in chars.iter().enumerate() {
        if table::is_narrow(ch) {
            continue;
        }
        let Some(lookalikes) = table.confusables_of(ch) else {
            continue;
        };

        let mut next = Vec::new();
        for &replacement in lookalikes {
            for variant in &variants {
                next.push(replace_at(variant, i, replacement));
            }
            next.push(replace_at(name, i, replacement));
        }
        variants.extend(next);
    }

    variants
}

/// Copy of `s` with the char at position `i` (a char index, not a byte
/// offset) replaced. Substitutions never change the char count, so the
/// index stays valid across generations.
fn replace_at(s: &str, i: usize, replacement: char) -> String {
    s.chars()
        .enumerate()
        .map(|(j, c)| if j == i { replacement } else { c })
        .collect()
}
