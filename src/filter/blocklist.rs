//! Blocklist of names that must never resolve, and the override set of
//! names always routed to the ICANN path.
//!
//! The blocklist is shared by every in-flight lookup and only ever grows:
//! entries are seeded at construction and added as dangerous homographs
//! are discovered in live traffic. There is no removal path.

use rustc_hash::FxHashSet;
use std::sync::RwLock;

/// Labels reserved for local or special use (RFC 2606 plus common LAN
/// suffixes), seeded into every blocklist.
const RESERVED_USE: &[&str] = &[
    "corp",
    "domain",
    "example",
    "home",
    "invalid",
    "lan",
    "local",
    "localdomain",
    "localhost",
    "test",
];

/// Names that collide with pending or delegated ICANN TLD applications and
/// must resolve through the ICANN path instead of the local root.
const OVERRIDE_NAMES: &[&str] = &[
    "amazon",
    "xn--cckwcxetd",
    "xn--jlq480n2rg",
    "hotel",
    "idn",
    "kids",
    "music",
    "spa",
    "web",
    "webs",
    "merck",
];

/// Monotonic set of blocked names, safe for concurrent lookups.
pub struct Blocklist {
    names: RwLock<FxHashSet<String>>,
}

impl Blocklist {
    /// Create a blocklist pre-seeded with the static collision names:
    /// the decimal labels `"0"` through `"255"` (lookalikes of IPv4
    /// octets) and the reserved-use label set.
    pub fn new() -> Self {
        let mut names = FxHashSet::default();
        for octet in 0u16..=255 {
            names.insert(octet.to_string());
        }
        for name in RESERVED_USE {
            names.insert((*name).to_string());
        }

        Self {
            names: RwLock::new(names),
        }
    }

    /// Check whether a name is blocked. A poisoned lock reads as not
    /// blocked; the host then falls through to normal resolution.
    pub fn contains(&self, name: &str) -> bool {
        let Ok(names) = self.names.read() else {
            return false;
        };
        names.contains(name)
    }

    /// Insert a name. Re-inserting an existing member is a no-op and
    /// allocates nothing.
    pub fn add(&self, name: &str) {
        let Ok(mut names) = self.names.write() else {
            return;
        };
        if !names.contains(name) {
            names.insert(name.to_string());
        }
    }

    /// Number of blocked names.
    pub fn len(&self) -> usize {
        self.names.read().map(|names| names.len()).unwrap_or(0)
    }
}

impl Default for Blocklist {
    fn default() -> Self {
        Self::new()
    }
}

/// Names force-routed to the ICANN path. Immutable after construction.
pub struct OverrideSet {
    names: FxHashSet<String>,
}

impl OverrideSet {
    /// Create the override set with the static collision names.
    pub fn new() -> Self {
        Self::from_names(OVERRIDE_NAMES.iter().copied())
    }

    /// Create an override set from arbitrary names.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            names: names.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}

impl Default for OverrideSet {
    fn default() -> Self {
        Self::new()
    }
}
