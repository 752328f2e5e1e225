//! External collaborators of the filter.
//!
//! The reserved-name oracle and the ICANN resolution path belong to the
//! host node; the filter only needs the trait boundary. [`StaticRoot`]
//! implements both over an embedded root-zone snapshot so the binary and
//! tests can run the filter end to end.

use async_trait::async_trait;
use rustc_hash::FxHashSet;
use thiserror::Error;

/// Embedded snapshot of delegated ICANN TLDs, loaded at compile time.
const TLDS_LIST: &str = include_str!("tlds.txt");

/// The thirteen root server hostnames, returned as a referral by
/// [`StaticRoot::lookup_icann`].
const ROOT_SERVERS: &[&str] = &[
    "a.root-servers.net",
    "b.root-servers.net",
    "c.root-servers.net",
    "d.root-servers.net",
    "e.root-servers.net",
    "f.root-servers.net",
    "g.root-servers.net",
    "h.root-servers.net",
    "i.root-servers.net",
    "j.root-servers.net",
    "k.root-servers.net",
    "l.root-servers.net",
    "m.root-servers.net",
];

/// Failure of a collaborator call.
///
/// Propagated to the caller as a resolution failure; the filter never
/// swallows these and never mutates the blocklist on one.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The reserved-name oracle or the ICANN path reported a failure.
    #[error("upstream lookup failed: {0}")]
    Upstream(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A reserved name known to the oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedRecord {
    pub name: String,
    /// Root zone the name collides with, e.g. `"apple."`.
    pub zone: String,
}

/// Answer from the ICANN resolution path: a referral to the servers
/// authoritative for the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Referral {
    pub name: String,
    pub nameservers: Vec<String>,
}

/// Oracle answering whether a name is protected/reserved.
#[async_trait]
pub trait ReservedNames: Send + Sync {
    /// Look up `name` in the reserved set. `Ok(None)` means not reserved.
    async fn lookup_reserved(&self, name: &str) -> Result<Option<ReservedRecord>, ResolveError>;
}

/// Alternate resolution path through the ICANN root.
#[async_trait]
pub trait IcannLookup: Send + Sync {
    /// Resolve `name` through the ICANN path.
    async fn lookup_icann(&self, name: &str) -> Result<Referral, ResolveError>;
}

/// Reserved-name oracle and ICANN path backed by the embedded root-zone
/// snapshot. Real deployments substitute the host node's own lookups.
pub struct StaticRoot {
    tlds: FxHashSet<String>,
}

impl StaticRoot {
    /// Load the embedded TLD snapshot.
    pub fn new() -> Self {
        let tlds = TLDS_LIST
            .lines()
            .filter_map(|line| {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    return None;
                }
                Some(line.to_lowercase())
            })
            .collect();

        Self { tlds }
    }

    /// Number of TLDs in the snapshot.
    pub fn len(&self) -> usize {
        self.tlds.len()
    }
}

impl Default for StaticRoot {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReservedNames for StaticRoot {
    async fn lookup_reserved(&self, name: &str) -> Result<Option<ReservedRecord>, ResolveError> {
        let name = name.to_lowercase();
        if !self.tlds.contains(&name) {
            return Ok(None);
        }
        Ok(Some(ReservedRecord {
            zone: format!("{name}."),
            name,
        }))
    }
}

#[async_trait]
impl IcannLookup for StaticRoot {
    async fn lookup_icann(&self, name: &str) -> Result<Referral, ResolveError> {
        Ok(Referral {
            name: name.to_lowercase(),
            nameservers: ROOT_SERVERS.iter().map(|s| s.to_string()).collect(),
        })
    }
}
