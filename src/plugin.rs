//! Plugin lifecycle wiring.
//!
//! Builds the confusable table, seeds the blocklist and override set,
//! and exposes the open/close hooks the host node calls around its own
//! lifecycle. Nothing here survives a restart; the seeds are recreated
//! from static data and dynamic discoveries are re-derived from traffic.

use std::sync::Arc;

use tracing::info;

use crate::filter::{Blocklist, Interceptor, OverrideSet};
use crate::homograph::ConfusableTable;
use crate::reserved::{IcannLookup, ReservedNames};
use crate::resolver::Resolver;
use crate::stats::Stats;

/// Identifier the host registers the interceptor under.
pub const ID: &str = "handrail";

/// The assembled filter plugin.
pub struct Plugin {
    resolver: Resolver,
    blocklist: Arc<Blocklist>,
    stats: Arc<Stats>,
}

impl Plugin {
    /// Wire the filter against the host's reserved-name oracle and ICANN
    /// resolution path.
    pub fn new(reserved: Arc<dyn ReservedNames>, icann: Arc<dyn IcannLookup>) -> Self {
        let blocklist = Arc::new(Blocklist::new());
        let stats = Arc::new(Stats::new());
        let interceptor = Interceptor::new(
            ConfusableTable::embedded(),
            OverrideSet::new(),
            blocklist.clone(),
            reserved,
            icann,
        );
        let resolver = Resolver::new(interceptor, blocklist.clone(), stats.clone());

        Self {
            resolver,
            blocklist,
            stats,
        }
    }

    /// Called by the host once the node is up.
    pub fn open(&self) {
        info!("Root nameserver filtering is active.");
    }

    /// Called by the host on shutdown.
    pub fn close(&self) {}

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn blocklist(&self) -> &Blocklist {
        &self.blocklist
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }
}
