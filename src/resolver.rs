//! Host-side resolution pipeline.
//!
//! Models the contract between the host node and the interception hook:
//! the hook runs first, then the host consults its blocklist, and only
//! names that survive both are forwarded to normal resolution.

use std::sync::Arc;

use crate::filter::{Action, Blocklist, Interceptor};
use crate::reserved::{Referral, ResolveError};
use crate::stats::Stats;

/// Final disposition of a lookup.
#[derive(Debug)]
pub enum Outcome {
    /// Name passed all checks; the host forwards it to normal resolution.
    Forward,
    /// Name is blocked; the host answers "no such name".
    Denied,
    /// Name was resolved through the ICANN path; the host returns this
    /// referral verbatim.
    Answered(Referral),
}

/// Resolver drives the per-lookup decisions shared by all transports.
pub struct Resolver {
    interceptor: Interceptor,
    blocklist: Arc<Blocklist>,
    stats: Arc<Stats>,
}

impl Resolver {
    pub fn new(interceptor: Interceptor, blocklist: Arc<Blocklist>, stats: Arc<Stats>) -> Self {
        Self {
            interceptor,
            blocklist,
            stats,
        }
    }

    /// Process one lookup and decide what the host should do with it.
    ///
    /// The blocklist check runs after the hook returns, so an entry the
    /// hook just recorded denies the very lookup that discovered it.
    pub async fn resolve(&self, name: &str) -> Result<Outcome, ResolveError> {
        match self.interceptor.intercept(name).await? {
            Action::Forced(referral) => {
                self.stats.record_forced();
                Ok(Outcome::Answered(referral))
            }
            Action::Suppress => {
                self.stats.record_suppressed();
                Ok(Outcome::Denied)
            }
            Action::Continue => {
                if self.blocklist.contains(name) {
                    self.stats.record_denied();
                    Ok(Outcome::Denied)
                } else {
                    self.stats.record_forwarded();
                    Ok(Outcome::Forward)
                }
            }
        }
    }

    /// Number of names currently blocked.
    pub fn blocked_count(&self) -> usize {
        self.blocklist.len()
    }
}
