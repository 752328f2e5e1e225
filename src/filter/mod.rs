//! Pre-resolution interception hook.
//!
//! Runs once per incoming lookup, before the host resolves the name:
//! override names are routed to the ICANN path, canonical-form names pass
//! straight through, and everything else is expanded into its confusable
//! variants and checked against the reserved name set. A reserved variant
//! suppresses the lookup and lands in the blocklist.

mod blocklist;

pub use blocklist::{Blocklist, OverrideSet};

use std::sync::Arc;

use tracing::warn;

use crate::homograph::{self, ConfusableTable};
use crate::reserved::{IcannLookup, Referral, ReservedNames, ResolveError};

/// What the host should do with a lookup.
#[derive(Debug)]
pub enum Action {
    /// No objection. The host checks its blocklist and resolves normally.
    Continue,
    /// The name was resolved through the ICANN path; the host returns
    /// this referral verbatim.
    Forced(Referral),
    /// A dangerous homograph was recorded in the blocklist. The host
    /// responds as if the name were already blocklisted.
    Suppress,
}

/// Per-request decision function tying the filter together.
pub struct Interceptor {
    table: ConfusableTable,
    overrides: OverrideSet,
    blocklist: Arc<Blocklist>,
    reserved: Arc<dyn ReservedNames>,
    icann: Arc<dyn IcannLookup>,
}

impl Interceptor {
    pub fn new(
        table: ConfusableTable,
        overrides: OverrideSet,
        blocklist: Arc<Blocklist>,
        reserved: Arc<dyn ReservedNames>,
        icann: Arc<dyn IcannLookup>,
    ) -> Self {
        Self {
            table,
            overrides,
            blocklist,
            reserved,
            icann,
        }
    }

    /// Decide what to do with a lookup for `name`.
    ///
    /// Collaborator failures propagate to the caller; the blocklist is
    /// only mutated after a definitive reserved answer.
    pub async fn intercept(&self, name: &str) -> Result<Action, ResolveError> {
        if self.overrides.contains(name) {
            warn!("forcing ICANN lookup for name {name}");
            let referral = self.icann.lookup_icann(name).await?;
            return Ok(Action::Forced(referral));
        }

        // Names that cannot canonicalize get no objection rather than an
        // error; the host's own validation decides their fate.
        let Some(unicode) = unicode_form(name) else {
            return Ok(Action::Continue);
        };

        // Fast path: a name already in canonical ASCII form has no
        // confusable characters of interest. This is the common case.
        if name.is_ascii() && unicode == name {
            return Ok(Action::Continue);
        }

        for candidate in homograph::expand(&unicode, &self.table) {
            if self.reserved.lookup_reserved(&candidate).await?.is_some() {
                warn!("blocking lookup for name {name} (reserved homograph: {candidate})");
                self.blocklist.add(&candidate);
                self.blocklist.add(name);
                return Ok(Action::Suppress);
            }
        }

        Ok(Action::Continue)
    }
}

/// IDNA Unicode form of a lookup name (ACE labels decoded), or `None`
/// when the name is malformed and cannot be canonicalized.
fn unicode_form(name: &str) -> Option<String> {
    let (unicode, result) = idna::domain_to_unicode(name);
    result.ok()?;
    Some(unicode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reserved::ReservedRecord;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Oracle over a fixed name set, counting how often it is consulted.
    struct FixedOracle {
        reserved: Vec<&'static str>,
        lookups: AtomicUsize,
    }

    impl FixedOracle {
        fn new(reserved: &[&'static str]) -> Arc<Self> {
            Arc::new(Self {
                reserved: reserved.to_vec(),
                lookups: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ReservedNames for FixedOracle {
        async fn lookup_reserved(
            &self,
            name: &str,
        ) -> Result<Option<ReservedRecord>, ResolveError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self.reserved.iter().find(|r| **r == name).map(|r| {
                ReservedRecord {
                    name: r.to_string(),
                    zone: format!("{r}."),
                }
            }))
        }
    }

    /// Oracle that fails every lookup.
    struct DownOracle;

    #[async_trait]
    impl ReservedNames for DownOracle {
        async fn lookup_reserved(
            &self,
            _name: &str,
        ) -> Result<Option<ReservedRecord>, ResolveError> {
            Err(ResolveError::Upstream("oracle unreachable".to_string()))
        }
    }

    struct StubIcann;

    #[async_trait]
    impl IcannLookup for StubIcann {
        async fn lookup_icann(&self, name: &str) -> Result<Referral, ResolveError> {
            Ok(Referral {
                name: name.to_string(),
                nameservers: vec!["a.root-servers.net".to_string()],
            })
        }
    }

    fn test_table() -> ConfusableTable {
        ConfusableTable::from_dataset("a\t\u{0430}\ne\t\u{0435}\no\t\u{043E}\np\t\u{0440}")
    }

    fn interceptor(
        overrides: OverrideSet,
        oracle: Arc<FixedOracle>,
    ) -> (Interceptor, Arc<Blocklist>) {
        let blocklist = Arc::new(Blocklist::new());
        let hook = Interceptor::new(
            test_table(),
            overrides,
            blocklist.clone(),
            oracle,
            Arc::new(StubIcann),
        );
        (hook, blocklist)
    }

    #[tokio::test]
    async fn canonical_ascii_name_skips_the_oracle() {
        let oracle = FixedOracle::new(&["apple"]);
        let (hook, _) = interceptor(OverrideSet::new(), oracle.clone());

        let action = hook.intercept("example").await.unwrap();

        assert!(matches!(action, Action::Continue));
        assert_eq!(oracle.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn numeric_label_above_seed_range_continues() {
        let oracle = FixedOracle::new(&[]);
        let (hook, blocklist) = interceptor(OverrideSet::new(), oracle);

        let action = hook.intercept("256").await.unwrap();

        assert!(matches!(action, Action::Continue));
        assert!(!blocklist.contains("256"));
    }

    #[tokio::test]
    async fn cyrillic_homograph_is_suppressed_and_remembered() {
        let oracle = FixedOracle::new(&["apple"]);
        let (hook, blocklist) = interceptor(OverrideSet::new(), oracle);

        // Leading Cyrillic a.
        let action = hook.intercept("\u{0430}pple").await.unwrap();

        assert!(matches!(action, Action::Suppress));
        assert!(blocklist.contains("\u{0430}pple"));
        assert!(blocklist.contains("apple"));
    }

    #[tokio::test]
    async fn ace_form_homograph_is_suppressed() {
        let oracle = FixedOracle::new(&["apple"]);
        let (hook, blocklist) = interceptor(OverrideSet::new(), oracle);

        // Punycode of "аpple" with the leading Cyrillic a.
        let action = hook.intercept("xn--pple-43d").await.unwrap();

        assert!(matches!(action, Action::Suppress));
        assert!(blocklist.contains("apple"));
        assert!(blocklist.contains("xn--pple-43d"));
    }

    #[tokio::test]
    async fn harmless_homograph_continues_without_mutation() {
        let oracle = FixedOracle::new(&["apple"]);
        let (hook, blocklist) = interceptor(OverrideSet::new(), oracle.clone());
        let before = blocklist.len();

        let action = hook.intercept("\u{0430}zzz").await.unwrap();

        assert!(matches!(action, Action::Continue));
        assert_eq!(blocklist.len(), before);
        assert!(oracle.lookups.load(Ordering::SeqCst) > 0);
    }

    #[tokio::test]
    async fn override_takes_precedence_over_homograph_match() {
        let oracle = FixedOracle::new(&["apple"]);
        let overrides = OverrideSet::from_names(["\u{0430}pple"]);
        let (hook, blocklist) = interceptor(overrides, oracle.clone());

        let action = hook.intercept("\u{0430}pple").await.unwrap();

        let Action::Forced(referral) = action else {
            panic!("expected forced ICANN resolution");
        };
        assert_eq!(referral.nameservers, ["a.root-servers.net"]);
        assert!(!blocklist.contains("\u{0430}pple"));
        assert_eq!(oracle.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn static_override_names_are_forced() {
        let oracle = FixedOracle::new(&[]);
        let (hook, _) = interceptor(OverrideSet::new(), oracle);

        for name in ["amazon", "music", "xn--jlq480n2rg"] {
            let action = hook.intercept(name).await.unwrap();
            assert!(matches!(action, Action::Forced(_)), "{name} not forced");
        }
    }

    #[tokio::test]
    async fn oracle_failure_propagates_without_mutation() {
        let blocklist = Arc::new(Blocklist::new());
        let hook = Interceptor::new(
            test_table(),
            OverrideSet::new(),
            blocklist.clone(),
            Arc::new(DownOracle),
            Arc::new(StubIcann),
        );
        let before = blocklist.len();

        let result = hook.intercept("\u{0430}pple").await;

        assert!(result.is_err());
        assert_eq!(blocklist.len(), before);
        assert!(!blocklist.contains("\u{0430}pple"));
    }

    #[tokio::test]
    async fn malformed_name_continues() {
        let oracle = FixedOracle::new(&["apple"]);
        let (hook, _) = interceptor(OverrideSet::new(), oracle);

        // Embedded NUL cannot survive IDNA processing.
        let action = hook.intercept("\u{0}\u{0430}pple").await.unwrap();

        assert!(matches!(action, Action::Continue));
    }
}
