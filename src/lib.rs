//! Handrail - a homograph-aware filter for DNS name resolution.
//!
//! Sits in front of an alternative-root resolver and refuses to resolve
//! names that are confusable-glyph lookalikes of reserved names, plus a
//! static set of known namespace collisions.

pub mod filter;
pub mod homograph;
pub mod plugin;
pub mod reserved;
pub mod resolver;
pub mod stats;
