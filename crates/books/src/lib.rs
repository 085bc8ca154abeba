//! Sportsbook knowledge for the pick aggregation pipeline.
//!
//! This crate handles:
//! - Canonical book ids, aliases and validation
//! - Deep-link payload parsing, ordering and placeholder substitution

pub mod registry;
pub mod deeplink;

pub use registry::BookRegistry;
pub use deeplink::{DeepLinkSet, LinkOptions};
