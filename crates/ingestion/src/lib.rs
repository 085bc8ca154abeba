//! Feed ingestion for the pick aggregation pipeline.
//!
//! This crate handles:
//! - Reading the upstream feed envelope into pick records
//! - Wager category inference
//! - Exact-duplicate removal by pick identity

pub mod feed;
pub mod classifier;
pub mod dedup;

pub use feed::{parse_feed, read_feed};
pub use classifier::{classify, group_by_category, ClassificationStats};
pub use dedup::dedupe;
