//! Selection, formatting and assembly for the pick aggregation pipeline.
//!
//! This crate handles:
//! - Category-aware selection and ranking
//! - Rendering picks into text lines
//! - The end-to-end aggregation pipeline
//! - Single-message digest rendering

pub mod teams;
pub mod selector;
pub mod formatter;
pub mod aggregator;
pub mod digest;

pub use teams::TeamDirectory;
pub use selector::{policy_for, select, SelectionPolicy};
pub use formatter::LineFormatter;
pub use aggregator::{aggregate_with, Aggregation, Aggregator};
pub use digest::render_digest;
