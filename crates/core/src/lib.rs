//! Core types and configuration for the pick aggregation pipeline.
//!
//! This crate provides shared types used across all other crates:
//! - Pick records, identities, scores and categories
//! - Rendered output types (picks and sections)
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod lenient;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
