//! Configuration structures for the pick aggregation pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Books preferred for "bet now" links, most preferred first.
///
/// Featured partners lead, followed by the major books. Keys are lowercase
/// because deep-link payload keys are lowercased on parse.
pub const DEFAULT_DEEP_LINK_PRIORITY: &[&str] = &[
    "chalkboard",
    "underdog",
    "betr",
    "sleeper",
    "dabble",
    "boom",
    "novig",
    "rebet",
    "onyx",
    "draftkings",
    "fanduel",
    "betmgm",
    "espnbet",
    "betrivers",
    "fanatics",
    "hardrockbet",
    "ballybet",
    "prophetx",
    "prizepicks",
];

/// Most books a single "Bet:" line may show.
pub const MAX_DEEP_LINK_BOOKS: usize = 3;

/// Main configuration for the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Aggregation configuration.
    pub aggregation: AggregationConfig,
    /// Deep-link display configuration.
    pub deep_links: DeepLinkConfig,
    /// Hit-rate display configuration.
    pub hit_rate: HitRateConfig,
    /// Sportsbook selection for the upstream request.
    pub books: BookConfig,
}

impl Config {
    /// Parse a configuration document. Missing sections take defaults.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Reject settings that would make the output meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.aggregation.max_per_group == 0 {
            return Err(Error::config("aggregation.max_per_group must be at least 1"));
        }
        let state = self.aggregation.jurisdiction.trim();
        if state.is_empty() || !state.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::config(format!(
                "aggregation.jurisdiction must be a state code, got {:?}",
                self.aggregation.jurisdiction
            )));
        }
        if self.deep_links.max_books > MAX_DEEP_LINK_BOOKS {
            return Err(Error::config(format!(
                "deep_links.max_books must be at most {MAX_DEEP_LINK_BOOKS}, got {}",
                self.deep_links.max_books
            )));
        }
        if self.hit_rate.display_ceiling > 100 {
            return Err(Error::config("hit_rate.display_ceiling must be within 0..=100"));
        }
        if self.hit_rate.small_sample_threshold == 0 {
            return Err(Error::config("hit_rate.small_sample_threshold must be at least 1"));
        }
        Ok(())
    }
}

/// Aggregation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Maximum picks shown per category.
    pub max_per_group: usize,
    /// Jurisdiction substituted for `{state}` in deep links.
    pub jurisdiction: String,
    /// Stake substituted for `{wagerAmount}` when set.
    pub wager_amount: Option<u32>,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            max_per_group: 3,
            jurisdiction: "ny".to_string(),
            wager_amount: None,
        }
    }
}

/// Deep-link display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeepLinkConfig {
    /// Maximum books in one "Bet:" line, at most `MAX_DEEP_LINK_BOOKS`.
    /// Zero hides the line.
    pub max_books: usize,
    /// Display priority of books.
    pub priority: Vec<String>,
}

impl Default for DeepLinkConfig {
    fn default() -> Self {
        Self {
            max_books: MAX_DEEP_LINK_BOOKS,
            priority: DEFAULT_DEEP_LINK_PRIORITY.iter().map(|b| b.to_string()).collect(),
        }
    }
}

/// Hit-rate display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HitRateConfig {
    /// Samples smaller than this are flagged and shown uncapped.
    pub small_sample_threshold: u32,
    /// Cosmetic ceiling on the displayed percentage.
    pub display_ceiling: u32,
}

impl Default for HitRateConfig {
    fn default() -> Self {
        Self {
            small_sample_threshold: 8,
            display_ceiling: 95,
        }
    }
}

/// Sportsbooks requested from the upstream feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Requested book names; aliases allowed.
    pub requested: Vec<String>,
    /// Maximum books sent upstream.
    pub max_books: usize,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            requested: ["draftkings", "fanduel", "betmgm", "prizepicks", "underdog", "novig"]
                .iter()
                .map(|b| b.to_string())
                .collect(),
            max_books: 6,
        }
    }
}
