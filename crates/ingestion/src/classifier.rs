//! Wager category inference from free-text market fields.
//!
//! Rules are tried in a fixed order and the first match wins. Prop language
//! must be checked before generic totals language: "Player Points Over" is a
//! prop, not a game total.

use std::collections::BTreeMap;

use picks_core::{PickCategory, PickRecord};

/// Terms that mark a market as a player statistic.
pub const STAT_TERMS: &[&str] = &[
    "points",
    "assists",
    "rebounds",
    "pra",
    "steals",
    "blocks",
    "threes",
    "3pt",
    "three pointers",
    "made threes",
    "turnovers",
    "yards",
    "touchdowns",
    "receptions",
    "completions",
    "passing",
    "rushing",
    "receiving",
];

const SPREAD_TERMS: &[&str] = &["spread", "handicap", "ats"];

/// Whether lowercase text mentions a player statistic.
pub fn has_stat_term(lower: &str) -> bool {
    STAT_TERMS.iter().any(|term| lower.contains(term))
}

/// Whether lowercase market text implies a spread.
pub fn has_spread_term(lower: &str) -> bool {
    SPREAD_TERMS.iter().any(|term| lower.contains(term))
}

/// Classify a record. Always returns one of the five categories.
pub fn classify(record: &PickRecord) -> PickCategory {
    let market = record.market().to_lowercase();
    let name = record.outcome_name().to_lowercase();

    if has_stat_term(&market) || has_stat_term(&name) {
        return PickCategory::PlayerProps;
    }
    if has_spread_term(&market) {
        return PickCategory::Spread;
    }
    if market.contains("total") || name == "over" || name == "under" {
        return PickCategory::Totals;
    }
    if market.contains("moneyline") || market == "ml" {
        return PickCategory::Moneyline;
    }
    PickCategory::Other
}

/// Per-category counts from one grouping pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationStats {
    /// Records seen.
    pub total: usize,
    /// Records per category.
    pub per_category: BTreeMap<PickCategory, usize>,
}

impl ClassificationStats {
    /// Records that matched no rule.
    pub fn unmatched(&self) -> usize {
        self.per_category.get(&PickCategory::Other).copied().unwrap_or(0)
    }
}

/// Bucket records by category, preserving input order within each bucket.
pub fn group_by_category<'a, I>(records: I) -> (BTreeMap<PickCategory, Vec<&'a PickRecord>>, ClassificationStats)
where
    I: IntoIterator<Item = &'a PickRecord>,
{
    let mut groups: BTreeMap<PickCategory, Vec<&'a PickRecord>> = BTreeMap::new();
    let mut stats = ClassificationStats::default();
    for record in records {
        let category = classify(record);
        groups.entry(category).or_default().push(record);
        stats.total += 1;
        *stats.per_category.entry(category).or_default() += 1;
    }
    (groups, stats)
}
