//! Aggregation pipeline.
//!
//! raw feed -> global dedupe -> bucket by category -> per-bucket selection
//! -> per-record formatting -> sections in fixed category order.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use picks_core::config::Config;
use picks_core::{FormattedSection, PickCategory, PickRecord, Result};
use picks_ingestion::{dedupe, group_by_category, read_feed};

use crate::formatter::LineFormatter;
use crate::selector::select;

/// Result of one aggregation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    /// Non-empty sections in display order.
    pub sections: Vec<FormattedSection>,
    /// Records found in the feed.
    pub feed_size: usize,
    /// Records left after global dedupe.
    pub unique_picks: usize,
}

impl Aggregation {
    /// The feed carried no picks at all.
    pub fn is_empty_feed(&self) -> bool {
        self.feed_size == 0
    }

    /// No sections to show.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section for a category, if present.
    pub fn section(&self, category: PickCategory) -> Option<&FormattedSection> {
        self.sections.iter().find(|s| s.category == category)
    }

    /// Number of rendered picks across sections.
    pub fn pick_count(&self) -> usize {
        self.sections.iter().map(|s| s.picks.len()).sum()
    }
}

/// Stateless pipeline bound to one configuration.
#[derive(Debug, Clone)]
pub struct Aggregator {
    max_per_group: usize,
    formatter: LineFormatter,
}

impl Aggregator {
    /// Create an aggregator. Rejects invalid configuration.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            max_per_group: config.aggregation.max_per_group,
            formatter: LineFormatter::new(config),
        })
    }

    /// Swap the formatter (e.g. for another league's team directory).
    pub fn with_formatter(mut self, formatter: LineFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Aggregate a raw feed value.
    pub fn aggregate(&self, raw_feed: &Value) -> Aggregation {
        let records = read_feed(raw_feed);
        self.aggregate_records(&records)
    }

    /// Aggregate already-extracted records.
    pub fn aggregate_records(&self, records: &[PickRecord]) -> Aggregation {
        let unique = dedupe(records, records.len());
        let (groups, stats) = group_by_category(unique.iter().copied());
        debug!(
            feed_size = records.len(),
            unique = unique.len(),
            unmatched = stats.unmatched(),
            "classified feed"
        );

        let mut sections = Vec::new();
        for category in PickCategory::ALL {
            let Some(bucket) = groups.get(&category) else {
                continue;
            };
            let mut section = FormattedSection::new(category);
            section.picks = select(category, bucket, self.max_per_group)
                .into_iter()
                .map(|record| self.formatter.format(record))
                .collect();
            if !section.picks.is_empty() {
                sections.push(section);
            }
        }

        debug!(sections = sections.len(), "aggregation complete");
        Aggregation {
            sections,
            feed_size: records.len(),
            unique_picks: unique.len(),
        }
    }
}

/// Aggregate with default settings apart from the group cap and jurisdiction.
pub fn aggregate_with(raw_feed: &Value, max_per_group: usize, jurisdiction: &str) -> Result<Aggregation> {
    let mut config = Config::default();
    config.aggregation.max_per_group = max_per_group;
    config.aggregation.jurisdiction = jurisdiction.to_string();
    Ok(Aggregator::new(&config)?.aggregate(raw_feed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teams::TeamDirectory;
    use serde_json::json;

    fn aggregator() -> Aggregator {
        Aggregator::new(&Config::default()).unwrap()
    }

    #[test]
    fn test_empty_feed() {
        let result = aggregator().aggregate(&json!({"data": {"picks": []}}));
        assert!(result.is_empty());
        assert!(result.is_empty_feed());
        assert_eq!(result.pick_count(), 0);
    }

    #[test]
    fn test_inconsistent_sample_still_shown() {
        let feed = json!({"data": {"picks": [
            {"market": "Moneyline", "outcome_name": "Utah Jazz",
             "hit_rate_wins": 9, "hit_rate_total": 4, "hit_rate_percentage": 225}
        ]}});
        let result = aggregator().aggregate(&feed);
        assert!(!result.is_empty());
        assert!(!result.is_empty_feed());
        assert_eq!(result.pick_count(), 1);
        assert!(result.sections[0].picks[0].details.is_none());
    }

    #[test]
    fn test_section_order_and_labels() {
        let feed = json!({"data": {"picks": [
            {"market": "Double Chance", "outcome_name": "Draw"},
            {"market": "Player Points", "outcome_name": "Over", "outcome_description": "Cade Cunningham", "outcome_point": 24.5},
            {"market": "Moneyline", "outcome_name": "Utah Jazz"},
            {"market": "Alternate Spread", "outcome_name": "Utah Jazz", "outcome_point": 6.5},
            {"market": "Alternate Game Total", "outcome_name": "Under", "outcome_point": 226.5}
        ]}});
        let result = aggregator().aggregate(&feed);
        let order: Vec<PickCategory> = result.sections.iter().map(|s| s.category).collect();
        assert_eq!(order, PickCategory::ALL.to_vec());
        assert_eq!(result.sections[0].label, "⭐ Spread Picks");
        assert_eq!(result.sections[3].style.name, "purple");
    }

    #[test]
    fn test_inconsistent_sample_keeps_player() {
        let feed = json!({"data": {"picks": [
            {"market": "Player Points", "outcome_name": "Over", "outcome_description": "Jalen Brunson",
             "outcome_point": 27.5, "hit_rate_wins": 12, "hit_rate_total": 10, "hit_rate_percentage": 90},
            {"market": "Player Points", "outcome_name": "Over", "outcome_description": "Jalen Brunson",
             "outcome_point": 25.5, "hit_rate_wins": 6, "hit_rate_total": 10, "hit_rate_percentage": 60}
        ]}});
        let result = aggregate_with(&feed, 3, "ny").unwrap();
        let props = result.section(PickCategory::PlayerProps).unwrap();
        assert_eq!(props.picks.len(), 1);
        assert!(props.picks[0].header.contains("Jalen Brunson Over"));
    }

    #[test]
    fn test_global_dedupe_before_bucketing() {
        let pick = json!({"market": "Moneyline", "outcome_name": "Utah Jazz", "bestOdds": 120});
        let feed = json!({"data": {"picks": [pick.clone(), pick]}});
        let result = aggregator().aggregate(&feed);
        assert_eq!(result.feed_size, 2);
        assert_eq!(result.unique_picks, 1);
        assert_eq!(result.pick_count(), 1);
    }

    #[test]
    fn test_with_formatter_overrides_rendering() {
        let mut uncapped = Config::default();
        uncapped.hit_rate.display_ceiling = 100;
        let formatter = LineFormatter::new(&uncapped).with_teams(TeamDirectory::nba());
        let feed = json!({"data": {"picks": [
            {"market": "Moneyline", "outcome_name": "Utah Jazz",
             "hit_rate_wins": 40, "hit_rate_total": 50, "hit_rate_percentage": 97}
        ]}});

        let capped = aggregator().aggregate(&feed);
        let details = capped.sections[0].picks[0].details.clone().unwrap();
        assert!(details.contains("95% (40/50)"));

        let result = aggregator().with_formatter(formatter).aggregate(&feed);
        let details = result.sections[0].picks[0].details.clone().unwrap();
        assert!(details.contains("97% (40/50)"));
    }

    #[test]
    fn test_aggregate_with_rejects_zero_cap() {
        assert!(aggregate_with(&json!({}), 0, "ny").is_err());
        assert!(aggregate_with(&json!({}), 2, "").is_err());
        assert!(aggregate_with(&json!({}), 2, "pa").unwrap().is_empty_feed());
    }
}
