//! Core data types for the pick aggregation pipeline.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::lenient;

/// American odds (e.g. -110, +150).
pub type AmericanOdds = i64;

/// Numeric outcome line with total ordering, usable as a map key.
pub type Line = OrderedFloat<f64>;

/// A single pick as delivered by the upstream feed.
///
/// Every field is optional: the feed is noisy and the pipeline treats a
/// missing or mistyped field as absent rather than rejecting the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickRecord {
    /// Home team full name.
    #[serde(deserialize_with = "lenient::string")]
    pub home_team: Option<String>,
    /// Away team full name.
    #[serde(deserialize_with = "lenient::string")]
    pub away_team: Option<String>,
    /// Home team abbreviation (e.g. "GSW").
    #[serde(deserialize_with = "lenient::string")]
    pub home_team_abbreviation: Option<String>,
    /// Away team abbreviation.
    #[serde(deserialize_with = "lenient::string")]
    pub away_team_abbreviation: Option<String>,
    /// Free-text market label (e.g. "Alternate Spread").
    #[serde(deserialize_with = "lenient::string")]
    pub market: Option<String>,
    /// Outcome name: "Over", "Under", or a team name.
    #[serde(deserialize_with = "lenient::string")]
    pub outcome_name: Option<String>,
    /// Outcome description, the player name for props.
    #[serde(deserialize_with = "lenient::string")]
    pub outcome_description: Option<String>,
    /// Numeric line (e.g. 14.5).
    #[serde(deserialize_with = "lenient::number")]
    pub outcome_point: Option<f64>,
    /// Best available American odds.
    #[serde(rename = "bestOdds", deserialize_with = "lenient::odds")]
    pub best_odds: Option<AmericanOdds>,
    /// Historical wins for this class of pick.
    #[serde(deserialize_with = "lenient::number")]
    pub hit_rate_wins: Option<f64>,
    /// Historical sample size.
    #[serde(deserialize_with = "lenient::number")]
    pub hit_rate_total: Option<f64>,
    /// Historical win percentage (0-100).
    #[serde(deserialize_with = "lenient::number")]
    pub hit_rate_percentage: Option<f64>,
    /// Serialized book -> URL template mapping.
    #[serde(rename = "deepLinks", deserialize_with = "lenient::payload")]
    pub deep_links: Option<String>,
}

impl PickRecord {
    /// Market label, trimmed; empty when absent.
    pub fn market(&self) -> &str {
        trimmed(&self.market)
    }

    /// Outcome name, trimmed; empty when absent.
    pub fn outcome_name(&self) -> &str {
        trimmed(&self.outcome_name)
    }

    /// Outcome description (player name), trimmed; empty when absent.
    pub fn description(&self) -> &str {
        trimmed(&self.outcome_description)
    }

    /// Away side label: abbreviation, then full name, then "Away".
    pub fn away_label(&self) -> &str {
        first_present(&self.away_team_abbreviation, &self.away_team).unwrap_or("Away")
    }

    /// Home side label: abbreviation, then full name, then "Home".
    pub fn home_label(&self) -> &str {
        first_present(&self.home_team_abbreviation, &self.home_team).unwrap_or("Home")
    }

    /// The key that defines "the same bet idea".
    pub fn identity(&self) -> PickIdentity {
        PickIdentity {
            home_team: self.home_team.clone(),
            away_team: self.away_team.clone(),
            market: self.market.clone(),
            outcome_name: self.outcome_name.clone(),
            outcome_point: self.outcome_point.map(OrderedFloat),
            outcome_description: self.description().to_string(),
        }
    }

    /// Ranking score within a category.
    pub fn score(&self) -> CompositeScore {
        CompositeScore::new(self.hit_rate_percentage, self.best_odds)
    }

    /// Hit-rate view over the record.
    pub fn hit_rate(&self) -> HitRate {
        HitRate {
            wins: self.hit_rate_wins,
            total: self.hit_rate_total,
            percentage: self.hit_rate_percentage,
        }
    }
}

fn trimmed(field: &Option<String>) -> &str {
    field.as_deref().map(str::trim).unwrap_or("")
}

fn first_present<'a>(primary: &'a Option<String>, fallback: &'a Option<String>) -> Option<&'a str> {
    [primary, fallback]
        .into_iter()
        .filter_map(|f| f.as_deref())
        .find(|s| !s.is_empty())
}

/// Deduplication key for a pick.
///
/// Fine-grained on purpose: different players or different lines on the
/// same market are different bets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PickIdentity {
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub market: Option<String>,
    pub outcome_name: Option<String>,
    pub outcome_point: Option<Line>,
    pub outcome_description: String,
}

/// Composite ranking score: hit-rate percentage first, then odds.
///
/// Missing percentage scores as 0 and missing odds as 1. Field order is the
/// comparison order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CompositeScore {
    pub hit_rate_pct: OrderedFloat<f64>,
    pub odds: OrderedFloat<f64>,
}

impl CompositeScore {
    /// Build a score from optional inputs.
    pub fn new(hit_rate_pct: Option<f64>, odds: Option<AmericanOdds>) -> Self {
        Self {
            hit_rate_pct: OrderedFloat(hit_rate_pct.unwrap_or(0.0)),
            odds: OrderedFloat(odds.map(|o| o as f64).unwrap_or(1.0)),
        }
    }
}

/// Hit-rate sample attached to a pick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HitRate {
    pub wins: Option<f64>,
    pub total: Option<f64>,
    pub percentage: Option<f64>,
}

impl HitRate {
    /// A sample is shown only when it has a non-zero total and a win count.
    pub fn has_sample(&self) -> bool {
        matches!(self.total, Some(t) if t != 0.0) && self.wins.is_some()
    }
}

/// Wager category, always derived from the record's text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickCategory {
    Spread,
    Totals,
    Moneyline,
    PlayerProps,
    Other,
}

impl PickCategory {
    /// Display order of sections.
    pub const ALL: [PickCategory; 5] = [
        PickCategory::Spread,
        PickCategory::Totals,
        PickCategory::Moneyline,
        PickCategory::PlayerProps,
        PickCategory::Other,
    ];

    /// Wire key (matches the serde name).
    pub fn key(self) -> &'static str {
        match self {
            PickCategory::Spread => "spread",
            PickCategory::Totals => "totals",
            PickCategory::Moneyline => "moneyline",
            PickCategory::PlayerProps => "player_props",
            PickCategory::Other => "other",
        }
    }

    /// Section heading.
    pub fn label(self) -> &'static str {
        match self {
            PickCategory::Spread => "⭐ Spread Picks",
            PickCategory::Totals => "🔥 Totals Picks",
            PickCategory::Moneyline => "💰 Moneyline Picks",
            PickCategory::PlayerProps => "🎯 Player Props",
            PickCategory::Other => "📦 Other Picks",
        }
    }

    /// Style hint for the section.
    pub fn style(self) -> SectionStyle {
        match self {
            PickCategory::Spread => SectionStyle::new("blue", 0x3498DB),
            PickCategory::Totals => SectionStyle::new("green", 0x2ECC71),
            PickCategory::Moneyline => SectionStyle::new("gold", 0xF1C40F),
            PickCategory::PlayerProps => SectionStyle::new("purple", 0x9B59B6),
            PickCategory::Other => SectionStyle::new("dark_grey", 0x607D8B),
        }
    }

    /// Parse a wire key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl std::fmt::Display for PickCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Colour hint for a rendered section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionStyle {
    /// Colour name.
    pub name: &'static str,
    /// RGB value.
    pub colour: u32,
}

impl SectionStyle {
    const fn new(name: &'static str, colour: u32) -> Self {
        Self { name, colour }
    }
}

/// One rendered pick: a header, an optional detail line and an optional
/// deep-link line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedPick {
    pub header: String,
    pub details: Option<String>,
    pub deep_links: Option<String>,
}

impl FormattedPick {
    /// All present lines joined with newlines.
    pub fn text(&self) -> String {
        let mut out = self.header.clone();
        for line in [&self.details, &self.deep_links].into_iter().flatten() {
            out.push('\n');
            out.push_str(line);
        }
        out
    }
}

/// An ordered, labelled group of rendered picks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedSection {
    pub category: PickCategory,
    pub label: &'static str,
    pub style: SectionStyle,
    pub picks: Vec<FormattedPick>,
}

impl FormattedSection {
    /// Empty section for a category.
    pub fn new(category: PickCategory) -> Self {
        Self {
            category,
            label: category.label(),
            style: category.style(),
            picks: Vec::new(),
        }
    }
}
