//! Category-aware selection of the picks to show.
//!
//! A raw feed often carries many alternate lines for the same player or the
//! same game. Props and totals therefore keep only the best-scoring record
//! per player / per game before ranking; the remaining categories keep feed
//! order and only drop exact duplicates.

use std::collections::HashMap;
use std::hash::Hash;

use picks_core::{PickCategory, PickRecord};
use picks_ingestion::dedup::dedupe;

/// Selection strategy for one category.
pub trait SelectionPolicy: Send + Sync {
    /// Choose at most `max_per_group` records from `bucket`.
    fn select<'a>(&self, bucket: &[&'a PickRecord], max_per_group: usize) -> Vec<&'a PickRecord>;
}

/// One pick per player, best score first.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlayerPropsPolicy;

/// One pick per game, best score first.
#[derive(Debug, Default, Clone, Copy)]
pub struct TotalsPolicy;

/// Exact-duplicate removal in feed order.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityPolicy;

/// Collision key for player props.
///
/// Player name when present, else outcome name, else a key built from the
/// matchup and market so that anonymous records never collide with named ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlayerKey {
    Named(String),
    Anonymous {
        home: Option<String>,
        away: Option<String>,
        market: Option<String>,
        outcome: String,
    },
}

impl PlayerKey {
    pub fn of(record: &PickRecord) -> Self {
        let name = [record.description(), record.outcome_name()]
            .into_iter()
            .find(|s| !s.is_empty());
        match name {
            Some(name) => PlayerKey::Named(name.to_lowercase()),
            None => PlayerKey::Anonymous {
                home: record.home_team.clone(),
                away: record.away_team.clone(),
                market: record.market.clone(),
                outcome: record
                    .outcome_point
                    .map(|p| p.to_string())
                    .unwrap_or_default(),
            },
        }
    }
}

/// Collision key for totals: (away, home), abbreviations preferred.
pub fn game_key(record: &PickRecord) -> (String, String) {
    let side = |abbr: &Option<String>, name: &Option<String>| {
        [abbr, name]
            .into_iter()
            .filter_map(|f| f.as_deref().map(str::trim))
            .find(|s| !s.is_empty())
            .unwrap_or("")
            .to_string()
    };
    (
        side(&record.away_team_abbreviation, &record.away_team),
        side(&record.home_team_abbreviation, &record.home_team),
    )
}

/// Keep the best record per key (earliest wins ties), then rank and cap.
fn best_per_key<'a, K, F>(bucket: &[&'a PickRecord], max_per_group: usize, key_fn: F) -> Vec<&'a PickRecord>
where
    K: Eq + Hash,
    F: Fn(&PickRecord) -> K,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut best: Vec<&'a PickRecord> = Vec::new();
    for &record in bucket {
        match slots.get(&key_fn(record)) {
            Some(&slot) => {
                if record.score() > best[slot].score() {
                    best[slot] = record;
                }
            }
            None => {
                slots.insert(key_fn(record), best.len());
                best.push(record);
            }
        }
    }
    best.sort_by(|a, b| b.score().cmp(&a.score()));
    best.truncate(max_per_group);
    best
}

impl SelectionPolicy for PlayerPropsPolicy {
    fn select<'a>(&self, bucket: &[&'a PickRecord], max_per_group: usize) -> Vec<&'a PickRecord> {
        best_per_key(bucket, max_per_group, PlayerKey::of)
    }
}

impl SelectionPolicy for TotalsPolicy {
    fn select<'a>(&self, bucket: &[&'a PickRecord], max_per_group: usize) -> Vec<&'a PickRecord> {
        best_per_key(bucket, max_per_group, game_key)
    }
}

impl SelectionPolicy for IdentityPolicy {
    fn select<'a>(&self, bucket: &[&'a PickRecord], max_per_group: usize) -> Vec<&'a PickRecord> {
        dedupe(bucket.iter().copied(), max_per_group)
    }
}

/// The policy used for a category.
pub fn policy_for(category: PickCategory) -> &'static dyn SelectionPolicy {
    match category {
        PickCategory::PlayerProps => &PlayerPropsPolicy,
        PickCategory::Totals => &TotalsPolicy,
        PickCategory::Spread | PickCategory::Moneyline | PickCategory::Other => &IdentityPolicy,
    }
}

/// Select the picks to show for one category.
pub fn select<'a>(category: PickCategory, bucket: &[&'a PickRecord], max_per_group: usize) -> Vec<&'a PickRecord> {
    policy_for(category).select(bucket, max_per_group)
}
