//! Rendering a pick into human-readable lines.
//!
//! Output shape:
//! ```text
//! IND @ DET — T.J. McConnell Under 14.5 (Player Points + Assists)
//!   • odds: -110 • hit rate: 62% (5/8)
//! Bet: [Underdog](https://...) · [Draftkings](https://...)
//! ```

use picks_books::deeplink::{self, LinkOptions};
use picks_core::config::{Config, HitRateConfig, MAX_DEEP_LINK_BOOKS};
use picks_core::{AmericanOdds, FormattedPick, HitRate, PickRecord};
use picks_ingestion::classifier::{has_spread_term, has_stat_term};
use tracing::debug;

use crate::teams::TeamDirectory;

/// Renders pick records using one configuration.
#[derive(Debug, Clone)]
pub struct LineFormatter {
    teams: &'static TeamDirectory,
    hit_rate: HitRateConfig,
    link_priority: Vec<String>,
    max_books: usize,
    jurisdiction: String,
    wager_amount: Option<u32>,
}

impl LineFormatter {
    /// Create a formatter from configuration, resolving teams against the NBA directory.
    pub fn new(config: &Config) -> Self {
        Self {
            teams: TeamDirectory::nba(),
            hit_rate: config.hit_rate.clone(),
            link_priority: config.deep_links.priority.clone(),
            max_books: config.deep_links.max_books.min(MAX_DEEP_LINK_BOOKS),
            jurisdiction: config.aggregation.jurisdiction.clone(),
            wager_amount: config.aggregation.wager_amount,
        }
    }

    /// Use a different team directory.
    pub fn with_teams(mut self, teams: &'static TeamDirectory) -> Self {
        self.teams = teams;
        self
    }

    /// Render a record. Missing or inconsistent fields only drop the part
    /// of the output they feed.
    pub fn format(&self, record: &PickRecord) -> FormattedPick {
        let header = format!(
            "{} @ {} — {}",
            record.away_label(),
            record.home_label(),
            self.descriptor(record)
        );
        FormattedPick {
            header,
            details: self.details(record),
            deep_links: self.deep_link_line(record),
        }
    }

    /// The part of the header after the matchup.
    pub fn descriptor(&self, record: &PickRecord) -> String {
        let market = record.market();
        let outcome = record.outcome_name();
        let player = record.description();
        let line = record.outcome_point;
        let lower_market = market.to_lowercase();

        let is_player_market = lower_market.contains("player") || has_stat_term(&lower_market);
        if is_player_market && !player.is_empty() {
            let main = match (line, outcome.is_empty()) {
                (Some(line), false) => format!("{player} {outcome} {}", format_line(line)),
                (None, false) => format!("{player} {outcome}"),
                (_, true) => player.to_string(),
            };
            return with_market(main, market);
        }

        let team = || self.teams.resolve(outcome, player, market);

        if lower_market.contains("team total") {
            if let Some(team) = team() {
                let main = match (line, outcome.is_empty()) {
                    (Some(line), false) => format!("{team} {outcome} {}", format_line(line)),
                    (None, false) => format!("{team} {outcome}"),
                    (_, true) => team.to_string(),
                };
                return with_market(main, market);
            }
        }

        if has_spread_term(&lower_market) {
            if let Some(team) = team() {
                let main = match line {
                    Some(line) => format!("{team} {}", format_signed_line(line)),
                    None => team.to_string(),
                };
                return with_market(main, market);
            }
        }

        if let Some(line) = line {
            if outcome.is_empty() {
                return format_line(line);
            }
            return with_market(format!("{outcome} {}", format_line(line)), market);
        }

        [outcome, market]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or("Pick")
            .to_string()
    }

    /// Odds and hit-rate line, if there is anything to show.
    pub fn details(&self, record: &PickRecord) -> Option<String> {
        let mut bits = Vec::with_capacity(2);
        if let Some(odds) = record.best_odds {
            bits.push(format!("odds: {}", format_odds(odds)));
        }
        if let Some(hit) = hit_rate_text(&record.hit_rate(), &self.hit_rate) {
            bits.push(hit);
        }
        if bits.is_empty() {
            None
        } else {
            Some(format!("  • {}", bits.join(" • ")))
        }
    }

    /// The "Bet:" line, or `None` when the payload is absent or unreadable.
    pub fn deep_link_line(&self, record: &PickRecord) -> Option<String> {
        let links = deeplink::parse(record.deep_links.as_deref());
        deeplink::format_block(
            &links,
            &LinkOptions {
                priority: self.link_priority.as_slice(),
                max_books: self.max_books,
                jurisdiction: &self.jurisdiction,
                wager_amount: self.wager_amount,
            },
        )
    }
}

fn with_market(main: String, market: &str) -> String {
    if market.is_empty() {
        main
    } else {
        format!("{main} ({market})")
    }
}

/// Render a line without a trailing `.0`.
pub fn format_line(line: f64) -> String {
    line.to_string()
}

/// Render a spread line with an explicit sign on positive values.
pub fn format_signed_line(line: f64) -> String {
    if line > 0.0 {
        format!("+{line}")
    } else {
        line.to_string()
    }
}

/// Render American odds with an explicit sign on underdog prices.
pub fn format_odds(odds: AmericanOdds) -> String {
    if odds > 0 {
        format!("+{odds}")
    } else {
        odds.to_string()
    }
}

/// Hit-rate annotation.
///
/// Omitted when there is no sample or the sample is inconsistent (negative
/// counts, wins above total). Small samples are flagged and show the raw
/// percentage; larger samples show the percentage under the display
/// ceiling, with the real counts alongside.
pub fn hit_rate_text(hit: &HitRate, config: &HitRateConfig) -> Option<String> {
    if !hit.has_sample() {
        return None;
    }
    let (Some(wins), Some(total)) = (hit.wins, hit.total) else {
        return None;
    };
    let (wins, total) = (wins.trunc() as i64, total.trunc() as i64);
    if wins < 0 || total < 0 || wins > total {
        debug!(wins, total, "dropping inconsistent hit-rate sample");
        return None;
    }
    let pct = hit.percentage.map(|p| p.trunc() as i64);

    if total < i64::from(config.small_sample_threshold) {
        return Some(match pct {
            Some(pct) => format!("hit rate: {pct}% ({wins}/{total}) • small sample"),
            None => format!("hit rate: ({wins}/{total}) • small sample"),
        });
    }
    let shown = pct.map(|p| p.min(i64::from(config.display_ceiling)));
    Some(match shown {
        Some(pct) => format!("hit rate: {pct}% ({wins}/{total})"),
        None => format!("hit rate: ({wins}/{total})"),
    })
}
