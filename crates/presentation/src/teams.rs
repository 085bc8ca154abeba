//! Team name to abbreviation lookup.

use std::collections::HashMap;
use std::sync::OnceLock;

const NBA_TEAMS: &[(&str, &str)] = &[
    ("ATL", "Atlanta Hawks"),
    ("BOS", "Boston Celtics"),
    ("BKN", "Brooklyn Nets"),
    ("CHA", "Charlotte Hornets"),
    ("CHI", "Chicago Bulls"),
    ("CLE", "Cleveland Cavaliers"),
    ("DAL", "Dallas Mavericks"),
    ("DEN", "Denver Nuggets"),
    ("DET", "Detroit Pistons"),
    ("GSW", "Golden State Warriors"),
    ("HOU", "Houston Rockets"),
    ("IND", "Indiana Pacers"),
    ("LAC", "Los Angeles Clippers"),
    ("LAL", "Los Angeles Lakers"),
    ("MEM", "Memphis Grizzlies"),
    ("MIA", "Miami Heat"),
    ("MIL", "Milwaukee Bucks"),
    ("MIN", "Minnesota Timberwolves"),
    ("NOP", "New Orleans Pelicans"),
    ("NYK", "New York Knicks"),
    ("OKC", "Oklahoma City Thunder"),
    ("ORL", "Orlando Magic"),
    ("PHI", "Philadelphia 76ers"),
    ("PHO", "Phoenix Suns"),
    ("POR", "Portland Trail Blazers"),
    ("SAC", "Sacramento Kings"),
    ("SAS", "San Antonio Spurs"),
    ("TOR", "Toronto Raptors"),
    ("UTA", "Utah Jazz"),
    ("WAS", "Washington Wizards"),
];

/// Read-only league directory.
#[derive(Debug)]
pub struct TeamDirectory {
    teams: &'static [(&'static str, &'static str)],
    by_name: HashMap<String, &'static str>,
}

impl TeamDirectory {
    /// Directory over an `(abbreviation, full name)` table.
    pub fn new(teams: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            teams,
            by_name: teams.iter().map(|(abbr, name)| (name.to_lowercase(), *abbr)).collect(),
        }
    }

    /// The NBA directory.
    pub fn nba() -> &'static TeamDirectory {
        static NBA: OnceLock<TeamDirectory> = OnceLock::new();
        NBA.get_or_init(|| TeamDirectory::new(NBA_TEAMS))
    }

    /// Abbreviation for an exact full name or abbreviation, any case.
    pub fn exact(&self, text: &str) -> Option<&'static str> {
        let text = text.trim();
        if let Some(abbr) = self.by_name.get(&text.to_lowercase()).copied() {
            return Some(abbr);
        }
        let upper = text.to_uppercase();
        self.teams.iter().map(|(abbr, _)| *abbr).find(|abbr| *abbr == upper)
    }

    /// First team whose full name appears in `text`, or whose abbreviation
    /// appears as an upper-case word.
    pub fn mentioned_in(&self, text: &str) -> Option<&'static str> {
        if text.is_empty() {
            return None;
        }
        let lower = text.to_lowercase();
        let words: Vec<&str> = text.split(|c: char| !c.is_ascii_alphanumeric()).collect();
        self.teams
            .iter()
            .find(|(abbr, name)| lower.contains(&name.to_lowercase()) || words.contains(abbr))
            .map(|(abbr, _)| *abbr)
    }

    /// Resolve the team a pick is on: the outcome name first, then a
    /// mention in the description, then in the market label.
    pub fn resolve(&self, outcome_name: &str, description: &str, market: &str) -> Option<&'static str> {
        self.exact(outcome_name)
            .or_else(|| self.mentioned_in(description))
            .or_else(|| self.mentioned_in(market))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact() {
        let nba = TeamDirectory::nba();
        assert_eq!(nba.exact("Utah Jazz"), Some("UTA"));
        assert_eq!(nba.exact("utah jazz"), Some("UTA"));
        assert_eq!(nba.exact("nyk"), Some("NYK"));
        assert_eq!(nba.exact("Over"), None);
        assert_eq!(nba.exact(""), None);
    }

    #[test]
    fn test_mentioned_in() {
        let nba = TeamDirectory::nba();
        assert_eq!(nba.mentioned_in("Utah Jazz Team Total"), Some("UTA"));
        assert_eq!(nba.mentioned_in("Alternate Spread"), None);
        assert_eq!(nba.mentioned_in("GSW Team Total"), Some("GSW"));
        assert_eq!(nba.mentioned_in("Kansas City Chiefs"), None);
        assert_eq!(nba.mentioned_in("Was Over"), None);
        assert_eq!(nba.mentioned_in(""), None);
    }

    #[test]
    fn test_custom_table() {
        static NFL: &[(&str, &str)] = &[("KC", "Kansas City Chiefs"), ("BUF", "Buffalo Bills")];
        let nfl = TeamDirectory::new(NFL);
        assert_eq!(nfl.exact("kansas city chiefs"), Some("KC"));
        assert_eq!(nfl.mentioned_in("Buffalo Bills Team Total"), Some("BUF"));
        assert_eq!(nfl.exact("Utah Jazz"), None);
    }

    #[test]
    fn test_resolve_order() {
        let nba = TeamDirectory::nba();
        assert_eq!(nba.resolve("Boston Celtics", "Utah Jazz", ""), Some("BOS"));
        assert_eq!(nba.resolve("Over", "Utah Jazz", "Boston Celtics Total"), Some("UTA"));
        assert_eq!(nba.resolve("Over", "", "Boston Celtics Total"), Some("BOS"));
        assert_eq!(nba.resolve("Over", "", "Alternate Team Total"), None);
    }
}
