//! Canonical sportsbook identifiers.
//!
//! Normalizes user-supplied book names to the slugs the upstream feed
//! expects, validates requested lists, and orders books so those we can
//! deep link come first.

use std::collections::HashSet;
use std::sync::OnceLock;

use picks_core::config::{BookConfig, DEFAULT_DEEP_LINK_PRIORITY};

/// Every slug the upstream feed understands.
const BOOKS_ALL: &[&str] = &[
    "betopenly", "betonlineag", "betmgm", "betrivers", "betus", "bovada", "williamhill_us",
    "draftkings", "fanduel", "lowvig", "mybookieag", "ballybet", "betanysports", "betparx",
    "espnbet", "fliff", "hardrockbet", "windcreek", "prizepicks", "underdog", "onexbet",
    "sport888", "betclic", "betfair_ex_eu", "betsson", "betvictor", "coolbet", "everygame",
    "gtbets", "livescorebet_eu", "marathonbet", "matchbook", "nordicbet", "pinnacle",
    "suprabets", "tipico_de", "unibet_eu", "williamhill", "betfair_ex_uk", "betfair_sb_uk",
    "betway", "boylesports", "casumo", "coral", "grosvenor", "ladbrokes_uk", "leovegas",
    "livescorebet", "paddypower", "skybet", "smarkets", "unibet_uk", "virginbet",
    "betfair_ex_au", "betr_au", "betright", "ladbrokes_au", "neds", "playup", "pointsbetau",
    "sportsbet", "tab", "tabtouch", "topsport", "unibet", "fanatics", "bet365_us", "novig",
    "prophetx", "wynnbet", "superbook",
];

/// Books whose slips can be pre-filled from a link.
const BOOKS_WITH_DEEPLINKS: &[&str] = &[
    "betmgm", "betrivers", "draftkings", "fanduel", "ballybet", "espnbet", "hardrockbet",
    "prizepicks", "underdog", "fanatics", "novig", "prophetx",
];

/// US regional preset. May name brands; resolved through `normalize`.
const BOOKS_US: &[&str] = &[
    "draftkings", "fanduel", "betmgm", "caesars", "espnbet", "betrivers", "hardrockbet",
    "betparx", "fanatics", "bet365_us", "wynnbet", "superbook", "novig", "prophetx",
];

/// Shorthand and brand names, keyed by their compacted form.
const ALIASES: &[(&str, &str)] = &[
    ("dk", "draftkings"),
    ("fd", "fanduel"),
    ("mgm", "betmgm"),
    ("espn", "espnbet"),
    ("bet365", "bet365_us"),
    ("prizepicks", "prizepicks"),
    ("caesars", "williamhill_us"),
];

/// Returned by `validate` when nothing usable was requested.
const DEFAULT_BOOKS: [&str; 3] = ["draftkings", "fanduel", "betmgm"];

/// Read-only book tables, built once per process.
#[derive(Debug)]
pub struct BookRegistry {
    /// Compacted form -> canonical slug.
    lookup: Vec<(String, &'static str)>,
    deep_linkable: HashSet<&'static str>,
}

impl BookRegistry {
    fn build() -> Self {
        let mut lookup: Vec<(String, &'static str)> =
            BOOKS_ALL.iter().map(|b| (compact(b), *b)).collect();
        lookup.extend(ALIASES.iter().map(|(alias, book)| (compact(alias), *book)));
        Self {
            lookup,
            deep_linkable: BOOKS_WITH_DEEPLINKS.iter().copied().collect(),
        }
    }

    /// The process-wide registry.
    pub fn standard() -> &'static BookRegistry {
        static REGISTRY: OnceLock<BookRegistry> = OnceLock::new();
        REGISTRY.get_or_init(BookRegistry::build)
    }

    /// Canonical slug for a raw name, or "" if unknown.
    ///
    /// Case, spaces, hyphens and underscores are ignored, so "Draft Kings",
    /// "DK" and "william-hill-us" all resolve.
    pub fn normalize(&self, raw_name: &str) -> &'static str {
        let key = compact(raw_name);
        if key.is_empty() {
            return "";
        }
        self.lookup
            .iter()
            .find(|(compacted, _)| *compacted == key)
            .map(|(_, book)| *book)
            .unwrap_or("")
    }

    /// Whether a canonical slug supports deep links.
    pub fn is_deep_linkable(&self, book: &str) -> bool {
        self.deep_linkable.contains(book)
    }

    /// Keep recognized books (first occurrence wins). Never returns empty:
    /// falls back to `fallback`, then to the default trio.
    pub fn validate(&self, selected: &[String], fallback: Option<&[String]>) -> Vec<String> {
        let mut seen = HashSet::new();
        let cleaned: Vec<String> = selected
            .iter()
            .map(|b| self.normalize(b))
            .filter(|b| !b.is_empty() && seen.insert(*b))
            .map(str::to_string)
            .collect();
        if !cleaned.is_empty() {
            return cleaned;
        }
        match fallback {
            Some(books) if !books.is_empty() => books.to_vec(),
            _ => DEFAULT_BOOKS.iter().map(|b| b.to_string()).collect(),
        }
    }

    /// Stable reorder putting deep-linkable books first, optionally capped.
    pub fn prioritize(&self, books: &[String], max_n: Option<usize>) -> Vec<String> {
        let mut ordered = books.to_vec();
        ordered.sort_by_key(|b| !self.is_deep_linkable(b));
        if let Some(n) = max_n {
            ordered.truncate(n);
        }
        ordered
    }

    /// The US regional preset as canonical slugs.
    pub fn us_books(&self) -> Vec<String> {
        let preset: Vec<String> = BOOKS_US.iter().map(|b| b.to_string()).collect();
        self.validate(&preset, None)
    }

    /// Default display priority for deep links.
    pub fn deep_link_priority(&self) -> &'static [&'static str] {
        DEFAULT_DEEP_LINK_PRIORITY
    }

    /// The book list to request upstream for a configuration.
    pub fn requested_books(&self, config: &BookConfig) -> Vec<String> {
        let books = self.validate(&config.requested, None);
        self.prioritize(&books, Some(config.max_books).filter(|n| *n > 0))
    }
}

fn compact(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Canonical slug for a raw name using the standard registry.
pub fn normalize(raw_name: &str) -> &'static str {
    BookRegistry::standard().normalize(raw_name)
}

/// Validate a requested list using the standard registry.
pub fn validate(selected: &[String], fallback: Option<&[String]>) -> Vec<String> {
    BookRegistry::standard().validate(selected, fallback)
}

/// Deep-linkable-first ordering using the standard registry.
pub fn prioritize(books: &[String], max_n: Option<usize>) -> Vec<String> {
    BookRegistry::standard().prioritize(books, max_n)
}
