//! Deep-link resolution.
//!
//! The feed ships each pick's deep links as a JSON document inside a string:
//! `{"DraftKings": "https://.../{state}/...", ...}`. This module parses that
//! payload, orders books by display priority, fills URL placeholders and
//! renders the "Bet:" line.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

/// Book id (lowercase) -> URL template.
///
/// Ordered by book id, which gives non-priority books a stable position.
pub type DeepLinkSet = BTreeMap<String, String>;

const STATE_TOKEN: &str = "{state}";
const WAGER_TOKEN: &str = "{wagerAmount}";

/// Parse a raw payload. Anything unparseable yields an empty set.
pub fn parse(raw_payload: Option<&str>) -> DeepLinkSet {
    let Some(raw) = raw_payload.map(str::trim).filter(|s| !s.is_empty()) else {
        return DeepLinkSet::new();
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map
            .into_iter()
            .filter_map(|(book, url)| match url {
                Value::String(url) if !url.is_empty() => Some((book.to_lowercase(), url)),
                _ => None,
            })
            .collect(),
        Ok(other) => {
            debug!(kind = json_kind(&other), "deep-link payload is not an object");
            DeepLinkSet::new()
        }
        Err(e) => {
            debug!(error = %e, "unparseable deep-link payload");
            DeepLinkSet::new()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Priority books first (in priority order), then the rest, capped.
pub fn order_and_cap<'a, S: AsRef<str>>(
    links: &'a DeepLinkSet,
    priority: &[S],
    max_books: usize,
) -> Vec<(&'a str, &'a str)> {
    let mut ordered: Vec<(&str, &str)> = Vec::with_capacity(links.len());
    for book in priority {
        if let Some((book, url)) = links.get_key_value(book.as_ref()) {
            if !ordered.iter().any(|(seen, _)| *seen == book.as_str()) {
                ordered.push((book.as_str(), url.as_str()));
            }
        }
    }
    for (book, url) in links {
        if !ordered.iter().any(|(seen, _)| *seen == book.as_str()) {
            ordered.push((book.as_str(), url.as_str()));
        }
    }
    ordered.truncate(max_books);
    ordered
}

/// The single best link by priority, falling back to the first available.
pub fn best_link<'a, S: AsRef<str>>(
    links: &'a DeepLinkSet,
    priority: &[S],
) -> Option<(&'a str, &'a str)> {
    order_and_cap(links, priority, 1).into_iter().next()
}

/// Fill `{state}` and, when given, `{wagerAmount}`.
pub fn substitute(url: &str, jurisdiction: &str, wager_amount: Option<u32>) -> String {
    let url = url.replace(STATE_TOKEN, jurisdiction);
    match wager_amount {
        Some(amount) => url.replace(WAGER_TOKEN, &amount.to_string()),
        None => url,
    }
}

/// Options for rendering a "Bet:" line.
#[derive(Debug, Clone, Copy)]
pub struct LinkOptions<'a, S> {
    pub priority: &'a [S],
    pub max_books: usize,
    pub jurisdiction: &'a str,
    pub wager_amount: Option<u32>,
}

/// Render `Bet: [Book](url) · [Book](url)`, or `None` when nothing to show.
pub fn format_block<S: AsRef<str>>(links: &DeepLinkSet, opts: &LinkOptions<'_, S>) -> Option<String> {
    let parts: Vec<String> = order_and_cap(links, opts.priority, opts.max_books)
        .into_iter()
        .map(|(book, url)| {
            format!(
                "[{}]({})",
                title_case(book),
                substitute(url, opts.jurisdiction, opts.wager_amount)
            )
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(format!("Bet: {}", parts.join(" · ")))
    }
}

/// Capitalize the first letter of each alphabetic run: `bet365_us` -> `Bet365_Us`.
pub fn title_case(book: &str) -> String {
    let mut out = String::with_capacity(book.len());
    let mut prev_alpha = false;
    for c in book.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
