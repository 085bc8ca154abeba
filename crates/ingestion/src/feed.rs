//! Reading the upstream feed envelope.
//!
//! The fetch layer hands us `{"data": {"picks": [...]}}`. Any deviation from
//! that shape degrades to fewer (or zero) records; only text that is not
//! JSON at all is reported as an error.

use picks_core::{PickRecord, Result};
use serde_json::Value;
use tracing::debug;

/// Extract pick records from a parsed feed.
pub fn read_feed(raw_feed: &Value) -> Vec<PickRecord> {
    let Some(picks) = raw_feed.get("data").and_then(|d| d.get("picks")) else {
        debug!("feed has no data.picks");
        return Vec::new();
    };
    let Some(items) = picks.as_array() else {
        debug!("feed data.picks is not an array");
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            if !item.is_object() {
                debug!(index, "skipping non-object pick entry");
                return None;
            }
            match serde_json::from_value::<PickRecord>(item.clone()) {
                Ok(record) => Some(record),
                Err(e) => {
                    debug!(index, error = %e, "skipping unreadable pick entry");
                    None
                }
            }
        })
        .collect()
}

/// Parse feed text and extract its pick records.
pub fn parse_feed(raw: &str) -> Result<Vec<PickRecord>> {
    let value: Value = serde_json::from_str(raw)?;
    Ok(read_feed(&value))
}
