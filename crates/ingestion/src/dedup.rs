//! Exact-duplicate removal by pick identity.

use std::collections::HashSet;

use picks_core::{PickIdentity, PickRecord};

/// Keep the first record of each identity, in input order, up to `max_out`.
///
/// Pass the input length as `max_out` for a complete dedupe.
pub fn dedupe<'a, I>(records: I, max_out: usize) -> Vec<&'a PickRecord>
where
    I: IntoIterator<Item = &'a PickRecord>,
{
    let mut seen: HashSet<PickIdentity> = HashSet::new();
    let mut out = Vec::new();
    if max_out == 0 {
        return out;
    }
    for record in records {
        if !seen.insert(record.identity()) {
            continue;
        }
        out.push(record);
        if out.len() >= max_out {
            break;
        }
    }
    out
}
