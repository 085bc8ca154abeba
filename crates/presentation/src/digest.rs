//! Single-message digest rendering for chat delivery.

use picks_core::FormattedPick;

use crate::aggregator::Aggregation;

const NO_PICKS: &str = "No picks available.";

/// Render an aggregation as one markdown message.
///
/// Chunking to the transport's size limit is the caller's job.
pub fn render_digest(title: &str, aggregation: &Aggregation) -> String {
    let mut msg = format!("**{title}**\n");
    if aggregation.is_empty() {
        msg.push_str(NO_PICKS);
        return msg;
    }
    for section in &aggregation.sections {
        msg.push_str(&format!("\n__**{}**__\n", section.label));
        for pick in &section.picks {
            msg.push_str(&format!("• {}\n", digest_line(pick)));
        }
    }
    msg
}

fn digest_line(pick: &FormattedPick) -> String {
    let mut line = format!("**{}**", pick.header);
    if let Some(details) = &pick.details {
        line.push('\n');
        line.push_str(details);
    }
    if let Some(links) = &pick.deep_links {
        line.push_str(" • ");
        line.push_str(links);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use picks_core::{FormattedSection, PickCategory};

    fn make_aggregation(picks: Vec<FormattedPick>) -> Aggregation {
        let mut section = FormattedSection::new(PickCategory::Totals);
        section.picks = picks;
        Aggregation {
            sections: vec![section],
            feed_size: 1,
            unique_picks: 1,
        }
    }

    #[test]
    fn test_empty_digest() {
        let empty = Aggregation {
            sections: Vec::new(),
            feed_size: 0,
            unique_picks: 0,
        };
        assert_eq!(render_digest("NBA", &empty), "**NBA**\nNo picks available.");
    }

    #[test]
    fn test_digest_layout() {
        let agg = make_aggregation(vec![FormattedPick {
            header: "MIL @ CLE — Under 236.5 (Alternate Game Total)".into(),
            details: Some("  • odds: -110".into()),
            deep_links: Some("Bet: [Fanduel](https://fd)".into()),
        }]);
        assert_eq!(
            render_digest("NBA", &agg),
            "**NBA**\n\n__**🔥 Totals Picks**__\n\
             • **MIL @ CLE — Under 236.5 (Alternate Game Total)**\n  • odds: -110 • Bet: [Fanduel](https://fd)\n"
        );
    }

    #[test]
    fn test_digest_header_only() {
        let agg = make_aggregation(vec![FormattedPick {
            header: "A @ B — Pick".into(),
            details: None,
            deep_links: None,
        }]);
        assert!(render_digest("T", &agg).ends_with("• **A @ B — Pick**\n"));
    }
}
