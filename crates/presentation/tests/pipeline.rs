//! End-to-end behaviour of the aggregation pipeline on realistic feeds.

use std::collections::HashSet;

use picks_books::deeplink;
use picks_core::config::Config;
use picks_core::PickCategory;
use picks_ingestion::{dedupe, read_feed};
use picks_presentation::selector::{game_key, PlayerKey};
use picks_presentation::{aggregate_with, render_digest, select, Aggregator, LineFormatter};
use serde_json::{json, Value};

fn prop(player: &str, line: f64, pct: f64, odds: i64) -> Value {
    json!({
        "home_team": "Detroit Pistons",
        "away_team": "Indiana Pacers",
        "home_team_abbreviation": "DET",
        "away_team_abbreviation": "IND",
        "market": "Player Points + Assists",
        "outcome_name": "Under",
        "outcome_description": player,
        "outcome_point": line,
        "bestOdds": odds,
        "hit_rate_wins": 8,
        "hit_rate_total": 10,
        "hit_rate_percentage": pct,
        "deepLinks": "{\"DraftKings\": \"https://sportsbook.draftkings.com/{state}/slip\", \"Underdog\": \"https://underdog/{state}\", \"Novig\": \"https://novig\", \"FanDuel\": \"https://fd/{state}\"}"
    })
}

fn total(away: &str, home: &str, line: f64, pct: f64) -> Value {
    json!({
        "away_team_abbreviation": away,
        "home_team_abbreviation": home,
        "market": "Alternate Game Total",
        "outcome_name": "Under",
        "outcome_point": line,
        "bestOdds": -110,
        "hit_rate_wins": 30,
        "hit_rate_total": 40,
        "hit_rate_percentage": pct
    })
}

fn feed(picks: Vec<Value>) -> Value {
    json!({"data": {"picks": picks}})
}

fn sample_feed() -> Value {
    feed(vec![
        json!({
            "home_team": "Boston Celtics", "away_team": "New York Knicks",
            "home_team_abbreviation": "BOS", "away_team_abbreviation": "NYK",
            "market": "Alternate Spread", "outcome_name": "New York Knicks",
            "outcome_point": 5.5, "bestOdds": -105,
            "hit_rate_wins": 3, "hit_rate_total": 5, "hit_rate_percentage": 60,
            "deepLinks": "not-json"
        }),
        total("UTA", "GSW", 226.5, 58.0),
        total("UTA", "GSW", 230.5, 72.0),
        total("MIL", "CLE", 236.5, 61.0),
        total("MIL", "CLE", 232.5, 55.0),
        prop("T.J. McConnell", 14.5, 70.0, -110),
        prop("T.J. McConnell", 16.5, 55.0, -120),
        prop("Cade Cunningham", 34.5, 97.0, 105),
        json!({
            "away_team_abbreviation": "UTA", "home_team_abbreviation": "GSW",
            "market": "Moneyline", "outcome_name": "Utah Jazz", "bestOdds": 240
        }),
        json!({"market": "Double Chance", "outcome_name": "Draw"}),
        json!("garbage entry"),
    ])
}

#[test]
fn test_scenario_a_best_prop_per_player() {
    let records = read_feed(&feed(vec![
        prop("T.J. McConnell", 14.5, 70.0, -110),
        prop("T.J. McConnell", 16.5, 55.0, -120),
    ]));
    let refs: Vec<_> = records.iter().collect();
    let picked = select(PickCategory::PlayerProps, &refs, 3);
    assert_eq!(picked.len(), 1);
    assert_eq!(picked[0].hit_rate_percentage, Some(70.0));
    assert_eq!(picked[0].best_odds, Some(-110));
}

#[test]
fn test_scenario_b_one_total_per_game() {
    let records = read_feed(&feed(vec![
        total("UTA", "GSW", 226.5, 58.0),
        total("UTA", "GSW", 230.5, 72.0),
        total("MIL", "CLE", 236.5, 61.0),
        total("MIL", "CLE", 232.5, 55.0),
    ]));
    let refs: Vec<_> = records.iter().collect();
    let picked = select(PickCategory::Totals, &refs, 5);
    assert_eq!(picked.len(), 2);
    let lines: Vec<f64> = picked.iter().filter_map(|p| p.outcome_point).collect();
    assert_eq!(lines, vec![230.5, 236.5]);
}

#[test]
fn test_scenario_c_empty_feed() {
    let result = aggregate_with(&json!({"data": {"picks": []}}), 3, "ny").unwrap();
    assert!(result.sections.is_empty());
    assert!(result.is_empty_feed());
    assert_eq!(render_digest("NBA", &result), "**NBA**\nNo picks available.");
}

#[test]
fn test_scenario_d_bad_deep_links() {
    assert!(deeplink::parse(Some("{\"draftkings\": ")).is_empty());

    let records = read_feed(&sample_feed());
    let spread = &records[0];
    let formatted = LineFormatter::new(&Config::default()).format(spread);
    assert!(formatted.deep_links.is_none());
    assert_eq!(formatted.header, "NYK @ BOS — NYK +5.5 (Alternate Spread)");
    assert_eq!(
        formatted.details.as_deref(),
        Some("  • odds: -105 • hit rate: 60% (3/5) • small sample")
    );
}

#[test]
fn test_full_feed_sections() {
    let result = aggregate_with(&sample_feed(), 3, "nj").unwrap();
    assert_eq!(result.feed_size, 10);

    let order: Vec<PickCategory> = result.sections.iter().map(|s| s.category).collect();
    assert_eq!(order, PickCategory::ALL.to_vec());

    let totals = result.section(PickCategory::Totals).unwrap();
    assert_eq!(totals.picks.len(), 2);
    assert!(totals.picks[0].header.contains("230.5"));

    let props = result.section(PickCategory::PlayerProps).unwrap();
    assert_eq!(props.picks.len(), 2);
    let cade = &props.picks[0];
    assert_eq!(
        cade.header,
        "IND @ DET — Cade Cunningham Under 34.5 (Player Points + Assists)"
    );
    assert_eq!(cade.details.as_deref(), Some("  • odds: +105 • hit rate: 95% (8/10)"));
    assert_eq!(
        cade.deep_links.as_deref(),
        Some("Bet: [Underdog](https://underdog/nj) · [Novig](https://novig) · [Draftkings](https://sportsbook.draftkings.com/nj/slip)")
    );
}

#[test]
fn test_idempotent() {
    let aggregator = Aggregator::new(&Config::default()).unwrap();
    let feed = sample_feed();
    assert_eq!(aggregator.aggregate(&feed), aggregator.aggregate(&feed));
}

#[test]
fn test_cap_and_uniqueness_properties() {
    let mut picks = Vec::new();
    for i in 0..12 {
        picks.push(prop(&format!("Player {}", i % 4), 10.5 + i as f64, 50.0 + i as f64, -110));
        picks.push(total(&format!("A{}", i % 3), "HOM", 200.5 + i as f64, 40.0 + i as f64));
    }
    let records = read_feed(&feed(picks));
    let refs: Vec<_> = records.iter().collect();

    for cap in 1..6 {
        let props = select(PickCategory::PlayerProps, &refs, cap);
        assert!(props.len() <= cap);
        let keys: HashSet<PlayerKey> = props.iter().map(|p| PlayerKey::of(p)).collect();
        assert_eq!(keys.len(), props.len());

        let totals = select(PickCategory::Totals, &refs, cap);
        assert!(totals.len() <= cap);
        let games: HashSet<(String, String)> = totals.iter().map(|p| game_key(p)).collect();
        assert_eq!(games.len(), totals.len());
    }
}

#[test]
fn test_dedupe_keeps_first_seen() {
    let mut first = prop("A", 10.5, 60.0, -110);
    first["bestOdds"] = json!(-115);
    let records = read_feed(&feed(vec![first, prop("A", 10.5, 60.0, -110), prop("B", 10.5, 60.0, -110)]));
    let unique = dedupe(&records, records.len());
    assert_eq!(unique.len(), 2);
    assert_eq!(unique[0].best_odds, Some(-115));
}

#[test]
fn test_custom_config_flows_through() {
    let config = Config::from_json_str(
        r#"{
            "aggregation": {"max_per_group": 1, "jurisdiction": "pa", "wager_amount": 25},
            "deep_links": {"max_books": 1, "priority": ["fanduel"]},
            "hit_rate": {"display_ceiling": 100}
        }"#,
    )
    .unwrap();
    let result = Aggregator::new(&config).unwrap().aggregate(&sample_feed());
    assert!(result.sections.iter().all(|s| s.picks.len() == 1));

    let cade = &result.section(PickCategory::PlayerProps).unwrap().picks[0];
    assert!(cade.details.as_deref().unwrap().contains("97% (8/10)"));
    assert_eq!(cade.deep_links.as_deref(), Some("Bet: [Fanduel](https://fd/pa)"));
}
