use chrono::NaiveDate;
use proptest::prelude::*;

use super::*;
use crate::models::{LegalStatus, UNCLASSIFIED_DOMAIN};

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn create_patent(id: &str, domain: &str, filed: Option<(i32, u32, u32)>, value: f64) -> Patent {
    Patent {
        id: id.to_string(),
        patent_number: format!("US-{}", id),
        title: String::new(),
        assignee: "Acme".to_string(),
        portfolio_id: None,
        technology_domains: if domain.is_empty() {
            Vec::new()
        } else {
            vec![domain.to_string()]
        },
        legal_status: LegalStatus::Granted,
        filing_date: filed.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        value_score: value,
        molecule_ids: Vec::new(),
    }
}

fn domain_patents(prefix: &str, domains: &[&str]) -> Vec<Patent> {
    domains
        .iter()
        .enumerate()
        .map(|(i, d)| create_patent(&format!("{}{}", prefix, i), d, Some((2014, 1, 1)), 1.0))
        .collect()
}

#[test]
fn test_recency_weight() {
    assert_eq!(recency_weight(Some(0.0)), 2.0);
    assert_eq!(recency_weight(Some(10.0)), 1.5);
    assert_eq!(recency_weight(Some(20.0)), 1.0);
    assert_eq!(recency_weight(Some(35.0)), 1.0);
    assert_eq!(recency_weight(None), 1.0);
}

#[test]
fn test_overlap_intensity() {
    assert_eq!(overlap_intensity(3, 3), 1.0);
    assert!((overlap_intensity(2, 1) - 2.0 / 3.0).abs() < 1e-12);
    assert!((overlap_intensity(9, 1) - 0.2).abs() < 1e-12);
}

#[test]
fn test_exclusive_strength_treats_non_positive_value_as_one() {
    let old = create_patent("a", "A61K", Some((1990, 1, 1)), 0.0);
    let also_old = create_patent("b", "A61K", Some((1995, 6, 1)), -4.0);
    let strength = exclusive_strength(&[&old, &also_old], as_of());
    assert!((strength - (1.0 + 3f64.ln())).abs() < 1e-12);
}

#[test]
fn test_exclusive_strength_rewards_recent_filings() {
    let recent = create_patent("a", "A61K", Some((2024, 1, 1)), 2.0);
    let strength = exclusive_strength(&[&recent], as_of());
    assert!((strength - 4.0 * (1.0 + 2f64.ln())).abs() < 1e-12);
}

#[test]
fn test_documented_scenario() {
    let own = domain_patents("o", &["A61K", "A61K", "C07D"]);
    let competitor = domain_patents("c", &["A61K", "G16B", "G16B"]);

    let result = compare_portfolios(&own, &competitor, as_of());

    assert_eq!(result.overlap_zones.len(), 1);
    let overlap = &result.overlap_zones[0];
    assert_eq!(overlap.technology_domain, "A61K");
    assert_eq!(overlap.own_count, 2);
    assert_eq!(overlap.competitor_count, 1);
    assert!((overlap.intensity - 0.667).abs() < 1e-3);

    assert_eq!(result.own_exclusive_zones.len(), 1);
    assert_eq!(result.own_exclusive_zones[0].technology_domain, "C07D");
    assert_eq!(result.own_exclusive_zones[0].patent_count, 1);

    assert_eq!(result.competitor_exclusive_zones.len(), 1);
    assert_eq!(result.competitor_exclusive_zones[0].technology_domain, "G16B");
    assert_eq!(result.competitor_exclusive_zones[0].patent_count, 2);

    assert!(result.strength_index > 0.0);
    assert_eq!(result.summary.strength_index, result.strength_index);
    assert_eq!(result.summary.overlap_zone_count, 1);
    assert_eq!(result.summary.own_patent_count, 3);
    assert_eq!(result.summary.competitor_patent_count, 3);
}

#[test]
fn test_self_comparison_is_neutral() {
    let own = domain_patents("o", &["A61K", "C07D", "C07D", ""]);
    let result = compare_portfolios(&own, &own, as_of());

    assert_eq!(result.strength_index, 0.0);
    assert_eq!(result.summary.advantage, StrengthAdvantage::Neutral);
    assert!(result.own_exclusive_zones.is_empty());
    assert!(result.competitor_exclusive_zones.is_empty());
    assert!(result.overlap_zones.iter().all(|z| z.intensity == 1.0));
}

#[test]
fn test_empty_domain_is_unclassified() {
    let own = domain_patents("o", &[""]);
    let result = compare_portfolios(&own, &[], as_of());
    assert_eq!(result.own_exclusive_zones[0].technology_domain, UNCLASSIFIED_DOMAIN);
}

#[test]
fn test_dominant_competitor() {
    let own = domain_patents("o", &["A61K"]);
    let competitor = domain_patents("c", &["A61K", "A61K", "A61K", "C07D", "C07D"]);
    let result = compare_portfolios(&own, &competitor, as_of());
    assert!(result.strength_index < -ADVANTAGE_THRESHOLD);
    assert_eq!(result.summary.advantage, StrengthAdvantage::Competitor);
}

#[test]
fn test_both_empty() {
    let result = compare_portfolios(&[], &[], as_of());
    assert_eq!(result.strength_index, 0.0);
    assert_eq!(result.summary.advantage, StrengthAdvantage::Neutral);
    assert!(result.overlap_zones.is_empty());
}

#[test]
fn test_zones_are_sorted_by_domain() {
    let own = domain_patents("o", &["G16B", "A61K", "C07D"]);
    let result = compare_portfolios(&own, &[], as_of());
    let domains: Vec<&str> = result
        .own_exclusive_zones
        .iter()
        .map(|z| z.technology_domain.as_str())
        .collect();
    assert_eq!(domains, vec!["A61K", "C07D", "G16B"]);
}

fn arb_patents(prefix: &'static str) -> impl Strategy<Value = Vec<Patent>> {
    prop::collection::vec(
        (
            prop::sample::select(vec!["A61K", "C07D", "G16B", ""]),
            1990i32..2024,
            -5.0..50.0f64,
        ),
        0..12,
    )
    .prop_map(move |items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, (domain, year, value))| {
                create_patent(&format!("{}{}", prefix, i), domain, Some((year, 6, 1)), value)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_strength_index_is_bounded(own in arb_patents("o"), competitor in arb_patents("c")) {
        let result = compare_portfolios(&own, &competitor, as_of());
        prop_assert!(result.strength_index >= -1.0 && result.strength_index <= 1.0);
        for zone in &result.overlap_zones {
            prop_assert!(zone.intensity > 0.0 && zone.intensity <= 1.0);
        }
        for zone in result.own_exclusive_zones.iter().chain(&result.competitor_exclusive_zones) {
            prop_assert!(zone.strength >= 0.0);
        }
    }
}
