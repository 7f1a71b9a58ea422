use chrono::NaiveDate;

use crate::api::{DomainDistribution, DomainDistributionEntry, PortfolioId};
use crate::models::Patent;
use crate::services::geometry::group_by_key;

/// Share of `part` in `total` as a percentage; 0 when the total is 0.
fn percentage(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total * 100.0
    } else {
        0.0
    }
}

/// Mean age of the patents that carry a filing date; 0 if none does.
fn average_age(patents: &[&Patent], as_of: NaiveDate) -> f64 {
    let ages: Vec<f64> = patents.iter().filter_map(|p| p.age_years(as_of)).collect();
    if ages.is_empty() {
        return 0.0;
    }
    ages.iter().sum::<f64>() / ages.len() as f64
}

/// Per-domain patent counts and value shares, keyed by primary domain.
///
/// Entries are sorted by patent count descending, then domain ascending.
/// Negative value scores contribute nothing to value sums.
pub fn compute_domain_distribution(
    portfolio_id: PortfolioId,
    patents: &[Patent],
    as_of: NaiveDate,
) -> DomainDistribution {
    let total_patents = patents.len();
    let total_value: f64 = patents.iter().map(|p| p.value_score.max(0.0)).sum();

    let mut domains: Vec<DomainDistributionEntry> =
        group_by_key(patents, |p| p.primary_domain().to_string())
            .into_iter()
            .map(|(domain, members)| {
                let value_sum: f64 = members.iter().map(|p| p.value_score.max(0.0)).sum();
                DomainDistributionEntry {
                    patent_count: members.len(),
                    percentage: percentage(members.len() as f64, total_patents as f64),
                    value_sum,
                    value_percentage: percentage(value_sum, total_value),
                    average_age_years: average_age(&members, as_of),
                    domain,
                }
            })
            .collect();

    domains.sort_by(|a, b| {
        b.patent_count
            .cmp(&a.patent_count)
            .then_with(|| a.domain.cmp(&b.domain))
    });

    DomainDistribution {
        portfolio_id,
        total_patents,
        total_value,
        domains,
    }
}
