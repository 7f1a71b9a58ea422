//! Shared fixtures for service unit tests.

use crate::api::ConstellationPoint;
use crate::models::{LegalStatus, PointType};

pub(crate) fn point(id: &str, x: f64, y: f64, domain: &str) -> ConstellationPoint {
    ConstellationPoint {
        id: id.to_string(),
        patent_number: Some(format!("US-{}", id)),
        molecule_id: Some(format!("m-{}", id)),
        smiles: None,
        x,
        y,
        z: None,
        technology_domain: domain.to_string(),
        legal_status: LegalStatus::Granted,
        assignee: "Acme".to_string(),
        filing_year: Some(2020),
        value_score: 1.0,
        point_type: PointType::OwnPatent,
    }
}

/// `count` points spread on a small ring around `(cx, cy)`.
pub(crate) fn blob(prefix: &str, cx: f64, cy: f64, count: usize, domain: &str) -> Vec<ConstellationPoint> {
    (0..count)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::TAU / count as f64;
            point(
                &format!("{}{}", prefix, i),
                cx + 0.2 * angle.cos(),
                cy + 0.2 * angle.sin(),
                domain,
            )
        })
        .collect()
}
