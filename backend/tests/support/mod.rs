#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use patent_constellation::api::PortfolioId;
use patent_constellation::db::LocalRepository;
use patent_constellation::inference::StubInferenceEngine;
use patent_constellation::models::{LegalStatus, Molecule, Patent, Portfolio};
use patent_constellation::services::ConstellationService;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars so parallel tests do not interfere.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK poisoned");
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

pub const OWN_ASSIGNEE: &str = "Acme Pharma";
pub const COMPETITOR: &str = "Globex";

pub fn patent(
    id: &str,
    portfolio: Option<PortfolioId>,
    assignee: &str,
    domain: &str,
    year: i32,
    value: f64,
    molecules: &[&str],
) -> Patent {
    Patent {
        id: id.to_string(),
        patent_number: format!("US-{}", id),
        title: format!("Patent {}", id),
        assignee: assignee.to_string(),
        portfolio_id: portfolio,
        technology_domains: vec![domain.to_string()],
        legal_status: LegalStatus::Granted,
        filing_date: NaiveDate::from_ymd_opt(year, 3, 1),
        value_score: value,
        molecule_ids: molecules.iter().map(|m| m.to_string()).collect(),
    }
}

/// A portfolio with twelve molecules over three domains, a competitor with
/// three patents, and an empty second portfolio.
pub struct Fixture {
    pub repo: LocalRepository,
    pub portfolio: PortfolioId,
    pub empty_portfolio: PortfolioId,
}

pub fn fixture() -> Fixture {
    let repo = LocalRepository::new();
    let portfolio = PortfolioId::new(uuid::Uuid::new_v4());
    let empty_portfolio = PortfolioId::new(uuid::Uuid::new_v4());
    repo.add_portfolio(Portfolio {
        id: portfolio,
        name: "Acme oncology".to_string(),
        owner: OWN_ASSIGNEE.to_string(),
    });
    repo.add_portfolio(Portfolio {
        id: empty_portfolio,
        name: "Acme empty".to_string(),
        owner: OWN_ASSIGNEE.to_string(),
    });

    let smiles = [
        "CCO", "CCN", "CCC", "CCCC", "c1ccccc1", "c1ccncc1", "CC(=O)O", "CC(=O)N", "COC",
        "CCOC", "N#N", "O=C=O",
    ];
    for (i, s) in smiles.iter().enumerate() {
        repo.add_molecule(Molecule {
            id: format!("m{:02}", i),
            smiles: Some(s.to_string()),
            name: None,
        });
    }

    let own: [(&str, &str, i32, f64, &[&str]); 7] = [
        ("p1", "A61K", 2016, 3.0, &["m00", "m01"]),
        ("p2", "A61K", 2018, 2.0, &["m02", "m03"]),
        ("p3", "A61K", 2021, 4.0, &["m04"]),
        ("p4", "C07D", 2012, 1.5, &["m05", "m06"]),
        ("p5", "C07D", 2019, 2.5, &["m07", "m08"]),
        ("p6", "G16B", 2020, 1.0, &["m09", "m10"]),
        ("p7", "A61K", 2022, 0.0, &["m11", "m00"]),
    ];
    for (id, domain, year, value, molecules) in own {
        repo.add_patent(patent(id, Some(portfolio), OWN_ASSIGNEE, domain, year, value, molecules));
    }

    for (id, domain) in [("c1", "A61K"), ("c2", "B01J"), ("c3", "B01J")] {
        repo.add_patent(patent(id, None, COMPETITOR, domain, 2019, 2.0, &["m01"]));
    }

    Fixture {
        repo,
        portfolio,
        empty_portfolio,
    }
}

pub fn service(repo: &LocalRepository) -> ConstellationService {
    ConstellationService::new(
        Arc::new(repo.clone()),
        Arc::new(StubInferenceEngine::default()),
    )
}
