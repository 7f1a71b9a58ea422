//! Constellation orchestration service.
//!
//! Validates requests, loads and filters patents, runs the embedding,
//! clustering, white-space and statistics stages in order, and manages cache
//! read-through/write-through. The comparison and heatmap paths read the same
//! patent data independently.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{NaiveDate, Utc};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::{
    CompareRequest, ComparisonResult, ConstellationRequest, ConstellationResponse,
    CoverageHeatmap, CoverageStatistics, DomainDistribution, PortfolioId,
};
use crate::cache::{constellation_cache_key, heatmap_cache_key, CacheStore, InMemoryCache};
use crate::config::ServiceConfig;
use crate::db::{FullRepository, PatentRepository};
use crate::error::{ConstellationError, ConstellationResult};
use crate::inference::{InferenceEngine, ReductionConfig, StubInferenceEngine};
use crate::models::{Patent, PointType};
use crate::services::clustering::detect_clusters;
use crate::services::compare::compare_portfolios;
use crate::services::distributions::compute_domain_distribution;
use crate::services::embedding::{build_constellation_points, resolve_reduction_config};
use crate::services::filters::{apply_filters, validate_filters};
use crate::services::heatmap::{generate_heatmap, HeatmapOptions};
use crate::services::statistics::compute_statistics;
use crate::services::white_space::detect_white_space;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

fn validate_portfolio_id(portfolio_id: PortfolioId) -> ConstellationResult<()> {
    if portfolio_id.is_nil() {
        return Err(ConstellationError::validation("portfolio_id must not be nil"));
    }
    Ok(())
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Entry point for the four constellation operations.
pub struct ConstellationService {
    repository: Arc<dyn FullRepository>,
    engine: Arc<dyn InferenceEngine>,
    cache: Option<Arc<dyn CacheStore>>,
    cache_ttl: Duration,
}

impl ConstellationService {
    /// Service without a cache.
    pub fn new(repository: Arc<dyn FullRepository>, engine: Arc<dyn InferenceEngine>) -> Self {
        Self {
            repository,
            engine,
            cache: None,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        self.cache = Some(cache);
        self.cache_ttl = ttl;
        self
    }

    /// Wire the stub inference engine and, if enabled, an in-memory cache
    /// according to `config`.
    pub fn from_config(config: &ServiceConfig, repository: Arc<dyn FullRepository>) -> Self {
        let engine = Arc::new(StubInferenceEngine::new(
            config.inference.model_id.clone(),
            config.inference.dimensions,
        ));
        let service = Self::new(repository, engine);
        if config.cache.enabled {
            service.with_cache(
                Arc::new(InMemoryCache::new(config.cache.max_entries)),
                config.cache_ttl(),
            )
        } else {
            service
        }
    }

    pub fn has_cache(&self) -> bool {
        self.cache.is_some()
    }

    /// Repository reachability.
    pub async fn health_check(&self) -> ConstellationResult<bool> {
        self.repository
            .health_check()
            .await
            .map_err(|e| ConstellationError::repository("health_check", e))
    }

    /// Generate the constellation map for a portfolio.
    pub async fn generate_constellation(
        &self,
        request: &ConstellationRequest,
    ) -> ConstellationResult<ConstellationResponse> {
        let started = Instant::now();
        validate_portfolio_id(request.portfolio_id)?;
        validate_filters(&request.filters)?;

        let reduction = resolve_reduction_config(&request.reduction);
        let cache_key = constellation_cache_key(
            request.portfolio_id,
            &request.filters,
            &reduction,
            request.include_white_space,
        );
        if let Some(cached) = self.cache_read::<ConstellationResponse>(&cache_key).await {
            debug!("Constellation cache hit for {}", request.portfolio_id);
            return Ok(cached);
        }

        let patents = self.load_portfolio_patents(request.portfolio_id).await?;
        let loaded = patents.len();
        let patents = apply_filters(patents, &request.filters);
        debug!(
            "Portfolio {}: {} of {} patents pass filters",
            request.portfolio_id,
            patents.len(),
            loaded
        );

        let response = if patents.is_empty() {
            ConstellationResponse {
                points: Vec::new(),
                clusters: Vec::new(),
                white_space_regions: Vec::new(),
                statistics: CoverageStatistics::default(),
                generated_at: Utc::now(),
                cache_key: cache_key.clone(),
            }
        } else {
            let points = build_constellation_points(
                &patents,
                self.repository.as_ref(),
                self.engine.as_ref(),
                &reduction,
                PointType::OwnPatent,
            )
            .await?;
            let clusters = detect_clusters(&points);
            let white_space_regions = if request.include_white_space {
                detect_white_space(&points, &clusters)
            } else {
                Vec::new()
            };
            let statistics = compute_statistics(
                &points,
                &clusters,
                &white_space_regions,
                request.include_white_space,
            );
            ConstellationResponse {
                points,
                clusters,
                white_space_regions,
                statistics,
                generated_at: Utc::now(),
                cache_key: cache_key.clone(),
            }
        };

        self.cache_write(&cache_key, &response).await;
        info!(
            "Generated constellation for {}: {} points, {} clusters, {} white-space regions in {:?}",
            request.portfolio_id,
            response.points.len(),
            response.clusters.len(),
            response.white_space_regions.len(),
            started.elapsed()
        );
        Ok(response)
    }

    /// Technology-domain distribution of a portfolio.
    pub async fn get_domain_distribution(
        &self,
        portfolio_id: PortfolioId,
    ) -> ConstellationResult<DomainDistribution> {
        validate_portfolio_id(portfolio_id)?;
        let patents = self.load_portfolio_patents(portfolio_id).await?;
        let distribution = compute_domain_distribution(portfolio_id, &patents, today());
        info!(
            "Domain distribution for {}: {} patents across {} domains",
            portfolio_id,
            distribution.total_patents,
            distribution.domains.len()
        );
        Ok(distribution)
    }

    /// Compare a portfolio against a competitor's holdings.
    pub async fn compare_with_competitor(
        &self,
        request: &CompareRequest,
    ) -> ConstellationResult<ComparisonResult> {
        validate_portfolio_id(request.portfolio_id)?;
        let competitor_name = request.competitor_name.trim();
        if competitor_name.is_empty() {
            return Err(ConstellationError::validation(
                "competitor_name must not be empty",
            ));
        }

        let (own, competitor) = futures::try_join!(
            self.load_portfolio_patents(request.portfolio_id),
            self.load_competitor_patents(competitor_name, &request.competitor_patent_ids),
        )?;

        let (own, competitor) = if request.technology_domains.is_empty() {
            (own, competitor)
        } else {
            let domains = &request.technology_domains;
            let keep = |patents: Vec<Patent>| -> Vec<Patent> {
                patents
                    .into_iter()
                    .filter(|p| p.matches_any_domain(domains))
                    .collect()
            };
            (keep(own), keep(competitor))
        };

        let result = compare_portfolios(&own, &competitor, today());
        info!(
            "Compared {} ({} patents) with {} ({} patents): index {:.3} ({})",
            request.portfolio_id,
            own.len(),
            competitor_name,
            competitor.len(),
            result.strength_index,
            result.summary.advantage.as_str()
        );
        Ok(result)
    }

    /// Coverage density heatmap of a portfolio.
    ///
    /// The raw grid is cached; the density override is applied afterwards.
    pub async fn get_coverage_heatmap(
        &self,
        portfolio_id: PortfolioId,
        options: &HeatmapOptions,
    ) -> ConstellationResult<CoverageHeatmap> {
        validate_portfolio_id(portfolio_id)?;
        let resolution = options.resolution();
        let cache_key = heatmap_cache_key(portfolio_id, resolution);

        let mut heatmap = match self.cache_read::<CoverageHeatmap>(&cache_key).await {
            Some(cached) => {
                debug!("Heatmap cache hit for {}", portfolio_id);
                cached
            }
            None => {
                let heatmap = self.compute_heatmap(portfolio_id, resolution, &cache_key).await?;
                self.cache_write(&cache_key, &heatmap).await;
                heatmap
            }
        };

        options.apply_density_override(&mut heatmap);
        Ok(heatmap)
    }

    async fn compute_heatmap(
        &self,
        portfolio_id: PortfolioId,
        resolution: usize,
        cache_key: &str,
    ) -> ConstellationResult<CoverageHeatmap> {
        let started = Instant::now();
        let patents = self.load_portfolio_patents(portfolio_id).await?;
        if patents.is_empty() {
            let mut empty = CoverageHeatmap::empty(resolution);
            empty.cache_key = cache_key.to_string();
            return Ok(empty);
        }

        let points = build_constellation_points(
            &patents,
            self.repository.as_ref(),
            self.engine.as_ref(),
            &ReductionConfig::default(),
            PointType::OwnPatent,
        )
        .await?;
        let mut heatmap = generate_heatmap(&points, resolution);
        heatmap.cache_key = cache_key.to_string();
        info!(
            "Generated {}x{} heatmap for {} from {} points in {:?}",
            resolution,
            resolution,
            portfolio_id,
            points.len(),
            started.elapsed()
        );
        Ok(heatmap)
    }

    async fn load_portfolio_patents(
        &self,
        portfolio_id: PortfolioId,
    ) -> ConstellationResult<Vec<Patent>> {
        self.repository
            .get_patents_by_portfolio(portfolio_id)
            .await
            .map_err(|e| ConstellationError::repository("get_patents_by_portfolio", e))
    }

    async fn load_competitor_patents(
        &self,
        competitor_name: &str,
        patent_ids: &[String],
    ) -> ConstellationResult<Vec<Patent>> {
        if patent_ids.is_empty() {
            self.repository
                .get_patents_by_assignee(competitor_name)
                .await
                .map_err(|e| ConstellationError::repository("get_patents_by_assignee", e))
        } else {
            self.repository
                .get_patents_by_ids(patent_ids)
                .await
                .map_err(|e| ConstellationError::repository("get_patents_by_ids", e))
        }
    }

    /// Cached value for `key`; read and decode failures count as misses.
    async fn cache_read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let cache = self.cache.as_ref()?;
        match cache.get(key).await {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("Discarding undecodable cache entry {}: {}", key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Cache read failed for {}: {}", key, e);
                None
            }
        }
    }

    /// Best-effort write; failures are only logged.
    async fn cache_write<T: Serialize>(&self, key: &str, value: &T) {
        let Some(cache) = self.cache.as_ref() else {
            return;
        };
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to serialize cache entry {}: {}", key, e);
                return;
            }
        };
        if let Err(e) = cache.set(key, bytes, self.cache_ttl).await {
            warn!("Cache write failed for {}: {}", key, e);
        }
    }
}

#[cfg(test)]
#[path = "constellation_tests.rs"]
mod constellation_tests;
