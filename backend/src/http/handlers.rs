//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! constellation service.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{
    CompareBody, ComparisonResult, ConstellationBody, ConstellationResponse, CoverageHeatmap,
    DomainDistribution, HealthResponse, HeatmapQuery,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::PortfolioId;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn parse_portfolio_id(raw: &str) -> Result<PortfolioId, AppError> {
    PortfolioId::parse(raw)
        .map_err(|e| AppError::BadRequest(format!("Invalid portfolio id '{}': {}", raw, e)))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the repository
/// is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.service.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Portfolio analytics
// =============================================================================

/// POST /v1/portfolios/{portfolio_id}/constellation
pub async fn generate_constellation(
    State(state): State<AppState>,
    Path(portfolio_id): Path<String>,
    Json(body): Json<ConstellationBody>,
) -> HandlerResult<ConstellationResponse> {
    let request = body.into_request(parse_portfolio_id(&portfolio_id)?);
    let data = state.service.generate_constellation(&request).await?;
    Ok(Json(data))
}

/// GET /v1/portfolios/{portfolio_id}/domains
pub async fn get_domain_distribution(
    State(state): State<AppState>,
    Path(portfolio_id): Path<String>,
) -> HandlerResult<DomainDistribution> {
    let portfolio_id = parse_portfolio_id(&portfolio_id)?;
    let data = state.service.get_domain_distribution(portfolio_id).await?;
    Ok(Json(data))
}

/// POST /v1/portfolios/{portfolio_id}/compare
pub async fn compare_with_competitor(
    State(state): State<AppState>,
    Path(portfolio_id): Path<String>,
    Json(body): Json<CompareBody>,
) -> HandlerResult<ComparisonResult> {
    let request = body.into_request(parse_portfolio_id(&portfolio_id)?);
    let data = state.service.compare_with_competitor(&request).await?;
    Ok(Json(data))
}

/// GET /v1/portfolios/{portfolio_id}/heatmap
///
/// Query: `resolution`, `density_min`, `density_max`.
pub async fn get_coverage_heatmap(
    State(state): State<AppState>,
    Path(portfolio_id): Path<String>,
    Query(query): Query<HeatmapQuery>,
) -> HandlerResult<CoverageHeatmap> {
    let portfolio_id = parse_portfolio_id(&portfolio_id)?;
    let data = state
        .service
        .get_coverage_heatmap(portfolio_id, &query.to_options())
        .await?;
    Ok(Json(data))
}
