use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use super::{error_response, AppState};
use crate::core::select_candidates;
use crate::models::{BatchMatchResponse, HealthResponse, MatchResponse, Opportunity, ScoreMatchesRequest};
use crate::services::{CacheKey, StoreError};

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/score", web::post().to(score_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        cached_matches: state.cache.stats().entries,
    })
}

pub(crate) fn store_error_response(err: StoreError) -> HttpResponse {
    match err {
        StoreError::NotFound { .. } => error_response(StatusCode::NOT_FOUND, "Not found", err.to_string()),
        other => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Store error",
            other.to_string(),
        ),
    }
}

/// Score matches endpoint
///
/// POST /api/v1/matches/score
///
/// Pair mode when `propertyId` is present, batch mode over all active listings otherwise.
///
/// Request body:
/// ```json
/// {
///   "opportunityId": "string",
///   "propertyId": "string",
///   "filter": { "state": "VA", "buildingClass": "B", "minAvailableSqft": 10000 },
///   "maxResults": 20
/// }
/// ```
async fn score_matches(
    state: web::Data<AppState>,
    req: web::Json<ScoreMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for score request: field_errors={:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let opportunity = match state.store.opportunity(&req.opportunity_id) {
        Ok(opportunity) => opportunity,
        Err(e) => {
            tracing::info!("Score request for unknown opportunity {}: {}", req.opportunity_id, e);
            return store_error_response(e);
        }
    };

    match &req.property_id {
        Some(property_id) => score_pair(&state, &opportunity, property_id).await,
        None => score_batch(&state, opportunity, &req).await,
    }
}

async fn score_pair(state: &AppState, opportunity: &Opportunity, property_id: &str) -> HttpResponse {
    let property = match state.store.property(property_id) {
        Ok(property) => property,
        Err(e) => return store_error_response(e),
    };

    let key = CacheKey::pair(&opportunity.id, opportunity.version, &property.id, property.version);
    if let Some(cached) = state.cache.get(&key).await {
        return HttpResponse::Ok().json(MatchResponse::from(&cached));
    }

    match state.engine.score_pair(opportunity, &property) {
        Ok(scored) => {
            let weakest = scored.categories.weakest();
            tracing::info!(
                "Scored {} against {}: {} ({}), weakest {} at {}",
                opportunity.id,
                property.id,
                scored.overall_score,
                scored.grade.as_str(),
                weakest.category.as_str(),
                weakest.score
            );
            let response = MatchResponse::from(&scored);
            state.cache.insert(key, scored).await;
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            tracing::info!("Rejected pair {} / {}: {}", opportunity.id, property.id, e);
            error_response(StatusCode::BAD_REQUEST, "Invalid input", e.to_string())
        }
    }
}

async fn score_batch(state: &AppState, opportunity: Opportunity, req: &ScoreMatchesRequest) -> HttpResponse {
    let candidates = select_candidates(state.store.properties(), &req.filter);
    tracing::debug!("Batch for {}: {} candidate properties", opportunity.id, candidates.len());

    // Scoring is CPU-bound, keep it off the actix worker
    let engine = Arc::clone(&state.engine);
    let opportunity_id = opportunity.id.clone();
    let scored = web::block(move || engine.score_batch(&opportunity, &candidates)).await;

    let matches = match scored {
        Ok(Ok(matches)) => matches,
        Ok(Err(e)) => {
            tracing::info!("Rejected batch for {}: {}", opportunity_id, e);
            return error_response(StatusCode::BAD_REQUEST, "Invalid input", e.to_string());
        }
        Err(e) => {
            tracing::error!("Batch scoring for {} did not complete: {}", opportunity_id, e);
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Scoring failed",
                e.to_string(),
            );
        }
    };

    let total_results = matches.len();
    let limit = req
        .max_results
        .unwrap_or(state.max_batch_results)
        .min(state.max_batch_results);

    let response = BatchMatchResponse {
        opportunity_id: opportunity_id.clone(),
        matches: matches.iter().take(limit).map(MatchResponse::from).collect(),
        total_results,
    };

    tracing::info!(
        "Returning {} matches for opportunity {} (from {} candidates)",
        response.matches.len(),
        opportunity_id,
        total_results
    );

    HttpResponse::Ok().json(response)
}
