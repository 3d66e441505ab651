use actix_web::{http::StatusCode, web, HttpResponse, Responder};

use super::{error_response, AppState};
use crate::core::{validate_opportunity, validate_property};
use crate::models::{Opportunity, Property};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/opportunities", web::put().to(upsert_opportunity))
        .route("/properties", web::put().to(upsert_property));
}

/// Insert or replace an opportunity
///
/// PUT /api/v1/opportunities
///
/// Bumps the stored version and drops cached matches of the opportunity.
async fn upsert_opportunity(
    state: web::Data<AppState>,
    req: web::Json<Opportunity>,
) -> impl Responder {
    let opportunity = req.into_inner();
    if let Err(e) = validate_opportunity(&opportunity) {
        return error_response(StatusCode::BAD_REQUEST, "Invalid input", e.to_string());
    }

    let stored = state.store.upsert_opportunity(opportunity);
    if let Err(e) = state.cache.invalidate_opportunity(&stored.id) {
        tracing::warn!("Failed to invalidate cached matches for {}: {}", stored.id, e);
    }

    tracing::info!("Stored opportunity {} (version {})", stored.id, stored.version);
    HttpResponse::Ok().json(stored)
}

/// Insert or replace a property listing
///
/// PUT /api/v1/properties
///
/// Bumps the stored version and drops cached matches of the property.
async fn upsert_property(
    state: web::Data<AppState>,
    req: web::Json<Property>,
) -> impl Responder {
    let property = req.into_inner();
    if let Err(e) = validate_property(&property) {
        return error_response(StatusCode::BAD_REQUEST, "Invalid input", e.to_string());
    }

    let stored = state.store.upsert_property(property);
    if let Err(e) = state.cache.invalidate_property(&stored.id) {
        tracing::warn!("Failed to invalidate cached matches for {}: {}", stored.id, e);
    }

    tracing::info!("Stored property {} (version {})", stored.id, stored.version);
    HttpResponse::Ok().json(stored)
}
