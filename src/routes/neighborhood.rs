use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use super::{error_response, AppState};
use crate::core::distance::miles_to_km;
use crate::models::{GeoPoint, NeighborhoodQuery, NeighborhoodResponse};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/neighborhood", web::get().to(neighborhood_score));
}

/// Neighborhood desirability endpoint
///
/// GET /api/v1/neighborhood?lat={lat}&lng={lng}&radiusMiles={radius}
///
/// `radiusMiles` defaults to 5 and must lie in [0.1, 50].
async fn neighborhood_score(
    state: web::Data<AppState>,
    query: web::Query<NeighborhoodQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let center = GeoPoint::new(query.lat, query.lng);
    let inventory = state.store.reference_inventory();

    match state
        .engine
        .score_neighborhood(&center, miles_to_km(query.radius_miles), &inventory)
    {
        Ok(result) => {
            tracing::info!(
                "Neighborhood ({}, {}) r={}mi: {} federal properties, score {}",
                center.lat,
                center.lng,
                query.radius_miles,
                result.count,
                result.score
            );
            HttpResponse::Ok().json(NeighborhoodResponse::new(&result, query.radius_miles))
        }
        Err(e) => error_response(StatusCode::BAD_REQUEST, "Invalid input", e.to_string()),
    }
}
