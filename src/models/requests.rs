use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::PropertyFilter;

/// Request to score an opportunity against one property or the listing pool
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScoreMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "opportunity_id", rename = "opportunityId")]
    pub opportunity_id: String,
    /// Pair mode when present, batch mode otherwise
    #[validate(length(min = 1))]
    #[serde(default, alias = "property_id", rename = "propertyId")]
    pub property_id: Option<String>,
    #[serde(default)]
    pub filter: PropertyFilter,
    #[validate(range(min = 1))]
    #[serde(default, alias = "max_results", rename = "maxResults")]
    pub max_results: Option<usize>,
}

/// Query string of the neighborhood endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NeighborhoodQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
    #[validate(range(min = 0.1, max = 50.0))]
    #[serde(default = "default_radius_miles", rename = "radiusMiles")]
    pub radius_miles: f64,
}

pub fn default_radius_miles() -> f64 {
    5.0
}
