use serde::{Deserialize, Serialize};

use crate::core::distance::km_to_miles;
use crate::models::domain::{Grade, Match, NearbyProperty, NeighborhoodScore, QualificationTier};

/// Per-category explanations of lost points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReasons {
    pub location: Vec<String>,
    pub space: Vec<String>,
    pub building: Vec<String>,
    pub timeline: Vec<String>,
    pub experience: Vec<String>,
}

/// Scored pair as exposed over HTTP
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub opportunity_id: String,
    pub property_id: String,
    pub overall_score: f64,
    pub grade: Grade,
    pub tier: QualificationTier,
    pub qualified: bool,
    pub competitive: bool,
    pub location_score: f64,
    pub space_score: f64,
    pub building_score: f64,
    pub timeline_score: f64,
    pub experience_score: f64,
    pub reasons: MatchReasons,
}

impl From<&Match> for MatchResponse {
    fn from(m: &Match) -> Self {
        let c = &m.categories;
        Self {
            opportunity_id: m.opportunity_id.clone(),
            property_id: m.property_id.clone(),
            overall_score: m.overall_score,
            grade: m.grade,
            tier: m.tier,
            qualified: m.tier.is_qualified(),
            competitive: m.tier.is_competitive(),
            location_score: c.location.score,
            space_score: c.space.score,
            building_score: c.building.score,
            timeline_score: c.timeline.score,
            experience_score: c.experience.score,
            reasons: MatchReasons {
                location: c.location.reasons.clone(),
                space: c.space.reasons.clone(),
                building: c.building.reasons.clone(),
                timeline: c.timeline.reasons.clone(),
                experience: c.experience.reasons.clone(),
            },
        }
    }
}

/// Response for batch mode
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchMatchResponse {
    pub opportunity_id: String,
    pub matches: Vec<MatchResponse>,
    pub total_results: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyPropertyResponse {
    pub id: String,
    pub name: Option<String>,
    pub agency: Option<String>,
    pub distance_km: f64,
    pub distance_miles: f64,
}

impl From<&NearbyProperty> for NearbyPropertyResponse {
    fn from(p: &NearbyProperty) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            agency: p.agency.clone(),
            distance_km: p.distance_km,
            distance_miles: km_to_miles(p.distance_km),
        }
    }
}

/// Response for the neighborhood endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborhoodResponse {
    pub score: f64,
    pub count: usize,
    pub density: f64,
    pub radius_miles: f64,
    pub properties: Vec<NearbyPropertyResponse>,
}

impl NeighborhoodResponse {
    pub fn new(result: &NeighborhoodScore, radius_miles: f64) -> Self {
        Self {
            score: result.score,
            count: result.count,
            density: result.density,
            radius_miles,
            properties: result.properties.iter().map(NearbyPropertyResponse::from).collect(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub cached_matches: u64,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
