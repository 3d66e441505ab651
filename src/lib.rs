//! FedLease Match - scoring engine for federal lease opportunities
//!
//! Scores (opportunity, property) pairs across location, space, building class,
//! timeline and broker experience, grades and tiers the result, and rates
//! neighborhoods by their proximity to federally-associated properties.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{MatchEngine, EngineError, GeoError, distance::{distance, within_radius}};
pub use crate::models::{Opportunity, Property, ReferenceProperty, Match, NeighborhoodScore, ScoringPolicy};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let dc = models::GeoPoint::new(38.90, -77.03);
        assert_eq!(distance(&dc, &dc).unwrap(), 0.0);
        assert!(ScoringPolicy::default().validate().is_ok());
    }
}
