// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    round_score, BoundingBox, BrokerContact, BuildingClass, BuildingClassTable, Category,
    CategoryBreakdown, CategoryScore, GeoPoint, Grade, GradeBands, LeaseType, ListingStatus,
    LocationConstraint, Match, MatchWeights, NearbyProperty, NeighborhoodScore, Opportunity,
    Property, PropertyFilter, QualificationTier, ReferenceProperty, ScoringPolicy, TierThresholds,
    INSUFFICIENT_DATA_SCORE,
};
pub use requests::{NeighborhoodQuery, ScoreMatchesRequest};
pub use responses::{
    BatchMatchResponse, ErrorResponse, HealthResponse, MatchReasons, MatchResponse,
    NearbyPropertyResponse, NeighborhoodResponse,
};
