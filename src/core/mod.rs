// Core algorithm exports
pub mod aggregate;
pub mod categories;
pub mod distance;
pub mod error;
pub mod filters;
pub mod matcher;
pub mod neighborhood;

pub use aggregate::{aggregate, grade_for, overall_score, tier_for};
pub use categories::{score_building, score_categories, score_experience, score_location, score_space, score_timeline};
pub use distance::{distance, haversine_distance, within_radius, calculate_bounding_box, is_within_bounding_box};
pub use error::{EngineError, GeoError};
pub use filters::{is_available, matches_property_filter, select_candidates};
pub use matcher::{MatchEngine, rank_matches, validate_opportunity, validate_property};
pub use neighborhood::{density_score, score_neighborhood};
