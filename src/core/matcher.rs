use rayon::prelude::*;

use crate::core::{
    aggregate::aggregate,
    categories::score_categories,
    distance::validate_point,
    error::EngineError,
    neighborhood::score_neighborhood,
};
use crate::models::{GeoPoint, Match, NeighborhoodScore, Opportunity, Property, ReferenceProperty, ScoringPolicy};

/// Batches at least this large are scored on the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Structural validation of the inputs
/// 2. Category scoring (location, space, building, timeline, experience)
/// 3. Aggregation into overall score, grade and tier
/// 4. Ranking (batch mode only)
#[derive(Debug, Clone)]
pub struct MatchEngine {
    policy: ScoringPolicy,
    parallel_threshold: usize,
}

impl MatchEngine {
    pub fn new(policy: ScoringPolicy) -> Result<Self, EngineError> {
        policy.validate()?;
        Ok(Self {
            policy,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        })
    }

    pub fn with_default_policy() -> Self {
        Self {
            policy: ScoringPolicy::default(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Score one (opportunity, property) pair
    ///
    /// Fails with `InvalidInput` before any scoring runs when either record is malformed.
    pub fn score_pair(&self, opportunity: &Opportunity, property: &Property) -> Result<Match, EngineError> {
        validate_opportunity(opportunity)?;
        validate_property(property)?;
        Ok(self.score_validated(opportunity, property))
    }

    /// Score one opportunity against many properties
    ///
    /// Returns one match per property, sorted by overall score (descending) then
    /// property id (ascending). Every property is validated before any is scored.
    pub fn score_batch(
        &self,
        opportunity: &Opportunity,
        properties: &[Property],
    ) -> Result<Vec<Match>, EngineError> {
        validate_opportunity(opportunity)?;
        for property in properties {
            validate_property(property)?;
        }

        let mut matches: Vec<Match> = if properties.len() >= self.parallel_threshold {
            tracing::debug!(
                "Scoring {} properties for {} in parallel",
                properties.len(),
                opportunity.id
            );
            properties
                .par_iter()
                .map(|property| self.score_validated(opportunity, property))
                .collect()
        } else {
            properties
                .iter()
                .map(|property| self.score_validated(opportunity, property))
                .collect()
        };

        rank_matches(&mut matches);
        Ok(matches)
    }

    /// Rate the federal presence around a point
    pub fn score_neighborhood(
        &self,
        center: &GeoPoint,
        radius_km: f64,
        inventory: &[ReferenceProperty],
    ) -> Result<NeighborhoodScore, EngineError> {
        Ok(score_neighborhood(
            center,
            radius_km,
            inventory,
            self.policy.neighborhood_saturation_density,
        )?)
    }

    fn score_validated(&self, opportunity: &Opportunity, property: &Property) -> Match {
        let categories = score_categories(opportunity, property, &self.policy);
        aggregate(&opportunity.id, &property.id, categories, &self.policy)
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::with_default_policy()
    }
}

/// Sort by overall score (descending), then property id (ascending)
pub fn rank_matches(matches: &mut [Match]) {
    matches.sort_by(|a, b| {
        b.overall_score
            .total_cmp(&a.overall_score)
            .then_with(|| a.property_id.cmp(&b.property_id))
    });
}

/// Structural checks on an opportunity
pub fn validate_opportunity(opportunity: &Opportunity) -> Result<(), EngineError> {
    if opportunity.id.trim().is_empty() {
        return Err(EngineError::InvalidInput("opportunity id is required".to_string()));
    }

    if let (Some(min), Some(max)) = (opportunity.min_sqft, opportunity.max_sqft) {
        if min > max {
            return Err(EngineError::InvalidInput(format!(
                "opportunity {}: minimum square footage {} exceeds maximum {}",
                opportunity.id, min, max
            )));
        }
    }
    if opportunity.max_sqft == Some(0) {
        return Err(EngineError::InvalidInput(format!(
            "opportunity {}: maximum square footage must be positive",
            opportunity.id
        )));
    }

    let location = &opportunity.location;
    if let Some(center) = &location.center {
        validate_point(center)?;
    }
    if let Some(radius) = location.radius_miles {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(EngineError::InvalidInput(format!(
                "opportunity {}: radius must be positive, got {}",
                opportunity.id, radius
            )));
        }
        if location.center.is_none() {
            return Err(EngineError::InvalidInput(format!(
                "opportunity {}: radius given without a center point",
                opportunity.id
            )));
        }
    }

    Ok(())
}

/// Structural checks on a property
pub fn validate_property(property: &Property) -> Result<(), EngineError> {
    if property.id.trim().is_empty() {
        return Err(EngineError::InvalidInput("property id is required".to_string()));
    }
    if let Some(point) = &property.location {
        validate_point(point)?;
    }
    Ok(())
}
