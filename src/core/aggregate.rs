use crate::models::{
    round_score, CategoryBreakdown, Grade, GradeBands, Match, MatchWeights, QualificationTier,
    ScoringPolicy, TierThresholds,
};

/// Weighted sum of the five category scores, clamped to [0, 100]
///
/// score = (
///     location   * 0.30 +
///     space      * 0.25 +
///     building   * 0.15 +
///     timeline   * 0.15 +
///     experience * 0.15
/// )
/// with the default weights.
pub fn overall_score(categories: &CategoryBreakdown, weights: &MatchWeights) -> f64 {
    let total = categories.location.score * weights.location
        + categories.space.score * weights.space
        + categories.building.score * weights.building
        + categories.timeline.score * weights.timeline
        + categories.experience.score * weights.experience;

    round_score(total)
}

/// Letter grade; each bound belongs to the higher grade
pub fn grade_for(score: f64, bands: &GradeBands) -> Grade {
    if score >= bands.a {
        Grade::A
    } else if score >= bands.b {
        Grade::B
    } else if score >= bands.c {
        Grade::C
    } else if score >= bands.d {
        Grade::D
    } else {
        Grade::F
    }
}

/// Qualification tier; each bound belongs to the higher tier
pub fn tier_for(score: f64, thresholds: &TierThresholds) -> QualificationTier {
    if score >= thresholds.competitive {
        QualificationTier::Competitive
    } else if score >= thresholds.qualified {
        QualificationTier::Qualified
    } else if score >= thresholds.marginal {
        QualificationTier::Marginal
    } else {
        QualificationTier::Unqualified
    }
}

/// Combine category scores into a complete match record
pub fn aggregate(
    opportunity_id: &str,
    property_id: &str,
    categories: CategoryBreakdown,
    policy: &ScoringPolicy,
) -> Match {
    let overall = overall_score(&categories, &policy.weights);

    Match {
        opportunity_id: opportunity_id.to_string(),
        property_id: property_id.to_string(),
        categories,
        overall_score: overall,
        grade: grade_for(overall, &policy.grade_bands),
        tier: tier_for(overall, &policy.tier_thresholds),
    }
}
