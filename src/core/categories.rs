use crate::core::distance::{haversine_distance, km_to_miles, miles_to_km};
use crate::models::{Category, CategoryBreakdown, CategoryScore, Opportunity, Property, ScoringPolicy};

/// Run all five category scorers for a pair
pub fn score_categories(
    opportunity: &Opportunity,
    property: &Property,
    policy: &ScoringPolicy,
) -> CategoryBreakdown {
    CategoryBreakdown {
        location: score_location(opportunity, property, policy),
        space: score_space(opportunity, property, policy),
        building: score_building(opportunity, property, policy),
        timeline: score_timeline(opportunity, property, policy),
        experience: score_experience(property, policy),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Jurisdiction {
    Exact,
    SameStateOtherCity,
    Outside,
}

fn same_place(required: &str, offered: &str) -> bool {
    required.trim().eq_ignore_ascii_case(offered.trim())
}

/// Compare the required city/state with the listing's, None when it cannot be decided
fn jurisdiction_match(opportunity: &Opportunity, property: &Property) -> Option<Jurisdiction> {
    let constraint = &opportunity.location;
    if constraint.state.is_none() && constraint.city.is_none() {
        return None;
    }

    let state_ok = match (&constraint.state, &property.state) {
        (Some(required), Some(offered)) => Some(same_place(required, offered)),
        (Some(_), None) => return None,
        (None, _) => None,
    };
    if state_ok == Some(false) {
        return Some(Jurisdiction::Outside);
    }

    match (&constraint.city, &property.city) {
        (Some(required), Some(offered)) if same_place(required, offered) => Some(Jurisdiction::Exact),
        (Some(_), Some(_)) if state_ok == Some(true) => Some(Jurisdiction::SameStateOtherCity),
        (Some(_), Some(_)) => Some(Jurisdiction::Outside),
        (Some(_), None) if state_ok == Some(true) => Some(Jurisdiction::SameStateOtherCity),
        (Some(_), None) => None,
        (None, _) => Some(Jurisdiction::Exact),
    }
}

fn describe_jurisdiction(opportunity: &Opportunity) -> String {
    let constraint = &opportunity.location;
    match (&constraint.city, &constraint.state) {
        (Some(city), Some(state)) => format!("{}, {}", city, state),
        (Some(city), None) => city.clone(),
        (None, Some(state)) => state.clone(),
        (None, None) => "the required area".to_string(),
    }
}

/// Location score
///
/// 100 inside the required radius or in the exact required city/state. Past the radius
/// edge (or from the center when no radius is given) the score falls linearly to 0 at
/// `max_location_distance_km`.
pub fn score_location(
    opportunity: &Opportunity,
    property: &Property,
    policy: &ScoringPolicy,
) -> CategoryScore {
    let jurisdiction = jurisdiction_match(opportunity, property);
    if jurisdiction == Some(Jurisdiction::Exact) {
        return CategoryScore::full(Category::Location);
    }

    let constraint = &opportunity.location;
    if let (Some(center), Some(point)) = (constraint.center, property.location) {
        let distance_km = haversine_distance(center.lat, center.lng, point.lat, point.lng);
        let radius_km = constraint.radius_miles.map(miles_to_km).unwrap_or(0.0);
        if distance_km <= radius_km {
            return CategoryScore::full(Category::Location);
        }

        let excess_km = distance_km - radius_km;
        let score = 100.0 * (1.0 - excess_km / policy.max_location_distance_km);
        let reason = match constraint.radius_miles {
            Some(radius_miles) => format!(
                "{:.1} mi away, outside required radius of {:.1} mi",
                km_to_miles(distance_km),
                radius_miles
            ),
            None => format!("{:.1} mi from requested location", km_to_miles(distance_km)),
        };
        return CategoryScore::new(Category::Location, score.max(0.0), vec![reason]);
    }

    match jurisdiction {
        Some(Jurisdiction::SameStateOtherCity) => CategoryScore::new(
            Category::Location,
            50.0,
            vec![format!("in required state but not in {}", describe_jurisdiction(opportunity))],
        ),
        Some(Jurisdiction::Outside) => CategoryScore::new(
            Category::Location,
            0.0,
            vec![format!("outside {}", describe_jurisdiction(opportunity))],
        ),
        _ => CategoryScore::insufficient_data(Category::Location, "no comparable location data"),
    }
}

/// Space score
///
/// 100 inside [min, max]. Undersized listings lose points in proportion to the shortfall;
/// oversized ones lose points at `oversize_penalty_rate` and never drop below `oversize_floor`.
pub fn score_space(
    opportunity: &Opportunity,
    property: &Property,
    policy: &ScoringPolicy,
) -> CategoryScore {
    let Some(offered) = property.available_sqft else {
        return CategoryScore::insufficient_data(Category::Space, "listing has no available square footage");
    };
    if opportunity.min_sqft.is_none() && opportunity.max_sqft.is_none() {
        return CategoryScore::insufficient_data(Category::Space, "no square footage requirement");
    }

    let offered_f = offered as f64;

    if let Some(min) = opportunity.min_sqft.filter(|min| offered < *min) {
        let shortfall = (min as f64 - offered_f) / min as f64;
        return CategoryScore::new(
            Category::Space,
            100.0 * (1.0 - shortfall),
            vec![format!(
                "{} sq ft is {:.0}% under minimum of {} sq ft",
                offered,
                shortfall * 100.0,
                min
            )],
        );
    }

    if let Some(max) = opportunity.max_sqft.filter(|max| offered > *max) {
        let excess = (offered_f - max as f64) / max.max(1) as f64;
        let score = (100.0 * (1.0 - policy.oversize_penalty_rate * excess)).max(policy.oversize_floor);
        return CategoryScore::new(
            Category::Space,
            score,
            vec![format!(
                "{} sq ft is {:.0}% over maximum of {} sq ft",
                offered,
                excess * 100.0,
                max
            )],
        );
    }

    CategoryScore::full(Category::Space)
}

/// Building class score from the compatibility table
pub fn score_building(
    opportunity: &Opportunity,
    property: &Property,
    policy: &ScoringPolicy,
) -> CategoryScore {
    let (required, offered) = match (opportunity.building_class, property.building_class) {
        (Some(required), Some(offered)) => (required, offered),
        (None, _) => {
            return CategoryScore::insufficient_data(Category::Building, "no building class requirement")
        }
        (_, None) => {
            return CategoryScore::insufficient_data(Category::Building, "listing has no building class")
        }
    };

    let score = policy.building.score(required, offered);
    let reasons = if offered.rank() < required.rank() {
        vec![format!(
            "class {} offered, class {} required",
            offered.as_str(),
            required.as_str()
        )]
    } else {
        Vec::new()
    };

    CategoryScore::new(Category::Building, score, reasons)
}

/// Timeline score
///
/// 100 when the listing is available by the occupancy date, then linear to 0 at
/// `max_delay_days` late.
pub fn score_timeline(
    opportunity: &Opportunity,
    property: &Property,
    policy: &ScoringPolicy,
) -> CategoryScore {
    let (required, available) = match (opportunity.occupancy_date, property.available_date) {
        (Some(required), Some(available)) => (required, available),
        (None, _) => {
            return CategoryScore::insufficient_data(Category::Timeline, "no required occupancy date")
        }
        (_, None) => {
            return CategoryScore::insufficient_data(Category::Timeline, "listing has no availability date")
        }
    };

    if available <= required {
        return CategoryScore::full(Category::Timeline);
    }

    let delay_days = (available - required).num_days();
    let score = 100.0 * (1.0 - delay_days as f64 / policy.max_delay_days);
    CategoryScore::new(
        Category::Timeline,
        score.max(0.0),
        vec![format!(
            "available {} days after required occupancy date {}",
            delay_days, required
        )],
    )
}

/// Experience score
///
/// `50 + 50 * n / (n + half_saturation)` over the broker's closed transactions:
/// no history is neutral, more history helps with diminishing returns.
pub fn score_experience(property: &Property, policy: &ScoringPolicy) -> CategoryScore {
    let Some(closed) = property.broker.closed_transactions else {
        return CategoryScore::insufficient_data(Category::Experience, "no broker track record on file");
    };

    let n = closed as f64;
    let score = 50.0 + 50.0 * n / (n + policy.experience_half_saturation);
    let reasons = if closed == 0 {
        vec!["no prior closed transactions".to_string()]
    } else {
        Vec::new()
    };

    CategoryScore::new(Category::Experience, score, reasons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BrokerContact, BuildingClass, GeoPoint, ListingStatus, LocationConstraint,
    };
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_opportunity() -> Opportunity {
        Opportunity {
            id: "opp-1".to_string(),
            version: 1,
            solicitation_number: Some("RDC12345".to_string()),
            agency: Some("GSA".to_string()),
            min_sqft: Some(10_000),
            max_sqft: Some(20_000),
            occupancy_date: Some(date(2025, 6, 1)),
            location: LocationConstraint {
                state: None,
                city: None,
                center: Some(GeoPoint::new(38.90, -77.03)),
                radius_miles: Some(10.0),
            },
            building_class: Some(BuildingClass::A),
        }
    }

    fn create_property() -> Property {
        Property {
            id: "prop-1".to_string(),
            version: 1,
            title: None,
            available_sqft: Some(15_000),
            building_class: Some(BuildingClass::A),
            location: Some(GeoPoint::new(38.90, -77.03)),
            city: Some("Washington".to_string()),
            state: Some("DC".to_string()),
            available_date: Some(date(2025, 5, 1)),
            lease_type: None,
            broker: BrokerContact::default(),
            status: ListingStatus::Active,
        }
    }

    #[test]
    fn test_location_inside_radius() {
        let policy = ScoringPolicy::default();
        let score = score_location(&create_opportunity(), &create_property(), &policy);
        assert_eq!(score.score, 100.0);
        assert!(score.reasons.is_empty());
    }

    #[test]
    fn test_location_decays_past_radius() {
        let policy = ScoringPolicy::default();
        let mut property = create_property();
        // ~27.8 km north, radius is ~16.1 km
        property.location = Some(GeoPoint::new(39.15, -77.03));

        let score = score_location(&create_opportunity(), &property, &policy);
        assert!(score.score > 60.0 && score.score < 85.0, "got {}", score.score);
        assert_eq!(score.reasons.len(), 1);
        assert!(score.reasons[0].contains("outside required radius of 10.0 mi"));

        property.location = Some(GeoPoint::new(40.5, -77.03));
        let far = score_location(&create_opportunity(), &property, &policy);
        assert_eq!(far.score, 0.0);
    }

    #[test]
    fn test_location_exact_jurisdiction_wins() {
        let policy = ScoringPolicy::default();
        let mut opportunity = create_opportunity();
        opportunity.location.state = Some("dc".to_string());
        opportunity.location.city = Some(" washington ".to_string());
        let mut property = create_property();
        property.location = Some(GeoPoint::new(40.5, -77.03));

        assert_eq!(score_location(&opportunity, &property, &policy).score, 100.0);
    }

    #[test]
    fn test_location_jurisdiction_without_coordinates() {
        let policy = ScoringPolicy::default();
        let mut opportunity = create_opportunity();
        opportunity.location = LocationConstraint {
            state: Some("VA".to_string()),
            city: Some("Arlington".to_string()),
            center: None,
            radius_miles: None,
        };
        let mut property = create_property();
        property.state = Some("VA".to_string());
        property.city = Some("Alexandria".to_string());

        assert_eq!(score_location(&opportunity, &property, &policy).score, 50.0);

        property.state = Some("MD".to_string());
        assert_eq!(score_location(&opportunity, &property, &policy).score, 0.0);
    }

    #[test]
    fn test_location_insufficient_data() {
        let policy = ScoringPolicy::default();
        let mut property = create_property();
        property.location = None;
        let score = score_location(&create_opportunity(), &property, &policy);
        assert_eq!(score.score, 50.0);
        assert!(score.reasons[0].starts_with("insufficient data"));
    }

    #[test]
    fn test_space_within_range() {
        let policy = ScoringPolicy::default();
        assert_eq!(score_space(&create_opportunity(), &create_property(), &policy).score, 100.0);
    }

    #[test]
    fn test_space_undersized() {
        let policy = ScoringPolicy::default();
        let mut property = create_property();
        property.available_sqft = Some(8_000);

        let score = score_space(&create_opportunity(), &property, &policy);
        assert_eq!(score.score, 80.0);
        assert!(score.reasons[0].contains("20% under minimum"));
    }

    #[test]
    fn test_space_oversized_is_penalized_but_not_zero() {
        let policy = ScoringPolicy::default();
        let mut property = create_property();

        property.available_sqft = Some(30_000);
        let half_over = score_space(&create_opportunity(), &property, &policy);
        assert_eq!(half_over.score, 75.0);

        property.available_sqft = Some(200_000);
        let huge = score_space(&create_opportunity(), &property, &policy);
        assert_eq!(huge.score, policy.oversize_floor);
        assert!(huge.score > 0.0);
    }

    #[test]
    fn test_space_without_requirement() {
        let policy = ScoringPolicy::default();
        let mut opportunity = create_opportunity();
        opportunity.min_sqft = None;
        opportunity.max_sqft = None;
        assert_eq!(score_space(&opportunity, &create_property(), &policy).score, 50.0);
    }

    #[test]
    fn test_building_classes() {
        let policy = ScoringPolicy::default();
        let mut opportunity = create_opportunity();
        let mut property = create_property();

        property.building_class = Some(BuildingClass::C);
        let score = score_building(&opportunity, &property, &policy);
        assert_eq!(score.score, 20.0);
        assert_eq!(score.reasons, vec!["class C offered, class A required"]);

        opportunity.building_class = Some(BuildingClass::C);
        property.building_class = Some(BuildingClass::A);
        assert_eq!(score_building(&opportunity, &property, &policy).score, 100.0);

        property.building_class = None;
        assert_eq!(score_building(&opportunity, &property, &policy).score, 50.0);
    }

    #[test]
    fn test_timeline_decay() {
        let policy = ScoringPolicy::default();
        let mut property = create_property();
        assert_eq!(score_timeline(&create_opportunity(), &property, &policy).score, 100.0);

        property.available_date = Some(date(2025, 6, 1));
        assert_eq!(score_timeline(&create_opportunity(), &property, &policy).score, 100.0);

        // 90 days late is halfway to the 180 day limit
        property.available_date = Some(date(2025, 8, 30));
        let late = score_timeline(&create_opportunity(), &property, &policy);
        assert_eq!(late.score, 50.0);
        assert!(late.reasons[0].starts_with("available 90 days after"));

        property.available_date = Some(date(2026, 6, 1));
        assert_eq!(score_timeline(&create_opportunity(), &property, &policy).score, 0.0);
    }

    #[test]
    fn test_experience_is_saturating() {
        let policy = ScoringPolicy::default();
        let mut property = create_property();

        property.broker.closed_transactions = Some(0);
        assert_eq!(score_experience(&property, &policy).score, 50.0);

        property.broker.closed_transactions = Some(3);
        assert_eq!(score_experience(&property, &policy).score, 75.0);

        let mut previous = 0.0;
        for closed in [0, 1, 2, 5, 10, 50, 1000] {
            property.broker.closed_transactions = Some(closed);
            let score = score_experience(&property, &policy).score;
            assert!(score >= previous && score <= 100.0);
            previous = score;
        }
    }
}
