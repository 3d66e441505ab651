// Unit tests for FedLease Match

use chrono::NaiveDate;
use fedlease_match::core::{
    aggregate::{grade_for, tier_for},
    categories::{score_building, score_experience, score_space, score_timeline},
    distance::{distance, haversine_distance, within_radius},
    error::GeoError,
    neighborhood::score_neighborhood,
};
use fedlease_match::models::{
    BrokerContact, BuildingClass, GeoPoint, Grade, GradeBands, ListingStatus, LocationConstraint,
    Opportunity, Property, QualificationTier, ScoringPolicy, TierThresholds,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn create_opportunity(min_sqft: u32, max_sqft: u32, class: BuildingClass) -> Opportunity {
    Opportunity {
        id: "opp".to_string(),
        version: 1,
        solicitation_number: Some("9VA2301".to_string()),
        agency: Some("Department of Veterans Affairs".to_string()),
        min_sqft: Some(min_sqft),
        max_sqft: Some(max_sqft),
        occupancy_date: Some(date(2025, 6, 1)),
        location: LocationConstraint::default(),
        building_class: Some(class),
    }
}

fn create_property(sqft: u32, class: BuildingClass) -> Property {
    Property {
        id: "prop".to_string(),
        version: 1,
        title: Some("Suite 400".to_string()),
        available_sqft: Some(sqft),
        building_class: Some(class),
        location: Some(GeoPoint::new(38.90, -77.03)),
        city: None,
        state: None,
        available_date: Some(date(2025, 5, 1)),
        lease_type: None,
        broker: BrokerContact::default(),
        status: ListingStatus::Active,
    }
}

#[test]
fn test_haversine_distance_zero() {
    let distance = haversine_distance(40.7128, -74.0060, 40.7128, -74.0060);
    assert!(distance < 0.01);
}

#[test]
fn test_distance_symmetric_over_sample_points() {
    let points = [
        GeoPoint::new(38.90, -77.03),
        GeoPoint::new(-33.8688, 151.2093),
        GeoPoint::new(64.8378, -147.7164),
        GeoPoint::new(0.0, 179.9),
        GeoPoint::new(0.0, -179.9),
        GeoPoint::new(90.0, 0.0),
    ];

    for a in &points {
        assert_eq!(distance(a, a).unwrap(), 0.0);
        for b in &points {
            let ab = distance(a, b).unwrap();
            assert_eq!(ab, distance(b, a).unwrap());
            assert!(ab >= 0.0);
        }
    }
}

#[test]
fn test_distance_across_antimeridian_is_short() {
    let d = distance(&GeoPoint::new(0.0, 179.9), &GeoPoint::new(0.0, -179.9)).unwrap();
    assert!(d < 25.0, "Expected ~22km, got {}", d);
}

#[test]
fn test_within_radius_preconditions() {
    let center = GeoPoint::new(38.90, -77.03);
    assert_eq!(
        within_radius(&center, &GeoPoint::new(38.90, 200.0), 5.0),
        Err(GeoError::InvalidCoordinate { lat: 38.90, lng: 200.0 })
    );
    assert_eq!(within_radius(&center, &center, 0.0), Err(GeoError::InvalidRadius(0.0)));
}

#[test]
fn test_building_scorer_table() {
    let policy = ScoringPolicy::default();

    let exact = score_building(
        &create_opportunity(10_000, 20_000, BuildingClass::A),
        &create_property(15_000, BuildingClass::A),
        &policy,
    );
    assert_eq!(exact.score, 100.0);

    let two_below = score_building(
        &create_opportunity(10_000, 20_000, BuildingClass::A),
        &create_property(15_000, BuildingClass::C),
        &policy,
    );
    assert_eq!(two_below.score, 20.0);

    let above = score_building(
        &create_opportunity(10_000, 20_000, BuildingClass::C),
        &create_property(15_000, BuildingClass::A),
        &policy,
    );
    assert_eq!(above.score, 100.0);
}

#[test]
fn test_space_scorer() {
    let policy = ScoringPolicy::default();
    let opportunity = create_opportunity(10_000, 20_000, BuildingClass::A);

    let inside = score_space(&opportunity, &create_property(15_000, BuildingClass::A), &policy);
    assert_eq!(inside.score, 100.0);

    let under = score_space(&opportunity, &create_property(8_000, BuildingClass::A), &policy);
    assert!((under.score - 80.0).abs() < 0.5, "Expected ~80, got {}", under.score);

    let far_over = score_space(&opportunity, &create_property(35_000, BuildingClass::A), &policy);
    assert_eq!(far_over.score, 62.5);
}

#[test]
fn test_timeline_scorer_is_monotonic() {
    let policy = ScoringPolicy::default();
    let opportunity = create_opportunity(10_000, 20_000, BuildingClass::A);
    let mut property = create_property(15_000, BuildingClass::A);

    let mut previous = 100.0;
    for offset in [0, 10, 45, 90, 179, 180, 400] {
        property.available_date = Some(date(2025, 6, 1) + chrono::Duration::days(offset));
        let score = score_timeline(&opportunity, &property, &policy).score;
        assert!(score <= previous);
        assert!((0.0..=100.0).contains(&score));
        previous = score;
    }
    assert_eq!(previous, 0.0);
}

#[test]
fn test_experience_neutral_without_history() {
    let policy = ScoringPolicy::default();
    let mut property = create_property(15_000, BuildingClass::A);

    property.broker.closed_transactions = Some(0);
    assert_eq!(score_experience(&property, &policy).score, 50.0);

    property.broker.closed_transactions = None;
    assert_eq!(score_experience(&property, &policy).score, 50.0);

    property.broker.closed_transactions = Some(12);
    let seasoned = score_experience(&property, &policy).score;
    assert!(seasoned > 85.0 && seasoned < 100.0);
}

#[test]
fn test_tier_boundaries() {
    let thresholds = TierThresholds::default();
    assert_eq!(tier_for(85.0, &thresholds), QualificationTier::Competitive);
    assert_eq!(tier_for(84.9, &thresholds), QualificationTier::Qualified);
    assert_eq!(tier_for(69.9, &thresholds), QualificationTier::Marginal);
    assert_eq!(tier_for(54.9, &thresholds), QualificationTier::Unqualified);
}

#[test]
fn test_grade_boundaries() {
    let bands = GradeBands::default();
    assert_eq!(grade_for(90.0, &bands), Grade::A);
    assert_eq!(grade_for(89.9, &bands), Grade::B);
    assert_eq!(grade_for(60.0, &bands), Grade::D);
    assert_eq!(grade_for(59.9, &bands), Grade::F);
}

#[test]
fn test_neighborhood_empty_inventory() {
    let result = score_neighborhood(&GeoPoint::new(38.90, -77.03), 8.0, &[], 0.05).unwrap();
    assert_eq!(result.score, 0.0);
    assert!(result.properties.is_empty());
}
