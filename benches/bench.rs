// Criterion benchmarks for FedLease Match

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fedlease_match::core::{
    distance::{calculate_bounding_box, haversine_distance},
    MatchEngine,
};
use fedlease_match::models::{
    BrokerContact, BuildingClass, GeoPoint, ListingStatus, LocationConstraint, Opportunity, Property,
    ReferenceProperty,
};

fn create_property(id: usize, lat: f64, lng: f64) -> Property {
    let classes = [BuildingClass::A, BuildingClass::B, BuildingClass::C];
    Property {
        id: format!("prop-{:05}", id),
        version: 1,
        title: Some(format!("Suite {}", id)),
        available_sqft: Some(8_000 + (id % 40) as u32 * 500),
        building_class: Some(classes[id % 3]),
        location: Some(GeoPoint::new(lat, lng)),
        city: Some("Washington".to_string()),
        state: Some("DC".to_string()),
        available_date: NaiveDate::from_ymd_opt(2025, 1 + (id % 12) as u32, 1),
        lease_type: None,
        broker: BrokerContact {
            closed_transactions: Some((id % 15) as u32),
            ..Default::default()
        },
        status: ListingStatus::Active,
    }
}

fn create_opportunity() -> Opportunity {
    Opportunity {
        id: "opp-bench".to_string(),
        version: 1,
        solicitation_number: None,
        agency: None,
        min_sqft: Some(15_000),
        max_sqft: Some(25_000),
        occupancy_date: NaiveDate::from_ymd_opt(2025, 6, 1),
        location: LocationConstraint {
            state: Some("DC".to_string()),
            city: None,
            center: Some(GeoPoint::new(38.90, -77.03)),
            radius_miles: Some(10.0),
        },
        building_class: Some(BuildingClass::A),
    }
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(38.90),
                black_box(-77.03),
                black_box(38.95),
                black_box(-77.10),
            )
        });
    });
}

fn bench_bounding_box(c: &mut Criterion) {
    let center = GeoPoint::new(38.90, -77.03);
    c.bench_function("bounding_box_calculation", |b| {
        b.iter(|| calculate_bounding_box(black_box(&center), black_box(8.0)));
    });
}

fn bench_score_pair(c: &mut Criterion) {
    let engine = MatchEngine::with_default_policy();
    let opportunity = create_opportunity();
    let property = create_property(7, 38.93, -77.05);

    c.bench_function("score_pair", |b| {
        b.iter(|| engine.score_pair(black_box(&opportunity), black_box(&property)));
    });
}

fn bench_score_batch(c: &mut Criterion) {
    let engine = MatchEngine::with_default_policy();
    let opportunity = create_opportunity();

    let mut group = c.benchmark_group("score_batch");

    for property_count in [10, 100, 1000, 5000].iter() {
        let properties: Vec<Property> = (0..*property_count)
            .map(|i| {
                let lat_offset = (i as f64 * 0.001) % 0.5;
                let lng_offset = (i as f64 * 0.0007) % 0.5;
                create_property(i, 38.70 + lat_offset, -77.25 + lng_offset)
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::new("score_batch", property_count),
            property_count,
            |b, _| {
                b.iter(|| engine.score_batch(black_box(&opportunity), black_box(&properties)));
            },
        );
    }

    group.finish();
}

fn bench_neighborhood(c: &mut Criterion) {
    let engine = MatchEngine::with_default_policy();
    let center = GeoPoint::new(38.90, -77.03);
    let inventory: Vec<ReferenceProperty> = (0..2000)
        .map(|i| ReferenceProperty {
            id: format!("ref-{:05}", i),
            name: None,
            agency: None,
            location: GeoPoint::new(37.5 + (i as f64 * 0.0013) % 3.0, -78.5 + (i as f64 * 0.0017) % 3.0),
        })
        .collect();

    c.bench_function("neighborhood_2000_references", |b| {
        b.iter(|| engine.score_neighborhood(black_box(&center), black_box(8.0), black_box(&inventory)));
    });
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_bounding_box,
    bench_score_pair,
    bench_score_batch,
    bench_neighborhood
);

criterion_main!(benches);
