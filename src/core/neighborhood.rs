use std::f64::consts::PI;

use crate::core::distance::{
    calculate_bounding_box, distance, is_within_bounding_box, validate_point, validate_radius,
};
use crate::core::error::GeoError;
use crate::models::{round_score, GeoPoint, NearbyProperty, NeighborhoodScore, ReferenceProperty};

/// Score an area by how many federally-associated properties lie within `radius_km`
///
/// # Pipeline Stages
/// 1. Bounding box pre-filter
/// 2. Exact radius check
/// 3. Density (count per km²) mapped through `1 - e^(-density / saturation)`
/// 4. Contributors sorted nearest first, ties by id
///
/// Inventory entries with out-of-range coordinates are skipped.
pub fn score_neighborhood(
    center: &GeoPoint,
    radius_km: f64,
    inventory: &[ReferenceProperty],
    saturation_density: f64,
) -> Result<NeighborhoodScore, GeoError> {
    validate_point(center)?;
    validate_radius(radius_km)?;

    let bbox = calculate_bounding_box(center, radius_km);

    let mut properties: Vec<NearbyProperty> = inventory
        .iter()
        .filter(|reference| is_within_bounding_box(&reference.location, &bbox))
        .filter_map(|reference| {
            let distance_km = match distance(center, &reference.location) {
                Ok(d) => d,
                Err(e) => {
                    tracing::debug!("Skipping reference property {}: {}", reference.id, e);
                    return None;
                }
            };
            (distance_km <= radius_km).then(|| NearbyProperty {
                id: reference.id.clone(),
                name: reference.name.clone(),
                agency: reference.agency.clone(),
                distance_km,
            })
        })
        .collect();

    properties.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then_with(|| a.id.cmp(&b.id))
    });

    let count = properties.len();
    let density = count as f64 / (PI * radius_km * radius_km);
    let score = density_score(density, saturation_density);

    Ok(NeighborhoodScore {
        center: *center,
        radius_km,
        count,
        density,
        score,
        properties,
    })
}

/// Saturating 0-100 curve over density; zero density scores 0
#[inline]
pub fn density_score(density: f64, saturation_density: f64) -> f64 {
    if density <= 0.0 {
        return 0.0;
    }
    round_score(100.0 * (1.0 - (-density / saturation_density).exp()))
}
