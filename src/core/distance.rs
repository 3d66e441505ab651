use geo::{coord, Intersects, Point, Rect};

use crate::core::error::GeoError;
use crate::models::{BoundingBox, GeoPoint};

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

pub const KM_PER_MILE: f64 = 1.609344;

/// Calculate the Haversine distance between two points in kilometers
///
/// Inputs are not range-checked; use [`distance`] for validated points.
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.min(1.0).sqrt().atan2((1.0 - a).max(0.0).sqrt());

    EARTH_RADIUS_KM * c
}

/// Check that a point lies within [-90, 90] / [-180, 180]
pub fn validate_point(point: &GeoPoint) -> Result<(), GeoError> {
    if (-90.0..=90.0).contains(&point.lat) && (-180.0..=180.0).contains(&point.lng) {
        Ok(())
    } else {
        Err(GeoError::InvalidCoordinate {
            lat: point.lat,
            lng: point.lng,
        })
    }
}

/// Great-circle distance in kilometers between two validated points
pub fn distance(a: &GeoPoint, b: &GeoPoint) -> Result<f64, GeoError> {
    validate_point(a)?;
    validate_point(b)?;
    Ok(haversine_distance(a.lat, a.lng, b.lat, b.lng))
}

/// True iff `point` is at most `radius_km` from `center`
pub fn within_radius(center: &GeoPoint, point: &GeoPoint, radius_km: f64) -> Result<bool, GeoError> {
    validate_radius(radius_km)?;
    Ok(distance(center, point)? <= radius_km)
}

pub fn validate_radius(radius_km: f64) -> Result<(), GeoError> {
    if radius_km.is_finite() && radius_km > 0.0 {
        Ok(())
    } else {
        Err(GeoError::InvalidRadius(radius_km))
    }
}

#[inline]
pub fn miles_to_km(miles: f64) -> f64 {
    miles * KM_PER_MILE
}

#[inline]
pub fn km_to_miles(km: f64) -> f64 {
    km / KM_PER_MILE
}

/// Calculate a bounding box around a center point
///
/// Much cheaper than Haversine, used as a pre-filter.
/// 1° latitude ≈ 111km. The longitude half-width is the exact extent of the spherical
/// cap, `asin(sin(r / R) / cos(latitude))`, which outgrows `r / (111km * cos(latitude))`
/// at high latitude. The box widens to the full longitude range when the cap reaches a
/// pole or crosses the antimeridian, so it never excludes a point within the radius.
pub fn calculate_bounding_box(center: &GeoPoint, radius_km: f64) -> BoundingBox {
    let lat_delta = radius_km / 111.0;
    let min_lat = (center.lat - lat_delta).max(-90.0);
    let max_lat = (center.lat + lat_delta).min(90.0);

    let cos_lat = center.lat.to_radians().cos().abs();
    let full_width = BoundingBox {
        min_lat,
        max_lat,
        min_lon: -180.0,
        max_lon: 180.0,
    };
    if min_lat <= -90.0 || max_lat >= 90.0 || cos_lat < 1e-9 {
        return full_width;
    }

    let ratio = (radius_km / EARTH_RADIUS_KM).sin() / cos_lat;
    if ratio >= 1.0 {
        return full_width;
    }

    // Small margin for float error at the edge
    let lon_delta = ratio.asin().to_degrees() * 1.0001;
    let (min_lon, max_lon) = (center.lng - lon_delta, center.lng + lon_delta);
    if min_lon < -180.0 || max_lon > 180.0 {
        return full_width;
    }

    BoundingBox {
        min_lat,
        max_lat,
        min_lon,
        max_lon,
    }
}

/// Check if a point is within a bounding box, edges included
#[inline]
pub fn is_within_bounding_box(point: &GeoPoint, bbox: &BoundingBox) -> bool {
    let rect = Rect::new(
        coord! { x: bbox.min_lon, y: bbox.min_lat },
        coord! { x: bbox.max_lon, y: bbox.max_lat },
    );
    Point::new(point.lng, point.lat).intersects(&rect)
}
