use thiserror::Error;

/// Precondition failures of the geo utilities
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("Invalid coordinate ({lat}, {lng}): latitude must lie in [-90, 90] and longitude in [-180, 180]")]
    InvalidCoordinate { lat: f64, lng: f64 },

    #[error("Invalid radius {0} km: radius must be positive")]
    InvalidRadius(f64),
}

/// Errors surfaced by the matching engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<GeoError> for EngineError {
    fn from(err: GeoError) -> Self {
        EngineError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_errors_surface_as_invalid_input() {
        let err: EngineError = GeoError::InvalidRadius(0.0).into();
        match err {
            EngineError::InvalidInput(message) => assert!(message.contains("radius")),
        }
    }
}
