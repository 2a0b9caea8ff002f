use crate::models::ReferencePoint;
use serde::Serialize;
use std::future::Future;
use thiserror::Error;

/// Why a position could not be obtained
///
/// The `Display` text is what the filter bar shows to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GeolocationError {
    #[error("Permissão de localização negada")]
    PermissionDenied,

    #[error("Localização indisponível")]
    PositionUnavailable,

    #[error("Tempo limite excedido")]
    Timeout,

    #[error("Geolocalização não é suportada pelo seu navegador")]
    Unsupported,
}

/// Source of the user's current position
///
/// Each call resolves exactly once, with a point or a categorized failure.
pub trait Geolocator {
    fn current_position(
        &self,
    ) -> impl Future<Output = Result<ReferencePoint, GeolocationError>> + Send;
}

/// Geolocator answering with a preconfigured result
///
/// Used when the position is known up front (configured coordinates) and in tests.
#[derive(Debug, Clone)]
pub struct FixedGeolocator {
    result: Result<ReferencePoint, GeolocationError>,
}

impl FixedGeolocator {
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            result: Ok(ReferencePoint::new(latitude, longitude)),
        }
    }

    pub fn failing(error: GeolocationError) -> Self {
        Self { result: Err(error) }
    }

    /// No coordinates configured behaves like a platform without geolocation
    pub fn from_option(point: Option<ReferencePoint>) -> Self {
        Self {
            result: point.ok_or(GeolocationError::Unsupported),
        }
    }
}

impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<ReferencePoint, GeolocationError> {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            GeolocationError::PermissionDenied.to_string(),
            "Permissão de localização negada"
        );
        assert_eq!(GeolocationError::Timeout.to_string(), "Tempo limite excedido");
    }

    #[test]
    fn test_fixed_geolocator() {
        let point = tokio_test::block_on(FixedGeolocator::at(-23.55, -46.63).current_position());
        assert_eq!(tokio_test::assert_ok!(point), ReferencePoint::new(-23.55, -46.63));

        let missing = tokio_test::block_on(FixedGeolocator::from_option(None).current_position());
        assert_eq!(tokio_test::assert_err!(missing), GeolocationError::Unsupported);
    }
}
