//! Driven port for reverse geocoding coordinates into address text.

use async_trait::async_trait;

/// Address components extracted from one reverse-geocode response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeocodedPlace {
    /// District-level component, when the provider reported one.
    pub district: Option<String>,
    /// State-level component.
    pub state: Option<String>,
    /// Full display text of the resolved address.
    pub display_name: Option<String>,
}

/// Errors surfaced while reverse geocoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReverseGeocoderError {
    /// Network transport failed before receiving a response.
    #[error("reverse geocode transport failed: {message}")]
    Transport { message: String },
    /// The response body could not be decoded.
    #[error("reverse geocode response decode failed: {message}")]
    Decode { message: String },
}

impl ReverseGeocoderError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Port resolving WGS84 coordinates to address components.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Resolve one coordinate pair.
    async fn reverse(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<GeocodedPlace, ReverseGeocoderError>;
}
