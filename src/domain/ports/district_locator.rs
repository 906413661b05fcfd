//! Driving port for geolocation-based district detection.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::observation::DistrictWithState;

/// The address names the geocoder reported, echoed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetectedPlace {
    pub district: String,
    pub state: String,
    pub full: Option<String>,
}

/// A successful district match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistrictDetection {
    /// The matched district with its parent state.
    pub district: DistrictWithState,
    /// What the geocoder actually said.
    pub detected: DetectedPlace,
    /// Whether the match relied on substring or word-overlap heuristics
    /// rather than an exact normalized name match.
    pub fuzzy: bool,
}

/// Port resolving coordinates to a stored district.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DistrictLocator: Send + Sync {
    /// Detect the district containing the given coordinates.
    async fn detect(&self, latitude: f64, longitude: f64) -> Result<DistrictDetection, Error>;
}
