//! Geolocation-based district detection service.
//!
//! Reverse-geocodes the coordinates, cleans the returned names, and matches
//! them against the stored district directory.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::district_match::{clean_detected_district, match_district};
use crate::domain::ports::{
    DetectedPlace, DirectoryQuery, DistrictDetection, DistrictLocator, ReverseGeocoder,
};

/// Domain service implementing the district locator port.
#[derive(Clone)]
pub struct LocationDetectionService<G, D> {
    geocoder: Arc<G>,
    directory: Arc<D>,
}

impl<G, D> LocationDetectionService<G, D> {
    /// Create a new detection service.
    pub fn new(geocoder: Arc<G>, directory: Arc<D>) -> Self {
        Self {
            geocoder,
            directory,
        }
    }
}

#[async_trait]
impl<G, D> DistrictLocator for LocationDetectionService<G, D>
where
    G: ReverseGeocoder,
    D: DirectoryQuery,
{
    async fn detect(&self, latitude: f64, longitude: f64) -> Result<DistrictDetection, Error> {
        validate_coordinates(latitude, longitude)?;

        let place = self
            .geocoder
            .reverse(latitude, longitude)
            .await
            .map_err(|error| Error::service_unavailable(error.to_string()))?;

        let Some(raw_district) = place.district.as_deref().filter(|name| !name.is_empty())
        else {
            return Err(Error::not_found(
                "could not determine a district from this location",
            ));
        };
        let detected = DetectedPlace {
            district: clean_detected_district(raw_district),
            state: place
                .state
                .as_deref()
                .map(|name| name.trim().to_uppercase())
                .unwrap_or_default(),
            full: place.display_name.clone(),
        };

        let districts = self
            .directory
            .districts(None)
            .await
            .map_err(|error| Error::service_unavailable(error.to_string()))?;

        match match_district(&districts, &detected.district, &detected.state) {
            Some(matched) => Ok(DistrictDetection {
                district: matched.district.clone(),
                fuzzy: matched.fuzzy,
                detected,
            }),
            None => Err(Error::not_found(format!(
                "could not find district \"{}\" in the directory",
                detected.district
            ))),
        }
    }
}

fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), Error> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::invalid_request(
            "latitude must be finite and within [-90, 90]",
        ));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::invalid_request(
            "longitude must be finite and within [-180, 180]",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::observation::{DistrictRecord, DistrictWithState, StateRecord};
    use crate::domain::ports::{GeocodedPlace, MockDirectoryQuery, MockReverseGeocoder};

    fn directory_with_pune() -> MockDirectoryQuery {
        let mut directory = MockDirectoryQuery::new();
        directory.expect_districts().returning(|_| {
            Ok(vec![DistrictWithState {
                district: DistrictRecord {
                    code: "1808".to_owned(),
                    name: "PUNE".to_owned(),
                    state_code: "18".to_owned(),
                },
                state: StateRecord {
                    code: "18".to_owned(),
                    name: "MAHARASHTRA".to_owned(),
                },
            }])
        });
        directory
    }

    #[tokio::test]
    async fn resolves_geocoded_name_to_stored_district() {
        let mut geocoder = MockReverseGeocoder::new();
        geocoder.expect_reverse().returning(|_, _| {
            Ok(GeocodedPlace {
                district: Some("Pune District".to_owned()),
                state: Some("Maharashtra".to_owned()),
                display_name: Some("Pune, Maharashtra, India".to_owned()),
            })
        });

        let service =
            LocationDetectionService::new(Arc::new(geocoder), Arc::new(directory_with_pune()));
        let detection = service.detect(18.52, 73.85).await.expect("should match");
        assert_eq!(detection.district.district.code, "1808");
        assert!(!detection.fuzzy);
        assert_eq!(detection.detected.district, "PUNE");
    }

    #[tokio::test]
    async fn missing_district_component_is_not_found() {
        let mut geocoder = MockReverseGeocoder::new();
        geocoder.expect_reverse().returning(|_, _| {
            Ok(GeocodedPlace {
                district: None,
                state: Some("Maharashtra".to_owned()),
                display_name: None,
            })
        });

        let service =
            LocationDetectionService::new(Arc::new(geocoder), Arc::new(directory_with_pune()));
        let error = service.detect(18.52, 73.85).await.expect_err("no district");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn out_of_range_coordinates_are_rejected_before_geocoding() {
        let mut geocoder = MockReverseGeocoder::new();
        geocoder.expect_reverse().never();

        let service =
            LocationDetectionService::new(Arc::new(geocoder), Arc::new(MockDirectoryQuery::new()));
        let error = service.detect(91.0, 0.0).await.expect_err("bad latitude");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }
}
