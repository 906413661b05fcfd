//! Reqwest-backed Nominatim reverse-geocoding adapter.
//!
//! Nominatim's usage policy requires an identifying User-Agent; requests
//! without one are rejected.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::domain::ports::{GeocodedPlace, ReverseGeocoder, ReverseGeocoderError};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_USER_AGENT: &str = "mgnrega-dashboard/1.0";

/// Reverse geocoder backed by a Nominatim endpoint.
pub struct NominatimReverseGeocoder {
    client: Client,
    endpoint: Url,
}

impl NominatimReverseGeocoder {
    /// Build an adapter for the given `/reverse` endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self { client, endpoint })
    }
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddressDto {
    #[serde(default)]
    state_district: Option<String>,
    #[serde(default)]
    county: Option<String>,
    #[serde(default)]
    district: Option<String>,
    #[serde(default)]
    state: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimResponseDto {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    address: Option<NominatimAddressDto>,
}

impl From<NominatimResponseDto> for GeocodedPlace {
    fn from(dto: NominatimResponseDto) -> Self {
        let address = dto.address.unwrap_or_default();
        Self {
            // Nominatim reports the district under different keys depending
            // on the region; take the most specific one present.
            district: address
                .state_district
                .or(address.county)
                .or(address.district),
            state: address.state,
            display_name: dto.display_name,
        }
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimReverseGeocoder {
    async fn reverse(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<GeocodedPlace, ReverseGeocoderError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("format", "json".to_owned()),
                ("addressdetails", "1".to_owned()),
            ])
            .send()
            .await
            .map_err(|error| ReverseGeocoderError::transport(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReverseGeocoderError::transport(format!(
                "status {}",
                status.as_u16()
            )));
        }

        let decoded: NominatimResponseDto = response.json().await.map_err(|error| {
            ReverseGeocoderError::decode(format!("invalid Nominatim payload: {error}"))
        })?;
        Ok(decoded.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_state_district_over_county() {
        let dto = NominatimResponseDto {
            display_name: Some("Pune, Maharashtra, India".to_owned()),
            address: Some(NominatimAddressDto {
                state_district: Some("Pune District".to_owned()),
                county: Some("Haveli".to_owned()),
                district: None,
                state: Some("Maharashtra".to_owned()),
            }),
        };
        let place: GeocodedPlace = dto.into();
        assert_eq!(place.district.as_deref(), Some("Pune District"));
        assert_eq!(place.state.as_deref(), Some("Maharashtra"));
    }

    #[test]
    fn falls_back_through_county_and_district_keys() {
        let dto = NominatimResponseDto {
            display_name: None,
            address: Some(NominatimAddressDto {
                state_district: None,
                county: None,
                district: Some("Ludhiana".to_owned()),
                state: Some("Punjab".to_owned()),
            }),
        };
        let place: GeocodedPlace = dto.into();
        assert_eq!(place.district.as_deref(), Some("Ludhiana"));
    }

    #[test]
    fn missing_address_yields_empty_place() {
        let place: GeocodedPlace = NominatimResponseDto::default().into();
        assert_eq!(place.district, None);
        assert_eq!(place.state, None);
    }
}
