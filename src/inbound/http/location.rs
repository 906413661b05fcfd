//! Geolocation-based district detection endpoint.
//!
//! ```text
//! POST /api/location/detect-district
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{DistrictWithStateDto, Envelope, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// Request body carrying the device coordinates.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetectDistrictRequestBody {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// The address names the geocoder reported.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetectedLocationDto {
    pub district: String,
    pub state: String,
    pub full: Option<String>,
}

/// Detection payload: the matched district and how it was found.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DistrictDetectionDto {
    pub district: DistrictWithStateDto,
    pub detected_location: DetectedLocationDto,
    pub fuzzy_match: bool,
}

/// Detect the district containing the given coordinates.
#[utoipa::path(
    post,
    path = "/api/location/detect-district",
    request_body = DetectDistrictRequestBody,
    responses(
        (status = 200, description = "District detected", body = DistrictDetectionDto),
        (status = 400, description = "Missing coordinates", body = ErrorSchema),
        (status = 404, description = "No district matched", body = ErrorSchema)
    ),
    tags = ["location"],
    operation_id = "detectDistrict"
)]
#[post("/location/detect-district")]
pub async fn detect_district(
    state: web::Data<HttpState>,
    body: web::Json<DetectDistrictRequestBody>,
) -> ApiResult<HttpResponse> {
    let (Some(latitude), Some(longitude)) = (body.latitude, body.longitude) else {
        return Err(Error::invalid_request(
            "Latitude and longitude are required",
        ));
    };

    let detection = state.locator.detect(latitude, longitude).await?;

    let payload = DistrictDetectionDto {
        district: detection.district.into(),
        detected_location: DetectedLocationDto {
            district: detection.detected.district,
            state: detection.detected.state,
            full: detection.detected.full,
        },
        fuzzy_match: detection.fuzzy,
    };
    Ok(HttpResponse::Ok().json(Envelope::data(payload)))
}
