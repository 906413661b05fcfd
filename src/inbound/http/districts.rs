//! District directory endpoints.
//!
//! ```text
//! GET /api/districts?stateCode=
//! GET /api/districts/{districtCode}
//! ```

use actix_web::{HttpResponse, get, web};
use serde::Deserialize;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{DistrictWithStateDto, Envelope, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// Optional filter for the district listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictListQuery {
    pub state_code: Option<String>,
}

/// List districts, optionally restricted to one state.
#[utoipa::path(
    get,
    path = "/api/districts",
    params(("stateCode" = Option<String>, Query, description = "Restrict to one state")),
    responses(
        (status = 200, description = "Districts with parent states"),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["districts"],
    operation_id = "listDistricts"
)]
#[get("/districts")]
pub async fn list_districts(
    state: web::Data<HttpState>,
    query: web::Query<DistrictListQuery>,
) -> ApiResult<HttpResponse> {
    let districts = state
        .directory
        .districts(query.state_code.clone())
        .await
        .map_err(|error| Error::service_unavailable(error.to_string()))?;

    let payload: Vec<DistrictWithStateDto> =
        districts.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(Envelope::data(payload)))
}

/// Fetch one district with its parent state.
#[utoipa::path(
    get,
    path = "/api/districts/{districtCode}",
    params(("districtCode" = String, Path, description = "Natural district code")),
    responses(
        (status = 200, description = "District with parent state"),
        (status = 404, description = "Unknown district", body = ErrorSchema)
    ),
    tags = ["districts"],
    operation_id = "getDistrict"
)]
#[get("/districts/{districtCode}")]
pub async fn get_district(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let district_code = path.into_inner();
    let found = state
        .directory
        .district(&district_code)
        .await
        .map_err(|error| Error::service_unavailable(error.to_string()))?
        .ok_or_else(|| Error::not_found("District not found"))?;

    let payload: DistrictWithStateDto = found.into();
    Ok(HttpResponse::Ok().json(Envelope::data(payload)))
}
