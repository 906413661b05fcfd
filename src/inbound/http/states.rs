//! State directory endpoints.
//!
//! ```text
//! GET /api/states
//! GET /api/states/{stateCode}
//! ```

use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{DistrictDto, Envelope, ErrorSchema, StateDto};
use crate::inbound::http::state::HttpState;

/// A state with its district count.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StateListEntryDto {
    #[serde(flatten)]
    pub state: StateDto,
    pub district_count: u64,
}

/// A state with its full district list.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StateDetailDto {
    #[serde(flatten)]
    pub state: StateDto,
    pub districts: Vec<DistrictDto>,
}

/// List all states, name-ascending, with district counts.
#[utoipa::path(
    get,
    path = "/api/states",
    responses(
        (status = 200, description = "States with district counts"),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["states"],
    operation_id = "listStates"
)]
#[get("/states")]
pub async fn list_states(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let states = state
        .directory
        .states_with_district_counts()
        .await
        .map_err(|error| Error::service_unavailable(error.to_string()))?;

    let payload: Vec<StateListEntryDto> = states
        .into_iter()
        .map(|entry| StateListEntryDto {
            state: entry.state.into(),
            district_count: entry.district_count,
        })
        .collect();
    Ok(HttpResponse::Ok().json(Envelope::data(payload)))
}

/// Fetch one state with its districts.
#[utoipa::path(
    get,
    path = "/api/states/{stateCode}",
    params(("stateCode" = String, Path, description = "Natural state code")),
    responses(
        (status = 200, description = "State with districts"),
        (status = 404, description = "Unknown state", body = ErrorSchema)
    ),
    tags = ["states"],
    operation_id = "getState"
)]
#[get("/states/{stateCode}")]
pub async fn get_state(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let state_code = path.into_inner();
    let found = state
        .directory
        .state_with_districts(&state_code)
        .await
        .map_err(|error| Error::service_unavailable(error.to_string()))?
        .ok_or_else(|| Error::not_found("State not found"))?;

    let payload = StateDetailDto {
        state: found.state.into(),
        districts: found.districts.into_iter().map(Into::into).collect(),
    };
    Ok(HttpResponse::Ok().json(Envelope::data(payload)))
}
