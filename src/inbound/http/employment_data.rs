//! Employment observation endpoints: paged listing, latest record,
//! year comparison, and state averages.
//!
//! ```text
//! GET /api/mgnrega-data
//! GET /api/mgnrega-data/latest/{districtCode}
//! GET /api/mgnrega-data/comparison/{districtCode}
//! GET /api/mgnrega-data/state-average/{stateCode}
//! ```

use actix_web::{HttpResponse, get, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::aggregates::{StateAggregates, YearAggregates, state_aggregates, year_aggregates};
use crate::domain::ports::ObservationFilter;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{Envelope, ErrorSchema, ObservationWithDistrictDto};
use crate::inbound::http::state::HttpState;

const DEFAULT_PAGE_LIMIT: i64 = 100;
const MAX_PAGE_LIMIT: i64 = 1000;

/// Filters and paging for the observation listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationListQuery {
    pub district_code: Option<String>,
    pub fin_year: Option<String>,
    pub month: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Paged observation response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObservationListDto {
    pub success: bool,
    pub data: Vec<ObservationWithDistrictDto>,
    pub total: u64,
    pub limit: i64,
    pub offset: i64,
}

/// Year-to-date aggregates for one district year.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct YearAggregatesDto {
    #[serde(with = "rust_decimal::serde::str")]
    #[schema(value_type = String)]
    pub total_households_worked: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    #[schema(value_type = String)]
    pub total_individuals_worked: Decimal,
    pub total_expenditure: f64,
    pub average_wage_rate: Option<f64>,
    #[serde(with = "rust_decimal::serde::str")]
    #[schema(value_type = String)]
    pub total_works: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    #[schema(value_type = String)]
    pub completed_works: Decimal,
}

impl From<YearAggregates> for YearAggregatesDto {
    fn from(aggregates: YearAggregates) -> Self {
        Self {
            total_households_worked: aggregates.total_households_worked,
            total_individuals_worked: aggregates.total_individuals_worked,
            total_expenditure: aggregates.total_expenditure,
            average_wage_rate: aggregates.average_wage_rate,
            total_works: aggregates.total_works,
            completed_works: aggregates.completed_works,
        }
    }
}

/// Comparison payload: the year's months, its aggregates, and every year
/// with data.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonDto {
    pub current_year_data: Vec<ObservationWithDistrictDto>,
    pub current_year_aggregates: Option<YearAggregatesDto>,
    pub available_years: Vec<String>,
}

/// Cross-district aggregates for one state year.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StateAveragesDto {
    pub average_wage_rate: Option<f64>,
    pub average_days_of_employment: Option<f64>,
    #[serde(with = "rust_decimal::serde::str")]
    #[schema(value_type = String)]
    pub total_households_worked: Decimal,
    pub total_expenditure: f64,
    #[serde(with = "rust_decimal::serde::str")]
    #[schema(value_type = String)]
    pub total_works: Decimal,
}

impl From<StateAggregates> for StateAveragesDto {
    fn from(aggregates: StateAggregates) -> Self {
        Self {
            average_wage_rate: aggregates.average_wage_rate,
            average_days_of_employment: aggregates.average_days_of_employment,
            total_households_worked: aggregates.total_households_worked,
            total_expenditure: aggregates.total_expenditure,
            total_works: aggregates.total_works,
        }
    }
}

/// Optional financial-year scope shared by the comparison endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinYearQuery {
    pub fin_year: Option<String>,
}

/// Paged observation listing, newest period first.
#[utoipa::path(
    get,
    path = "/api/mgnrega-data",
    params(
        ("districtCode" = Option<String>, Query, description = "Restrict to one district"),
        ("finYear" = Option<String>, Query, description = "Restrict to one financial year"),
        ("month" = Option<String>, Query, description = "Restrict to one month"),
        ("limit" = Option<i64>, Query, description = "Page size, default 100"),
        ("offset" = Option<i64>, Query, description = "Page offset, default 0")
    ),
    responses(
        (status = 200, description = "Paged observations", body = ObservationListDto),
        (status = 400, description = "Invalid paging", body = ErrorSchema)
    ),
    tags = ["mgnrega-data"],
    operation_id = "listMgnregaData"
)]
#[get("/mgnrega-data")]
pub async fn list_observations(
    state: web::Data<HttpState>,
    query: web::Query<ObservationListQuery>,
) -> ApiResult<HttpResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
    let offset = query.offset.unwrap_or(0);
    if limit < 1 || limit > MAX_PAGE_LIMIT {
        return Err(Error::invalid_request(format!(
            "limit must be between 1 and {MAX_PAGE_LIMIT}"
        )));
    }
    if offset < 0 {
        return Err(Error::invalid_request("offset must not be negative"));
    }

    let filter = ObservationFilter {
        district_code: query.district_code.clone(),
        fin_year: query.fin_year.clone(),
        month: query.month.clone(),
    };
    let page = state
        .observations
        .observations(&filter, limit, offset)
        .await
        .map_err(|error| Error::service_unavailable(error.to_string()))?;

    Ok(HttpResponse::Ok().json(ObservationListDto {
        success: true,
        data: page.records.into_iter().map(Into::into).collect(),
        total: page.total,
        limit,
        offset,
    }))
}

/// Most recent observation for a district.
#[utoipa::path(
    get,
    path = "/api/mgnrega-data/latest/{districtCode}",
    params(("districtCode" = String, Path, description = "Natural district code")),
    responses(
        (status = 200, description = "Latest observation"),
        (status = 404, description = "District has no data", body = ErrorSchema)
    ),
    tags = ["mgnrega-data"],
    operation_id = "latestMgnregaData"
)]
#[get("/mgnrega-data/latest/{districtCode}")]
pub async fn latest_observation(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let district_code = path.into_inner();
    let latest = state
        .observations
        .latest_for_district(&district_code)
        .await
        .map_err(|error| Error::service_unavailable(error.to_string()))?
        .ok_or_else(|| Error::not_found("No data found for this district"))?;

    let payload: ObservationWithDistrictDto = latest.into();
    Ok(HttpResponse::Ok().json(Envelope::data(payload)))
}

/// All months of a district's year, with aggregates and available years.
#[utoipa::path(
    get,
    path = "/api/mgnrega-data/comparison/{districtCode}",
    params(
        ("districtCode" = String, Path, description = "Natural district code"),
        ("finYear" = Option<String>, Query, description = "Financial year to aggregate")
    ),
    responses(
        (status = 200, description = "Comparison payload", body = ComparisonDto)
    ),
    tags = ["mgnrega-data"],
    operation_id = "comparisonMgnregaData"
)]
#[get("/mgnrega-data/comparison/{districtCode}")]
pub async fn comparison(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<FinYearQuery>,
) -> ApiResult<HttpResponse> {
    let district_code = path.into_inner();

    let months = state
        .observations
        .district_year(&district_code, query.fin_year.clone())
        .await
        .map_err(|error| Error::service_unavailable(error.to_string()))?;
    let available_years = state
        .observations
        .available_years(&district_code)
        .await
        .map_err(|error| Error::service_unavailable(error.to_string()))?;

    let aggregates =
        year_aggregates(months.iter().map(|row| &row.observation.fields)).map(Into::into);
    let payload = ComparisonDto {
        current_year_data: months.into_iter().map(Into::into).collect(),
        current_year_aggregates: aggregates,
        available_years,
    };
    Ok(HttpResponse::Ok().json(Envelope::data(payload)))
}

/// Cross-district aggregates for one state year.
#[utoipa::path(
    get,
    path = "/api/mgnrega-data/state-average/{stateCode}",
    params(
        ("stateCode" = String, Path, description = "Natural state code"),
        ("finYear" = Option<String>, Query, description = "Financial year to aggregate")
    ),
    responses(
        (status = 200, description = "State aggregates, null when no data")
    ),
    tags = ["mgnrega-data"],
    operation_id = "stateAverageMgnregaData"
)]
#[get("/mgnrega-data/state-average/{stateCode}")]
pub async fn state_average(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<FinYearQuery>,
) -> ApiResult<HttpResponse> {
    let state_code = path.into_inner();
    let observations = state
        .observations
        .state_year(&state_code, query.fin_year.clone())
        .await
        .map_err(|error| Error::service_unavailable(error.to_string()))?;

    let payload: Option<StateAveragesDto> =
        state_aggregates(observations.iter().map(|row| &row.fields)).map(Into::into);
    Ok(HttpResponse::Ok().json(Envelope::data(payload)))
}
