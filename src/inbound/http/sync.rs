//! Sync trigger and status endpoints.
//!
//! ```text
//! POST /api/sync/state
//! POST /api/sync/latest
//! GET  /api/sync/status
//! ```
//!
//! Triggers submit a background job and return immediately; progress is
//! visible only through the audit log served by the status endpoint.

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::ports::{SyncJob, SyncRunRecord};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{Envelope, ErrorSchema};
use crate::inbound::http::state::HttpState;

const RECENT_RUN_LIMIT: i64 = 10;

/// Request body for a state-scoped sync.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StateSyncRequestBody {
    pub state_name: String,
    pub fin_year: Option<String>,
}

/// One audit-log row.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncRunDto {
    #[schema(value_type = String, format = "uuid")]
    pub id: Uuid,
    pub sync_type: String,
    pub status: String,
    pub record_count: Option<u64>,
    pub error_msg: Option<String>,
    #[schema(value_type = String, format = "date-time")]
    pub started_at: DateTime<Utc>,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<SyncRunRecord> for SyncRunDto {
    fn from(record: SyncRunRecord) -> Self {
        Self {
            id: record.id,
            sync_type: record.run_type,
            status: record.status,
            record_count: record.record_count,
            error_msg: record.error_message,
            started_at: record.started_at,
            completed_at: record.completed_at,
        }
    }
}

/// Status payload: recent runs, last success, table sizes.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatusDto {
    pub recent_syncs: Vec<SyncRunDto>,
    pub last_successful_sync: Option<SyncRunDto>,
    pub total_records: u64,
    pub total_states: u64,
    pub total_districts: u64,
}

/// Trigger a background sync for one state.
#[utoipa::path(
    post,
    path = "/api/sync/state",
    request_body = StateSyncRequestBody,
    responses(
        (status = 200, description = "Sync submitted"),
        (status = 400, description = "Missing state name", body = ErrorSchema)
    ),
    tags = ["sync"],
    operation_id = "syncState"
)]
#[post("/sync/state")]
pub async fn sync_state(
    state: web::Data<HttpState>,
    body: web::Json<StateSyncRequestBody>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    let state_name = body.state_name.trim().to_owned();
    if state_name.is_empty() {
        return Err(Error::invalid_request("State name is required"));
    }

    state
        .sync_jobs
        .submit(SyncJob::State {
            state_name,
            fin_year: body.fin_year,
        })
        .await
        .map_err(|error| Error::service_unavailable(error.to_string()))?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Sync started in background",
    })))
}

/// Trigger a background sync of the current financial year.
#[utoipa::path(
    post,
    path = "/api/sync/latest",
    responses((status = 200, description = "Sync submitted")),
    tags = ["sync"],
    operation_id = "syncLatest"
)]
#[post("/sync/latest")]
pub async fn sync_latest(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    state
        .sync_jobs
        .submit(SyncJob::Latest)
        .await
        .map_err(|error| Error::service_unavailable(error.to_string()))?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Latest data sync started in background",
    })))
}

/// Recent run history and dataset counts.
#[utoipa::path(
    get,
    path = "/api/sync/status",
    responses(
        (status = 200, description = "Sync status", body = SyncStatusDto),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["sync"],
    operation_id = "syncStatus"
)]
#[get("/sync/status")]
pub async fn sync_status(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let recent = state
        .sync_runs
        .recent_runs(RECENT_RUN_LIMIT)
        .await
        .map_err(|error| Error::service_unavailable(error.to_string()))?;
    let last_successful = state
        .sync_runs
        .last_successful()
        .await
        .map_err(|error| Error::service_unavailable(error.to_string()))?;
    let counts = state
        .sync_runs
        .dataset_counts()
        .await
        .map_err(|error| Error::service_unavailable(error.to_string()))?;

    let payload = SyncStatusDto {
        recent_syncs: recent.into_iter().map(Into::into).collect(),
        last_successful_sync: last_successful.map(Into::into),
        total_records: counts.records,
        total_states: counts.states,
        total_districts: counts.districts,
    };
    Ok(HttpResponse::Ok().json(Envelope::data(payload)))
}
