//! OpenAPI document assembled from the handler annotations.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{
    DistrictDto, DistrictWithStateDto, ErrorSchema, ObservationDto, ObservationWithDistrictDto,
    StateDto,
};
use crate::inbound::http::{chatbot, districts, employment_data, health, location, states, sync};

/// Public OpenAPI surface served by Swagger UI in debug builds.
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        states::list_states,
        states::get_state,
        districts::list_districts,
        districts::get_district,
        employment_data::list_observations,
        employment_data::latest_observation,
        employment_data::comparison,
        employment_data::state_average,
        sync::sync_state,
        sync::sync_latest,
        sync::sync_status,
        location::detect_district,
        chatbot::chatbot,
    ),
    components(schemas(
        ErrorSchema,
        StateDto,
        DistrictDto,
        DistrictWithStateDto,
        ObservationDto,
        ObservationWithDistrictDto,
        states::StateListEntryDto,
        states::StateDetailDto,
        employment_data::ObservationListDto,
        employment_data::YearAggregatesDto,
        employment_data::ComparisonDto,
        employment_data::StateAveragesDto,
        sync::StateSyncRequestBody,
        sync::SyncRunDto,
        sync::SyncStatusDto,
        location::DetectDistrictRequestBody,
        location::DetectedLocationDto,
        location::DistrictDetectionDto,
        chatbot::ChatRequestBody,
        chatbot::ChatTurnBody,
        chatbot::NavigationTargetDto,
        chatbot::ChatReplyDto,
    )),
    tags(
        (name = "states", description = "State directory"),
        (name = "districts", description = "District directory"),
        (name = "mgnrega-data", description = "Employment observations"),
        (name = "sync", description = "Data synchronization"),
        (name = "location", description = "District detection"),
        (name = "chatbot", description = "AI assistant"),
    )
)]
pub struct ApiDoc;
