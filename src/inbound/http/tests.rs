//! Endpoint behaviour tests against mocked ports.

use std::sync::Arc;

use actix_web::{App, test, web};
use serde_json::{Value, json};

use crate::domain::observation::{
    DistrictRecord, DistrictWithState, Observation, ObservationFields, ObservationKey,
    ObservationWithDistrict, StateRecord,
};
use crate::domain::ports::{
    MockChatAssistant, MockDirectoryQuery, MockDistrictLocator, MockObservationQuery,
    MockSyncJobQueue, MockSyncRunRepository, ObservationPage, StateWithDistrictCount, SyncJob,
};

use super::state::HttpState;

fn state_record() -> StateRecord {
    StateRecord {
        code: "18".to_owned(),
        name: "MAHARASHTRA".to_owned(),
    }
}

fn district_with_state() -> DistrictWithState {
    DistrictWithState {
        district: DistrictRecord {
            code: "1808".to_owned(),
            name: "PUNE".to_owned(),
            state_code: "18".to_owned(),
        },
        state: state_record(),
    }
}

fn observation() -> ObservationWithDistrict {
    ObservationWithDistrict {
        observation: Observation {
            id: uuid::Uuid::nil(),
            key: ObservationKey {
                district_code: "1808".to_owned(),
                fin_year: "2025-2026".to_owned(),
                month: "05".to_owned(),
            },
            fields: ObservationFields {
                women_persondays: Some(
                    "9007199254740993".parse().expect("valid decimal"),
                ),
                average_wage_rate_per_day_per_person: Some(245.0),
                ..ObservationFields::default()
            },
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        },
        district: district_with_state().district,
        state: state_record(),
    }
}

struct StateBuilder {
    directory: MockDirectoryQuery,
    observations: MockObservationQuery,
    sync_runs: MockSyncRunRepository,
    sync_jobs: MockSyncJobQueue,
    locator: MockDistrictLocator,
    assistant: MockChatAssistant,
}

impl StateBuilder {
    fn new() -> Self {
        Self {
            directory: MockDirectoryQuery::new(),
            observations: MockObservationQuery::new(),
            sync_runs: MockSyncRunRepository::new(),
            sync_jobs: MockSyncJobQueue::new(),
            locator: MockDistrictLocator::new(),
            assistant: MockChatAssistant::new(),
        }
    }

    fn build(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            directory: Arc::new(self.directory),
            observations: Arc::new(self.observations),
            sync_runs: Arc::new(self.sync_runs),
            sync_jobs: Arc::new(self.sync_jobs),
            locator: Arc::new(self.locator),
            assistant: Arc::new(self.assistant),
        })
    }
}

async fn call(
    state: web::Data<HttpState>,
    request: test::TestRequest,
) -> (u16, Value) {
    let app =
        test::init_service(App::new().app_data(state).configure(super::configure)).await;
    let response = test::call_service(&app, request.to_request()).await;
    let status = response.status().as_u16();
    let body = test::read_body(response).await;
    let parsed: Value = serde_json::from_slice(&body).expect("json body");
    (status, parsed)
}

#[actix_web::test]
async fn states_list_wraps_payload_in_success_envelope() {
    let mut builder = StateBuilder::new();
    builder.directory.expect_states_with_district_counts().returning(|| {
        Ok(vec![StateWithDistrictCount {
            state: state_record(),
            district_count: 34,
        }])
    });

    let (status, body) = call(builder.build(), test::TestRequest::get().uri("/api/states")).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"][0]["stateCode"], "18");
    assert_eq!(body["data"][0]["districtCount"], 34);
}

#[actix_web::test]
async fn unknown_state_renders_not_found_envelope() {
    let mut builder = StateBuilder::new();
    builder
        .directory
        .expect_state_with_districts()
        .returning(|_| Ok(None));

    let (status, body) =
        call(builder.build(), test::TestRequest::get().uri("/api/states/99")).await;
    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "State not found");
}

#[actix_web::test]
async fn observation_listing_reports_paging_and_decimal_strings() {
    let mut builder = StateBuilder::new();
    builder
        .observations
        .expect_observations()
        .withf(|_, limit, offset| *limit == 100 && *offset == 0)
        .returning(|_, _, _| {
            Ok(ObservationPage {
                records: vec![observation()],
                total: 240,
            })
        });

    let (status, body) = call(
        builder.build(),
        test::TestRequest::get().uri("/api/mgnrega-data?districtCode=1808"),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["total"], 240);
    assert_eq!(body["limit"], 100);
    assert_eq!(body["data"][0]["womenPersondays"], "9007199254740993");
    assert_eq!(body["data"][0]["district"]["state"]["stateName"], "MAHARASHTRA");
}

#[actix_web::test]
async fn oversized_limit_is_rejected() {
    let (status, body) = call(
        StateBuilder::new().build(),
        test::TestRequest::get().uri("/api/mgnrega-data?limit=5000"),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn comparison_aggregates_exclude_absent_wage_rates() {
    let mut builder = StateBuilder::new();
    builder.observations.expect_district_year().returning(|_, _| {
        let mut first = observation();
        first.observation.fields.average_wage_rate_per_day_per_person = Some(200.0);
        let mut second = observation();
        second.observation.fields.average_wage_rate_per_day_per_person = None;
        second.observation.key.month = "06".to_owned();
        Ok(vec![first, second])
    });
    builder
        .observations
        .expect_available_years()
        .returning(|_| Ok(vec!["2025-2026".to_owned(), "2024-2025".to_owned()]));

    let (status, body) = call(
        builder.build(),
        test::TestRequest::get().uri("/api/mgnrega-data/comparison/1808?finYear=2025-2026"),
    )
    .await;
    assert_eq!(status, 200);
    let aggregates = &body["data"]["currentYearAggregates"];
    // Only the month that reported a rate contributes to the mean.
    assert_eq!(aggregates["averageWageRate"], 200.0);
    assert_eq!(body["data"]["availableYears"][0], "2025-2026");
}

#[actix_web::test]
async fn sync_state_requires_a_state_name() {
    let (status, body) = call(
        StateBuilder::new().build(),
        test::TestRequest::post()
            .uri("/api/sync/state")
            .set_json(json!({ "stateName": "  " })),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "State name is required");
}

#[actix_web::test]
async fn sync_state_submits_job_and_returns_immediately() {
    let mut builder = StateBuilder::new();
    builder
        .sync_jobs
        .expect_submit()
        .withf(|job| {
            matches!(
                job,
                SyncJob::State { state_name, fin_year }
                    if state_name == "MAHARASHTRA" && fin_year.as_deref() == Some("2025-2026")
            )
        })
        .times(1)
        .returning(|_| Ok(()));

    let (status, body) = call(
        builder.build(),
        test::TestRequest::post()
            .uri("/api/sync/state")
            .set_json(json!({ "stateName": "MAHARASHTRA", "finYear": "2025-2026" })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Sync started in background");
}

#[actix_web::test]
async fn detect_district_requires_both_coordinates() {
    let (status, body) = call(
        StateBuilder::new().build(),
        test::TestRequest::post()
            .uri("/api/location/detect-district")
            .set_json(json!({ "latitude": 18.52 })),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Latitude and longitude are required");
}

#[actix_web::test]
async fn chatbot_rejects_blank_messages() {
    let (status, body) = call(
        StateBuilder::new().build(),
        test::TestRequest::post()
            .uri("/api/chatbot")
            .set_json(json!({ "message": "" })),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Message is required");
}
