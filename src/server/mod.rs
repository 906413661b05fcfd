//! Application wiring: constructs adapters, services, and the HTTP state.

pub mod config;

use std::sync::Arc;

use mockable::DefaultClock;

use crate::domain::chat::ChatService;
use crate::domain::location::LocationDetectionService;
use crate::domain::ports::SyncCommand;
use crate::domain::sync::DataSyncService;
use crate::inbound::http::state::HttpState;
use crate::outbound::chat::GeminiChatCompletion;
use crate::outbound::datagov::DataGovHttpSource;
use crate::outbound::geocode::NominatimReverseGeocoder;
use crate::outbound::persistence::{
    DbPool, DieselEmploymentIngestRepository, DieselEmploymentQueryRepository,
    DieselSyncRunRepository,
};
use crate::outbound::queue::TokioSyncJobQueue;
use config::AppConfig;

/// Errors raised while wiring the application.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// An outbound HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Completion stand-in used when no API key is configured; the chatbot
/// endpoint stays routable and reports the missing configuration.
struct UnconfiguredChatCompletion;

#[async_trait::async_trait]
impl crate::domain::ports::ChatCompletion for UnconfiguredChatCompletion {
    async fn generate(
        &self,
        _prompt: &str,
    ) -> Result<String, crate::domain::ports::ChatCompletionError> {
        Err(crate::domain::ports::ChatCompletionError::rejected(
            "GEMINI_API_KEY is not configured",
        ))
    }
}

/// Build the sync service over its concrete adapters.
pub fn build_sync_service(config: &AppConfig, pool: &DbPool) -> Result<Arc<dyn SyncCommand>, BuildError> {
    let source = DataGovHttpSource::new(
        config.datagov_endpoint.clone(),
        config.datagov_api_key.clone(),
    )?;
    let service = DataSyncService::new(
        Arc::new(source),
        Arc::new(DieselEmploymentIngestRepository::new(pool.clone())),
        Arc::new(DieselSyncRunRepository::new(pool.clone())),
        Arc::new(DefaultClock),
    );
    Ok(Arc::new(service))
}

/// Assemble the full HTTP dependency bundle.
pub fn build_http_state(config: &AppConfig, pool: &DbPool) -> Result<HttpState, BuildError> {
    let queries = Arc::new(DieselEmploymentQueryRepository::new(pool.clone()));
    let sync_runs = Arc::new(DieselSyncRunRepository::new(pool.clone()));

    let sync = build_sync_service(config, pool)?;
    let sync_jobs = Arc::new(TokioSyncJobQueue::new(sync));

    let geocoder = NominatimReverseGeocoder::new(config.nominatim_endpoint.clone())?;
    let locator = Arc::new(LocationDetectionService::new(
        Arc::new(geocoder),
        Arc::clone(&queries),
    ));

    let completion: Arc<dyn crate::domain::ports::ChatCompletion> =
        match config.gemini_api_key.clone() {
            Some(key) => Arc::new(GeminiChatCompletion::new(config.gemini_endpoint.clone(), key)?),
            None => {
                tracing::warn!("GEMINI_API_KEY is not set; chatbot endpoint will report it");
                Arc::new(UnconfiguredChatCompletion)
            }
        };
    let assistant = Arc::new(ChatService::new(completion, Arc::clone(&queries)));

    Ok(HttpState {
        directory: queries.clone(),
        observations: queries,
        sync_runs,
        sync_jobs,
        locator,
        assistant,
    })
}
