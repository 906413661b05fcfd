//! Domain ports and supporting types for the hexagonal boundary.

mod chat_assistant;
mod chat_completion;
mod directory_query;
mod district_locator;
mod employment_ingest_repository;
mod observation_query;
mod reverse_geocoder;
mod statistics_source;
mod sync_command;
mod sync_job_queue;
mod sync_run_repository;

#[cfg(test)]
pub use chat_assistant::MockChatAssistant;
pub use chat_assistant::{ChatAssistant, ChatReply, ChatRequest, ChatTurn, NavigationTarget};
#[cfg(test)]
pub use chat_completion::MockChatCompletion;
pub use chat_completion::{ChatCompletion, ChatCompletionError};
#[cfg(test)]
pub use directory_query::MockDirectoryQuery;
pub use directory_query::{
    DirectoryQuery, DirectoryQueryError, FixtureDirectoryQuery, StateWithDistrictCount,
    StateWithDistricts,
};
#[cfg(test)]
pub use district_locator::MockDistrictLocator;
pub use district_locator::{DetectedPlace, DistrictDetection, DistrictLocator};
#[cfg(test)]
pub use employment_ingest_repository::MockEmploymentIngestRepository;
pub use employment_ingest_repository::{
    EmploymentIngestRepository, FixtureEmploymentIngestRepository, IngestRepositoryError,
};
#[cfg(test)]
pub use observation_query::MockObservationQuery;
pub use observation_query::{
    ObservationFilter, ObservationPage, ObservationQuery, ObservationQueryError,
};
#[cfg(test)]
pub use reverse_geocoder::MockReverseGeocoder;
pub use reverse_geocoder::{GeocodedPlace, ReverseGeocoder, ReverseGeocoderError};
#[cfg(test)]
pub use statistics_source::MockEmploymentStatisticsSource;
pub use statistics_source::{
    EmploymentStatisticsSource, FixtureEmploymentStatisticsSource, RawEmploymentRecord,
    StatisticsPage, StatisticsQuery, StatisticsSourceError,
};
#[cfg(test)]
pub use sync_command::MockSyncCommand;
pub use sync_command::{SyncCommand, SyncOutcome};
#[cfg(test)]
pub use sync_job_queue::MockSyncJobQueue;
pub use sync_job_queue::{FixtureSyncJobQueue, JobDispatchError, SyncJob, SyncJobQueue};
#[cfg(test)]
pub use sync_run_repository::MockSyncRunRepository;
pub use sync_run_repository::{
    DatasetCounts, SyncRunRecord, SyncRunRepository, SyncRunRepositoryError, SyncRunStatus,
    SyncRunType,
};
