//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle via `actix_web::web::Data`, so they depend
//! only on domain ports and remain testable with mocks or fixtures — no
//! module-level singletons anywhere.

use std::sync::Arc;

use crate::domain::ports::{
    ChatAssistant, DirectoryQuery, DistrictLocator, ObservationQuery, SyncJobQueue,
    SyncRunRepository,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub directory: Arc<dyn DirectoryQuery>,
    pub observations: Arc<dyn ObservationQuery>,
    pub sync_runs: Arc<dyn SyncRunRepository>,
    pub sync_jobs: Arc<dyn SyncJobQueue>,
    pub locator: Arc<dyn DistrictLocator>,
    pub assistant: Arc<dyn ChatAssistant>,
}
