//! Driving port for triggering synchronization runs.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Error;

/// Summary of one finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Audit-log identifier of the run.
    pub run_id: Uuid,
    /// Records processed across all pages (including records that were
    /// individually skipped).
    pub record_count: u64,
    /// Financial year the run was scoped to, when one was derived or given.
    pub fin_year: Option<String>,
}

/// Port exposing the two run modes to inbound adapters and the CLI.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SyncCommand: Send + Sync {
    /// Run a full sync for one state, optionally one financial year.
    async fn sync_state(
        &self,
        state_name: &str,
        fin_year: Option<String>,
    ) -> Result<SyncOutcome, Error>;

    /// Run a full sync of the current financial year across all states.
    async fn sync_latest(&self) -> Result<SyncOutcome, Error>;
}
