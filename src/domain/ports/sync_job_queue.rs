//! Driven port for submitting detached sync runs.
//!
//! HTTP handlers submit a job and return immediately; the run's lifecycle
//! (started, completed, failed) is observable through the audit log only.

use async_trait::async_trait;

/// A sync run to execute in the background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncJob {
    /// Sync one state, optionally one financial year.
    State {
        state_name: String,
        fin_year: Option<String>,
    },
    /// Sync the current financial year across all states.
    Latest,
}

/// Errors surfaced while submitting a job.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobDispatchError {
    /// The executor rejected the submission.
    #[error("sync job submission failed: {message}")]
    Dispatch { message: String },
}

impl JobDispatchError {
    pub fn dispatch(message: impl Into<String>) -> Self {
        Self::Dispatch {
            message: message.into(),
        }
    }
}

/// Port for submitting background sync runs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SyncJobQueue: Send + Sync {
    /// Submit a run for detached execution. Returns once the job is
    /// accepted, not once it finishes.
    async fn submit(&self, job: SyncJob) -> Result<(), JobDispatchError>;
}

/// Fixture queue that accepts and discards every job.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSyncJobQueue;

#[async_trait]
impl SyncJobQueue for FixtureSyncJobQueue {
    async fn submit(&self, _job: SyncJob) -> Result<(), JobDispatchError> {
        Ok(())
    }
}
