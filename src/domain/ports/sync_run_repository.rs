//! Driven port for the sync audit log.
//!
//! One row per run: created in `started` state, mutated exactly once at the
//! end. The log is the only place a detached background run reports back.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// What triggered the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncRunType {
    /// One named state, optionally one financial year.
    State,
    /// The current financial year across all states.
    Latest,
}

impl SyncRunType {
    /// Stable storage label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::State => "state",
            Self::Latest => "latest",
        }
    }
}

/// Lifecycle state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncRunStatus {
    Started,
    Completed,
    Failed,
}

impl SyncRunStatus {
    /// Stable storage label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

/// One audit row as read back for status reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncRunRecord {
    pub id: Uuid,
    pub run_type: String,
    pub status: String,
    pub record_count: Option<u64>,
    pub error_message: Option<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Row counts reported alongside the run history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DatasetCounts {
    pub records: u64,
    pub states: u64,
    pub districts: u64,
}

/// Errors surfaced by the audit-log repository.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncRunRepositoryError {
    /// Could not obtain a database connection.
    #[error("sync log connection failed: {message}")]
    Connection { message: String },
    /// A statement failed.
    #[error("sync log query failed: {message}")]
    Query { message: String },
}

impl SyncRunRepositoryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port recording and reporting sync runs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SyncRunRepository: Send + Sync {
    /// Insert a `started` row and return its identifier.
    async fn create_started(
        &self,
        run_type: SyncRunType,
        started_at: DateTime<Utc>,
    ) -> Result<Uuid, SyncRunRepositoryError>;

    /// Mark a run `completed` with its final record count.
    async fn mark_completed(
        &self,
        id: Uuid,
        record_count: u64,
        completed_at: DateTime<Utc>,
    ) -> Result<(), SyncRunRepositoryError>;

    /// Mark a run `failed` with the fatal error message.
    async fn mark_failed(
        &self,
        id: Uuid,
        error_message: &str,
        completed_at: DateTime<Utc>,
    ) -> Result<(), SyncRunRepositoryError>;

    /// Most recent runs, newest first.
    async fn recent_runs(&self, limit: i64) -> Result<Vec<SyncRunRecord>, SyncRunRepositoryError>;

    /// The most recently completed successful run, if any.
    async fn last_successful(&self) -> Result<Option<SyncRunRecord>, SyncRunRepositoryError>;

    /// Current table sizes for the status report.
    async fn dataset_counts(&self) -> Result<DatasetCounts, SyncRunRepositoryError>;
}
