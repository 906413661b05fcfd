//! Driven port for the idempotent three-table upsert applied per record.

use async_trait::async_trait;

use crate::domain::observation::ObservationUpsert;

/// Errors surfaced by the ingest repository.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IngestRepositoryError {
    /// Could not obtain a database connection.
    #[error("ingest connection failed: {message}")]
    Connection { message: String },
    /// A statement failed (constraint violation, serialization, etc.).
    #[error("ingest query failed: {message}")]
    Query { message: String },
}

impl IngestRepositoryError {
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

/// Port applying one record's upserts in referential order: state, then
/// district, then the keyed observation. Re-applying the same value is a
/// no-op field overwrite, never a duplicate row.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmploymentIngestRepository: Send + Sync {
    /// Upsert one record. Failure affects this record only; the caller
    /// decides whether to continue with the rest of the batch.
    async fn upsert_record(&self, record: &ObservationUpsert) -> Result<(), IngestRepositoryError>;
}

/// Fixture implementation that accepts and discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureEmploymentIngestRepository;

#[async_trait]
impl EmploymentIngestRepository for FixtureEmploymentIngestRepository {
    async fn upsert_record(
        &self,
        _record: &ObservationUpsert,
    ) -> Result<(), IngestRepositoryError> {
        Ok(())
    }
}
