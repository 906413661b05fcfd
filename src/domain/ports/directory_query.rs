//! Driven port for reading the state/district directory.

use async_trait::async_trait;

use crate::domain::observation::{DistrictRecord, DistrictWithState, StateRecord};

/// A state with the number of districts currently attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateWithDistrictCount {
    pub state: StateRecord,
    pub district_count: u64,
}

/// One state together with its districts, name-ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateWithDistricts {
    pub state: StateRecord,
    pub districts: Vec<DistrictRecord>,
}

/// Errors surfaced by directory queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryQueryError {
    /// Could not obtain a database connection.
    #[error("directory connection failed: {message}")]
    Connection { message: String },
    /// A statement failed.
    #[error("directory query failed: {message}")]
    Query { message: String },
}

impl DirectoryQueryError {
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

/// Port for reading states and districts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryQuery: Send + Sync {
    /// All states, name-ascending, with their district counts.
    async fn states_with_district_counts(
        &self,
    ) -> Result<Vec<StateWithDistrictCount>, DirectoryQueryError>;

    /// One state with its districts, or `None` when the code is unknown.
    async fn state_with_districts(
        &self,
        state_code: &str,
    ) -> Result<Option<StateWithDistricts>, DirectoryQueryError>;

    /// Districts joined with their states, name-ascending, optionally
    /// filtered to one state.
    async fn districts(
        &self,
        state_code: Option<String>,
    ) -> Result<Vec<DistrictWithState>, DirectoryQueryError>;

    /// One district joined with its state, or `None` when unknown.
    async fn district(
        &self,
        district_code: &str,
    ) -> Result<Option<DistrictWithState>, DirectoryQueryError>;
}

/// Fixture implementation with an empty directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureDirectoryQuery;

#[async_trait]
impl DirectoryQuery for FixtureDirectoryQuery {
    async fn states_with_district_counts(
        &self,
    ) -> Result<Vec<StateWithDistrictCount>, DirectoryQueryError> {
        Ok(Vec::new())
    }

    async fn state_with_districts(
        &self,
        _state_code: &str,
    ) -> Result<Option<StateWithDistricts>, DirectoryQueryError> {
        Ok(None)
    }

    async fn districts(
        &self,
        _state_code: Option<String>,
    ) -> Result<Vec<DistrictWithState>, DirectoryQueryError> {
        Ok(Vec::new())
    }

    async fn district(
        &self,
        _district_code: &str,
    ) -> Result<Option<DistrictWithState>, DirectoryQueryError> {
        Ok(None)
    }
}
