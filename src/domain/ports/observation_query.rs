//! Driven port for reading stored employment observations.

use async_trait::async_trait;

use crate::domain::observation::{Observation, ObservationWithDistrict};

/// Filters for the paged observation listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObservationFilter {
    pub district_code: Option<String>,
    pub fin_year: Option<String>,
    pub month: Option<String>,
}

/// One page of observations plus the unpaged match count.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObservationPage {
    pub records: Vec<ObservationWithDistrict>,
    pub total: u64,
}

/// Errors surfaced by observation queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObservationQueryError {
    /// Could not obtain a database connection.
    #[error("observation connection failed: {message}")]
    Connection { message: String },
    /// A statement failed.
    #[error("observation query failed: {message}")]
    Query { message: String },
}

impl ObservationQueryError {
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

/// Port for reading observations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObservationQuery: Send + Sync {
    /// Paged listing ordered financial year descending, then month
    /// descending.
    async fn observations(
        &self,
        filter: &ObservationFilter,
        limit: i64,
        offset: i64,
    ) -> Result<ObservationPage, ObservationQueryError>;

    /// Most recent observation for a district, or `None` when it has no
    /// data.
    async fn latest_for_district(
        &self,
        district_code: &str,
    ) -> Result<Option<ObservationWithDistrict>, ObservationQueryError>;

    /// All observations for a district, optionally restricted to one
    /// financial year, month-ascending.
    async fn district_year(
        &self,
        district_code: &str,
        fin_year: Option<String>,
    ) -> Result<Vec<ObservationWithDistrict>, ObservationQueryError>;

    /// Distinct financial years with data for a district, newest first.
    async fn available_years(
        &self,
        district_code: &str,
    ) -> Result<Vec<String>, ObservationQueryError>;

    /// Observations across every district of a state, optionally restricted
    /// to one financial year.
    async fn state_year(
        &self,
        state_code: &str,
        fin_year: Option<String>,
    ) -> Result<Vec<Observation>, ObservationQueryError>;
}
