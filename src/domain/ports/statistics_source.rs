//! Driven port for fetching employment statistics pages from the external
//! open-data source.
//!
//! The domain owns the raw-record shape so the sync orchestrator stays
//! adapter-agnostic. Every field is optionally present: the upstream API is
//! loosely typed and the record mapper decides field by field what survives.

use async_trait::async_trait;

/// Filters applied to one statistics request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatisticsQuery {
    /// Restrict results to one state, by its display name.
    pub state_name: Option<String>,
    /// Restrict results to one financial year label, e.g. `2025-2026`.
    pub fin_year: Option<String>,
}

/// One raw employment record as delivered by the source, normalized to
/// optional strings. Numeric coercion happens in the record mapper, never
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawEmploymentRecord {
    pub state_code: Option<String>,
    pub state_name: Option<String>,
    pub district_code: Option<String>,
    pub district_name: Option<String>,
    pub fin_year: Option<String>,
    pub month: Option<String>,
    pub approved_labour_budget: Option<String>,
    pub average_wage_rate_per_day_per_person: Option<String>,
    pub average_days_of_employment_provided_per_household: Option<String>,
    pub total_households_worked: Option<String>,
    pub total_individuals_worked: Option<String>,
    pub total_no_of_active_job_cards: Option<String>,
    pub total_no_of_active_workers: Option<String>,
    pub total_no_of_hhs_completed_100_days_of_wage_employment: Option<String>,
    pub total_no_of_job_cards_issued: Option<String>,
    pub total_no_of_workers: Option<String>,
    pub differently_abled_persons_worked: Option<String>,
    pub sc_persondays: Option<String>,
    pub sc_workers_against_active_workers: Option<String>,
    pub st_persondays: Option<String>,
    pub st_workers_against_active_workers: Option<String>,
    pub women_persondays: Option<String>,
    pub number_of_completed_works: Option<String>,
    pub number_of_ongoing_works: Option<String>,
    pub total_no_of_works_takenup: Option<String>,
    pub number_of_gps_with_nil_exp: Option<String>,
    pub persondays_of_central_liability_so_far: Option<String>,
    pub total_exp: Option<String>,
    pub total_adm_expenditure: Option<String>,
    pub wages: Option<String>,
    pub material_and_skilled_wages: Option<String>,
    pub percent_of_category_b_works: Option<String>,
    pub percent_of_expenditure_on_agriculture_allied_works: Option<String>,
    pub percent_of_nrm_expenditure: Option<String>,
    pub percentage_payments_generated_within_15_days: Option<String>,
    pub remarks: Option<String>,
}

/// One page of the paginated source response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatisticsPage {
    /// Records in this page, in source order.
    pub records: Vec<RawEmploymentRecord>,
    /// Total matching records reported by the source across all pages.
    pub total: u64,
}

/// Errors surfaced while calling the statistics source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatisticsSourceError {
    /// Network transport failed before receiving a response.
    #[error("statistics source transport failed: {message}")]
    Transport { message: String },
    /// The request exceeded its timeout.
    #[error("statistics source timeout: {message}")]
    Timeout { message: String },
    /// The source rate-limited the request.
    #[error("statistics source rate limited request: {message}")]
    RateLimited { message: String },
    /// The response body could not be decoded.
    #[error("statistics source response decode failed: {message}")]
    Decode { message: String },
    /// The source rejected the request.
    #[error("statistics source rejected request: {message}")]
    InvalidRequest { message: String },
}

impl StatisticsSourceError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }
}

/// Port for fetching one page of employment statistics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmploymentStatisticsSource: Send + Sync {
    /// Fetch one page at `offset` with at most `limit` records.
    async fn fetch_page(
        &self,
        query: &StatisticsQuery,
        offset: u64,
        limit: u64,
    ) -> Result<StatisticsPage, StatisticsSourceError>;
}

/// Fixture implementation returning an empty page.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureEmploymentStatisticsSource;

#[async_trait]
impl EmploymentStatisticsSource for FixtureEmploymentStatisticsSource {
    async fn fetch_page(
        &self,
        _query: &StatisticsQuery,
        _offset: u64,
        _limit: u64,
    ) -> Result<StatisticsPage, StatisticsSourceError> {
        Ok(StatisticsPage::default())
    }
}
