//! Core entities: states, districts, and monthly employment observations.
//!
//! Count fields use [`Decimal`] because persondays and job-card totals can
//! exceed 2^53; they must survive storage and serialization digit-for-digit.
//! Every measure is optional — an unparseable source value is stored as
//! absent, never as zero, so that zero remains a meaningful observation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A state as recorded from the statistics source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateRecord {
    /// Natural key issued by the scheme, e.g. `18`.
    pub code: String,
    /// Display name, e.g. `MAHARASHTRA`.
    pub name: String,
}

/// A district belonging to exactly one state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistrictRecord {
    /// Natural key issued by the scheme.
    pub code: String,
    /// Display name, e.g. `PUNE`.
    pub name: String,
    /// Code of the owning state.
    pub state_code: String,
}

/// A district joined with its parent state, as served by the query API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistrictWithState {
    pub district: DistrictRecord,
    pub state: StateRecord,
}

/// Natural key of one employment observation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObservationKey {
    pub district_code: String,
    /// Financial year label, e.g. `2025-2026`.
    pub fin_year: String,
    /// Month as reported by the source.
    pub month: String,
}

/// The measures of one (district, financial year, month) observation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObservationFields {
    pub approved_labour_budget: Option<Decimal>,
    pub average_wage_rate_per_day_per_person: Option<f64>,
    pub average_days_of_employment_provided_per_household: Option<i32>,
    pub total_households_worked: Option<Decimal>,
    pub total_individuals_worked: Option<Decimal>,
    pub total_no_of_active_job_cards: Option<Decimal>,
    pub total_no_of_active_workers: Option<Decimal>,
    pub total_no_of_hhs_completed_100_days_of_wage_employment: Option<Decimal>,
    pub total_no_of_job_cards_issued: Option<Decimal>,
    pub total_no_of_workers: Option<Decimal>,
    pub differently_abled_persons_worked: Option<Decimal>,
    pub sc_persondays: Option<Decimal>,
    pub sc_workers_against_active_workers: Option<Decimal>,
    pub st_persondays: Option<Decimal>,
    pub st_workers_against_active_workers: Option<Decimal>,
    pub women_persondays: Option<Decimal>,
    pub number_of_completed_works: Option<Decimal>,
    pub number_of_ongoing_works: Option<Decimal>,
    pub total_no_of_works_takenup: Option<Decimal>,
    pub number_of_gps_with_nil_exp: Option<Decimal>,
    pub persondays_of_central_liability_so_far: Option<Decimal>,
    pub total_exp: Option<f64>,
    pub total_adm_expenditure: Option<f64>,
    pub wages: Option<f64>,
    pub material_and_skilled_wages: Option<f64>,
    pub percent_of_category_b_works: Option<i32>,
    pub percent_of_expenditure_on_agriculture_allied_works: Option<f64>,
    pub percent_of_nrm_expenditure: Option<f64>,
    pub percentage_payments_generated_within_15_days: Option<f64>,
    pub remarks: Option<String>,
}

/// A stored observation as read back from the persistence layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub id: uuid::Uuid,
    pub key: ObservationKey,
    pub fields: ObservationFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An observation joined with its district and state for API responses.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationWithDistrict {
    pub observation: Observation,
    pub district: DistrictRecord,
    pub state: StateRecord,
}

/// Everything needed to persist one raw record: the state and district rows
/// upserted first, then the keyed observation. Building this value is pure;
/// the ingest repository applies it in referential order.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationUpsert {
    pub state: StateRecord,
    pub district: DistrictRecord,
    pub key: ObservationKey,
    pub fields: ObservationFields,
}
