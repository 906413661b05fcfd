//! Diesel row types and their conversions to and from domain entities.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::observation::{
    DistrictRecord, Observation, ObservationFields, ObservationKey, StateRecord,
};
use crate::domain::ports::SyncRunRecord;

use super::schema::{districts, mgnrega_data, states, sync_logs};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = states)]
pub struct StateRow {
    pub state_code: String,
    pub state_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = states)]
pub struct NewStateRow<'a> {
    pub state_code: &'a str,
    pub state_name: &'a str,
}

impl From<StateRow> for StateRecord {
    fn from(row: StateRow) -> Self {
        Self {
            code: row.state_code,
            name: row.state_name,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = districts)]
pub struct DistrictRow {
    pub district_code: String,
    pub district_name: String,
    pub state_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = districts)]
pub struct NewDistrictRow<'a> {
    pub district_code: &'a str,
    pub district_name: &'a str,
    pub state_code: &'a str,
}

impl From<DistrictRow> for DistrictRecord {
    fn from(row: DistrictRow) -> Self {
        Self {
            code: row.district_code,
            name: row.district_name,
            state_code: row.state_code,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = mgnrega_data)]
pub struct MgnregaDataRow {
    pub id: Uuid,
    pub district_code: String,
    pub fin_year: String,
    pub month: String,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert/update values for one observation. `treat_none_as_null` keeps the
/// overwrite semantics honest: a field that failed to parse this sync must
/// null out any stale value from the previous sync.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = mgnrega_data)]
#[diesel(treat_none_as_null = true)]
pub struct MgnregaDataUpsertRow<'a> {
    pub district_code: &'a str,
    pub fin_year: &'a str,
    pub month: &'a str,
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
    pub remarks: Option<&'a str>,
}

impl<'a> MgnregaDataUpsertRow<'a> {
    /// Build the row for one mapped record.
    pub fn new(key: &'a ObservationKey, fields: &'a ObservationFields) -> Self {
        Self {
            district_code: &key.district_code,
            fin_year: &key.fin_year,
            month: &key.month,
            approved_labour_budget: fields.approved_labour_budget,
            average_wage_rate_per_day_per_person: fields.average_wage_rate_per_day_per_person,
            average_days_of_employment_provided_per_household: fields
                .average_days_of_employment_provided_per_household,
            total_households_worked: fields.total_households_worked,
            total_individuals_worked: fields.total_individuals_worked,
            total_no_of_active_job_cards: fields.total_no_of_active_job_cards,
            total_no_of_active_workers: fields.total_no_of_active_workers,
            total_no_of_hhs_completed_100_days_of_wage_employment: fields
                .total_no_of_hhs_completed_100_days_of_wage_employment,
            total_no_of_job_cards_issued: fields.total_no_of_job_cards_issued,
            total_no_of_workers: fields.total_no_of_workers,
            differently_abled_persons_worked: fields.differently_abled_persons_worked,
            sc_persondays: fields.sc_persondays,
            sc_workers_against_active_workers: fields.sc_workers_against_active_workers,
            st_persondays: fields.st_persondays,
            st_workers_against_active_workers: fields.st_workers_against_active_workers,
            women_persondays: fields.women_persondays,
            number_of_completed_works: fields.number_of_completed_works,
            number_of_ongoing_works: fields.number_of_ongoing_works,
            total_no_of_works_takenup: fields.total_no_of_works_takenup,
            number_of_gps_with_nil_exp: fields.number_of_gps_with_nil_exp,
            persondays_of_central_liability_so_far: fields.persondays_of_central_liability_so_far,
            total_exp: fields.total_exp,
            total_adm_expenditure: fields.total_adm_expenditure,
            wages: fields.wages,
            material_and_skilled_wages: fields.material_and_skilled_wages,
            percent_of_category_b_works: fields.percent_of_category_b_works,
            percent_of_expenditure_on_agriculture_allied_works: fields
                .percent_of_expenditure_on_agriculture_allied_works,
            percent_of_nrm_expenditure: fields.percent_of_nrm_expenditure,
            percentage_payments_generated_within_15_days: fields
                .percentage_payments_generated_within_15_days,
            remarks: fields.remarks.as_deref(),
        }
    }
}

impl From<MgnregaDataRow> for Observation {
    fn from(row: MgnregaDataRow) -> Self {
        Self {
            id: row.id,
            key: ObservationKey {
                district_code: row.district_code,
                fin_year: row.fin_year,
                month: row.month,
            },
            fields: ObservationFields {
                approved_labour_budget: row.approved_labour_budget,
                average_wage_rate_per_day_per_person: row.average_wage_rate_per_day_per_person,
                average_days_of_employment_provided_per_household: row
                    .average_days_of_employment_provided_per_household,
                total_households_worked: row.total_households_worked,
                total_individuals_worked: row.total_individuals_worked,
                total_no_of_active_job_cards: row.total_no_of_active_job_cards,
                total_no_of_active_workers: row.total_no_of_active_workers,
                total_no_of_hhs_completed_100_days_of_wage_employment: row
                    .total_no_of_hhs_completed_100_days_of_wage_employment,
                total_no_of_job_cards_issued: row.total_no_of_job_cards_issued,
                total_no_of_workers: row.total_no_of_workers,
                differently_abled_persons_worked: row.differently_abled_persons_worked,
                sc_persondays: row.sc_persondays,
                sc_workers_against_active_workers: row.sc_workers_against_active_workers,
                st_persondays: row.st_persondays,
                st_workers_against_active_workers: row.st_workers_against_active_workers,
                women_persondays: row.women_persondays,
                number_of_completed_works: row.number_of_completed_works,
                number_of_ongoing_works: row.number_of_ongoing_works,
                total_no_of_works_takenup: row.total_no_of_works_takenup,
                number_of_gps_with_nil_exp: row.number_of_gps_with_nil_exp,
                persondays_of_central_liability_so_far: row.persondays_of_central_liability_so_far,
                total_exp: row.total_exp,
                total_adm_expenditure: row.total_adm_expenditure,
                wages: row.wages,
                material_and_skilled_wages: row.material_and_skilled_wages,
                percent_of_category_b_works: row.percent_of_category_b_works,
                percent_of_expenditure_on_agriculture_allied_works: row
                    .percent_of_expenditure_on_agriculture_allied_works,
                percent_of_nrm_expenditure: row.percent_of_nrm_expenditure,
                percentage_payments_generated_within_15_days: row
                    .percentage_payments_generated_within_15_days,
                remarks: row.remarks,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sync_logs)]
pub struct SyncLogRow {
    pub id: Uuid,
    pub sync_type: String,
    pub status: String,
    pub record_count: Option<i64>,
    pub error_msg: Option<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = sync_logs)]
pub struct NewSyncLogRow<'a> {
    pub sync_type: &'a str,
    pub status: &'a str,
    pub started_at: DateTime<Utc>,
}

impl From<SyncLogRow> for SyncRunRecord {
    fn from(row: SyncLogRow) -> Self {
        Self {
            id: row.id,
            run_type: row.sync_type,
            status: row.status,
            record_count: row.record_count.and_then(|count| u64::try_from(count).ok()),
            error_message: row.error_msg,
            started_at: row.started_at,
            completed_at: row.completed_at,
        }
    }
}
