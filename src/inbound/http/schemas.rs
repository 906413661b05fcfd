//! Response envelope and shared DTOs.
//!
//! Success responses are always `{"success": true, "data": ...}`; failures
//! come from the error adapter with the same flag set to `false`. Large
//! counts serialize as decimal strings so no consumer is tempted to read
//! them through f64.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::observation::{
    DistrictRecord, Observation, ObservationWithDistrict, StateRecord,
};

/// Uniform success envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> Envelope<T> {
    /// Wrap a payload in the success envelope.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Error body rendered by the error adapter, documented for OpenAPI.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorSchema {
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = "District not found")]
    pub error: String,
}

/// A state reference embedded in other payloads.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StateDto {
    pub state_code: String,
    pub state_name: String,
}

impl From<StateRecord> for StateDto {
    fn from(state: StateRecord) -> Self {
        Self {
            state_code: state.code,
            state_name: state.name,
        }
    }
}

/// A district without its parent state.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DistrictDto {
    pub district_code: String,
    pub district_name: String,
    pub state_code: String,
}

impl From<DistrictRecord> for DistrictDto {
    fn from(district: DistrictRecord) -> Self {
        Self {
            district_code: district.code,
            district_name: district.name,
            state_code: district.state_code,
        }
    }
}

/// A district joined with its parent state.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DistrictWithStateDto {
    #[serde(flatten)]
    pub district: DistrictDto,
    pub state: StateDto,
}

impl From<crate::domain::observation::DistrictWithState> for DistrictWithStateDto {
    fn from(joined: crate::domain::observation::DistrictWithState) -> Self {
        Self {
            district: joined.district.into(),
            state: joined.state.into(),
        }
    }
}

/// One employment observation. Count fields are decimal strings.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObservationDto {
    #[schema(value_type = String, format = "uuid")]
    pub id: uuid::Uuid,
    pub district_code: String,
    pub fin_year: String,
    pub month: String,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[schema(value_type = Option<String>)]
    pub approved_labour_budget: Option<Decimal>,
    pub average_wage_rate_per_day_per_person: Option<f64>,
    pub average_days_of_employment_provided_per_household: Option<i32>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[schema(value_type = Option<String>)]
    pub total_households_worked: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[schema(value_type = Option<String>)]
    pub total_individuals_worked: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[schema(value_type = Option<String>)]
    pub total_no_of_active_job_cards: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[schema(value_type = Option<String>)]
    pub total_no_of_active_workers: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[schema(value_type = Option<String>)]
    pub total_no_of_hhs_completed_100_days_of_wage_employment: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[schema(value_type = Option<String>)]
    pub total_no_of_job_cards_issued: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[schema(value_type = Option<String>)]
    pub total_no_of_workers: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[schema(value_type = Option<String>)]
    pub differently_abled_persons_worked: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[schema(value_type = Option<String>)]
    pub sc_persondays: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[schema(value_type = Option<String>)]
    pub sc_workers_against_active_workers: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[schema(value_type = Option<String>)]
    pub st_persondays: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[schema(value_type = Option<String>)]
    pub st_workers_against_active_workers: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[schema(value_type = Option<String>)]
    pub women_persondays: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[schema(value_type = Option<String>)]
    pub number_of_completed_works: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[schema(value_type = Option<String>)]
    pub number_of_ongoing_works: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[schema(value_type = Option<String>)]
    pub total_no_of_works_takenup: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[schema(value_type = Option<String>)]
    pub number_of_gps_with_nil_exp: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[schema(value_type = Option<String>)]
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
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Observation> for ObservationDto {
    fn from(observation: Observation) -> Self {
        let fields = observation.fields;
        Self {
            id: observation.id,
            district_code: observation.key.district_code,
            fin_year: observation.key.fin_year,
            month: observation.key.month,
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
            remarks: fields.remarks,
            created_at: observation.created_at,
            updated_at: observation.updated_at,
        }
    }
}

/// An observation with its district and state attached.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObservationWithDistrictDto {
    #[serde(flatten)]
    pub observation: ObservationDto,
    pub district: DistrictWithStateDto,
}

impl From<ObservationWithDistrict> for ObservationWithDistrictDto {
    fn from(joined: ObservationWithDistrict) -> Self {
        Self {
            observation: joined.observation.into(),
            district: crate::domain::observation::DistrictWithState {
                district: joined.district,
                state: joined.state,
            }
            .into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::observation::{ObservationFields, ObservationKey};
    use rust_decimal::Decimal;

    fn observation() -> Observation {
        Observation {
            id: uuid::Uuid::nil(),
            key: ObservationKey {
                district_code: "1808".to_owned(),
                fin_year: "2025-2026".to_owned(),
                month: "05".to_owned(),
            },
            fields: ObservationFields {
                women_persondays: Some(Decimal::from(9_007_199_254_740_993_u64)),
                total_exp: Some(1234.5),
                ..ObservationFields::default()
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn big_counts_serialize_as_decimal_strings() {
        let dto: ObservationDto = observation().into();
        let json = serde_json::to_value(&dto).expect("serializable dto");
        assert_eq!(json["womenPersondays"], "9007199254740993");
        // Absent counts stay null rather than becoming zero.
        assert_eq!(json["scPersondays"], serde_json::Value::Null);
        // Rates remain JSON numbers.
        assert_eq!(json["totalExp"], 1234.5);
    }

    #[test]
    fn envelope_sets_the_success_flag() {
        let json =
            serde_json::to_value(Envelope::data(vec![1, 2, 3])).expect("serializable envelope");
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
    }
}
