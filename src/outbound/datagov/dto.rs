//! Wire types for the data.gov.in resource API.
//!
//! The API is loosely typed: a count may arrive as `"376297"`, `376297`, or
//! `""` depending on the upstream export. [`RawValue`] absorbs both shapes
//! and everything is normalized to optional trimmed strings before the
//! domain sees it.

use serde::Deserialize;

use crate::domain::ports::{RawEmploymentRecord, StatisticsPage};

/// A JSON field that may be a string or a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Text(String),
    Number(serde_json::Number),
}

impl RawValue {
    /// Normalize to a trimmed string; blank text becomes `None`.
    fn into_text(self) -> Option<String> {
        let text = match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_owned())
        }
    }
}

fn text(value: Option<RawValue>) -> Option<String> {
    value.and_then(RawValue::into_text)
}

/// One record as named by the upstream resource. Field names follow the
/// portal's export headers, including its `gererated` spelling.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEmploymentRecordDto {
    #[serde(default)]
    pub state_code: Option<RawValue>,
    #[serde(default)]
    pub state_name: Option<RawValue>,
    #[serde(default)]
    pub district_code: Option<RawValue>,
    #[serde(default)]
    pub district_name: Option<RawValue>,
    #[serde(default)]
    pub fin_year: Option<RawValue>,
    #[serde(default)]
    pub month: Option<RawValue>,
    #[serde(default, rename = "Approved_Labour_Budget")]
    pub approved_labour_budget: Option<RawValue>,
    #[serde(default, rename = "Average_Wage_rate_per_day_per_person")]
    pub average_wage_rate_per_day_per_person: Option<RawValue>,
    #[serde(default, rename = "Average_days_of_employment_provided_per_Household")]
    pub average_days_of_employment_provided_per_household: Option<RawValue>,
    #[serde(default, rename = "Total_Households_Worked")]
    pub total_households_worked: Option<RawValue>,
    #[serde(default, rename = "Total_Individuals_Worked")]
    pub total_individuals_worked: Option<RawValue>,
    #[serde(default, rename = "Total_No_of_Active_Job_Cards")]
    pub total_no_of_active_job_cards: Option<RawValue>,
    #[serde(default, rename = "Total_No_of_Active_Workers")]
    pub total_no_of_active_workers: Option<RawValue>,
    #[serde(default, rename = "Total_No_of_HHs_completed_100_Days_of_Wage_Employment")]
    pub total_no_of_hhs_completed_100_days_of_wage_employment: Option<RawValue>,
    #[serde(default, rename = "Total_No_of_JobCards_issued")]
    pub total_no_of_job_cards_issued: Option<RawValue>,
    #[serde(default, rename = "Total_No_of_Workers")]
    pub total_no_of_workers: Option<RawValue>,
    #[serde(default, rename = "Differently_abled_persons_worked")]
    pub differently_abled_persons_worked: Option<RawValue>,
    #[serde(default, rename = "SC_persondays")]
    pub sc_persondays: Option<RawValue>,
    #[serde(default, rename = "SC_workers_against_active_workers")]
    pub sc_workers_against_active_workers: Option<RawValue>,
    #[serde(default, rename = "ST_persondays")]
    pub st_persondays: Option<RawValue>,
    #[serde(default, rename = "ST_workers_against_active_workers")]
    pub st_workers_against_active_workers: Option<RawValue>,
    #[serde(default, rename = "Women_Persondays")]
    pub women_persondays: Option<RawValue>,
    #[serde(default, rename = "Number_of_Completed_Works")]
    pub number_of_completed_works: Option<RawValue>,
    #[serde(default, rename = "Number_of_Ongoing_Works")]
    pub number_of_ongoing_works: Option<RawValue>,
    #[serde(default, rename = "Total_No_of_Works_Takenup")]
    pub total_no_of_works_takenup: Option<RawValue>,
    #[serde(default, rename = "Number_of_GPs_with_NIL_exp")]
    pub number_of_gps_with_nil_exp: Option<RawValue>,
    #[serde(default, rename = "Persondays_of_Central_Liability_so_far")]
    pub persondays_of_central_liability_so_far: Option<RawValue>,
    #[serde(default, rename = "Total_Exp")]
    pub total_exp: Option<RawValue>,
    #[serde(default, rename = "Total_Adm_Expenditure")]
    pub total_adm_expenditure: Option<RawValue>,
    #[serde(default, rename = "Wages")]
    pub wages: Option<RawValue>,
    #[serde(default, rename = "Material_and_skilled_Wages")]
    pub material_and_skilled_wages: Option<RawValue>,
    #[serde(default, rename = "percent_of_Category_B_Works")]
    pub percent_of_category_b_works: Option<RawValue>,
    #[serde(default, rename = "percent_of_Expenditure_on_Agriculture_Allied_Works")]
    pub percent_of_expenditure_on_agriculture_allied_works: Option<RawValue>,
    #[serde(default, rename = "percent_of_NRM_Expenditure")]
    pub percent_of_nrm_expenditure: Option<RawValue>,
    #[serde(default, rename = "percentage_payments_gererated_within_15_days")]
    pub percentage_payments_generated_within_15_days: Option<RawValue>,
    #[serde(default, rename = "Remarks")]
    pub remarks: Option<RawValue>,
}

impl From<RawEmploymentRecordDto> for RawEmploymentRecord {
    fn from(dto: RawEmploymentRecordDto) -> Self {
        Self {
            state_code: text(dto.state_code),
            state_name: text(dto.state_name),
            district_code: text(dto.district_code),
            district_name: text(dto.district_name),
            fin_year: text(dto.fin_year),
            month: text(dto.month),
            approved_labour_budget: text(dto.approved_labour_budget),
            average_wage_rate_per_day_per_person: text(dto.average_wage_rate_per_day_per_person),
            average_days_of_employment_provided_per_household: text(
                dto.average_days_of_employment_provided_per_household,
            ),
            total_households_worked: text(dto.total_households_worked),
            total_individuals_worked: text(dto.total_individuals_worked),
            total_no_of_active_job_cards: text(dto.total_no_of_active_job_cards),
            total_no_of_active_workers: text(dto.total_no_of_active_workers),
            total_no_of_hhs_completed_100_days_of_wage_employment: text(
                dto.total_no_of_hhs_completed_100_days_of_wage_employment,
            ),
            total_no_of_job_cards_issued: text(dto.total_no_of_job_cards_issued),
            total_no_of_workers: text(dto.total_no_of_workers),
            differently_abled_persons_worked: text(dto.differently_abled_persons_worked),
            sc_persondays: text(dto.sc_persondays),
            sc_workers_against_active_workers: text(dto.sc_workers_against_active_workers),
            st_persondays: text(dto.st_persondays),
            st_workers_against_active_workers: text(dto.st_workers_against_active_workers),
            women_persondays: text(dto.women_persondays),
            number_of_completed_works: text(dto.number_of_completed_works),
            number_of_ongoing_works: text(dto.number_of_ongoing_works),
            total_no_of_works_takenup: text(dto.total_no_of_works_takenup),
            number_of_gps_with_nil_exp: text(dto.number_of_gps_with_nil_exp),
            persondays_of_central_liability_so_far: text(
                dto.persondays_of_central_liability_so_far,
            ),
            total_exp: text(dto.total_exp),
            total_adm_expenditure: text(dto.total_adm_expenditure),
            wages: text(dto.wages),
            material_and_skilled_wages: text(dto.material_and_skilled_wages),
            percent_of_category_b_works: text(dto.percent_of_category_b_works),
            percent_of_expenditure_on_agriculture_allied_works: text(
                dto.percent_of_expenditure_on_agriculture_allied_works,
            ),
            percent_of_nrm_expenditure: text(dto.percent_of_nrm_expenditure),
            percentage_payments_generated_within_15_days: text(
                dto.percentage_payments_generated_within_15_days,
            ),
            remarks: text(dto.remarks),
        }
    }
}

/// Envelope of one paginated response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatisticsResponseDto {
    #[serde(default)]
    pub records: Vec<RawEmploymentRecordDto>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl From<StatisticsResponseDto> for StatisticsPage {
    fn from(dto: StatisticsResponseDto) -> Self {
        let records: Vec<RawEmploymentRecord> =
            dto.records.into_iter().map(Into::into).collect();
        let total = dto.total.unwrap_or(records.len() as u64);
        Self { records, total }
    }
}
