//! Field-by-field coercion of raw source records into typed observations.
//!
//! Parsing is per field: a malformed value makes that one field absent and
//! never fails the record. Absent and zero are distinct — `""` maps to
//! `None` while `"0"` maps to zero — because zero is a legitimate observed
//! value in sparse months.

use rust_decimal::Decimal;

use crate::domain::observation::{
    DistrictRecord, ObservationFields, ObservationKey, ObservationUpsert, StateRecord,
};
use crate::domain::ports::RawEmploymentRecord;

/// Identity fields a record must carry before it can be persisted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordIdentityError {
    /// A key field was missing or blank.
    #[error("record is missing required field {field}")]
    MissingField { field: &'static str },
}

/// Build the full upsert bundle for one raw record.
///
/// Measures are mapped leniently; the six identity fields (state and
/// district code/name, financial year, month) must be present, since
/// without them the record cannot be keyed or attached to the directory.
pub fn to_observation_upsert(
    raw: &RawEmploymentRecord,
) -> Result<ObservationUpsert, RecordIdentityError> {
    let state_code = require(&raw.state_code, "state_code")?;
    let state_name = require(&raw.state_name, "state_name")?;
    let district_code = require(&raw.district_code, "district_code")?;
    let district_name = require(&raw.district_name, "district_name")?;
    let fin_year = require(&raw.fin_year, "fin_year")?;
    let month = require(&raw.month, "month")?;

    Ok(ObservationUpsert {
        state: StateRecord {
            code: state_code.clone(),
            name: state_name,
        },
        district: DistrictRecord {
            code: district_code.clone(),
            name: district_name,
            state_code,
        },
        key: ObservationKey {
            district_code,
            fin_year,
            month,
        },
        fields: map_fields(raw),
    })
}

/// Map the ~30 measure fields of one raw record. Pure and total: every
/// outcome is a value, never an error.
pub fn map_fields(raw: &RawEmploymentRecord) -> ObservationFields {
    ObservationFields {
        approved_labour_budget: parse_count(&raw.approved_labour_budget),
        average_wage_rate_per_day_per_person: parse_rate(&raw.average_wage_rate_per_day_per_person),
        average_days_of_employment_provided_per_household: parse_small_count(
            &raw.average_days_of_employment_provided_per_household,
        ),
        total_households_worked: parse_count(&raw.total_households_worked),
        total_individuals_worked: parse_count(&raw.total_individuals_worked),
        total_no_of_active_job_cards: parse_count(&raw.total_no_of_active_job_cards),
        total_no_of_active_workers: parse_count(&raw.total_no_of_active_workers),
        total_no_of_hhs_completed_100_days_of_wage_employment: parse_count(
            &raw.total_no_of_hhs_completed_100_days_of_wage_employment,
        ),
        total_no_of_job_cards_issued: parse_count(&raw.total_no_of_job_cards_issued),
        total_no_of_workers: parse_count(&raw.total_no_of_workers),
        differently_abled_persons_worked: parse_count(&raw.differently_abled_persons_worked),
        sc_persondays: parse_count(&raw.sc_persondays),
        sc_workers_against_active_workers: parse_count(&raw.sc_workers_against_active_workers),
        st_persondays: parse_count(&raw.st_persondays),
        st_workers_against_active_workers: parse_count(&raw.st_workers_against_active_workers),
        women_persondays: parse_count(&raw.women_persondays),
        number_of_completed_works: parse_count(&raw.number_of_completed_works),
        number_of_ongoing_works: parse_count(&raw.number_of_ongoing_works),
        total_no_of_works_takenup: parse_count(&raw.total_no_of_works_takenup),
        number_of_gps_with_nil_exp: parse_count(&raw.number_of_gps_with_nil_exp),
        persondays_of_central_liability_so_far: parse_count(
            &raw.persondays_of_central_liability_so_far,
        ),
        total_exp: parse_rate(&raw.total_exp),
        total_adm_expenditure: parse_rate(&raw.total_adm_expenditure),
        wages: parse_rate(&raw.wages),
        material_and_skilled_wages: parse_rate(&raw.material_and_skilled_wages),
        percent_of_category_b_works: parse_small_count(&raw.percent_of_category_b_works),
        percent_of_expenditure_on_agriculture_allied_works: parse_rate(
            &raw.percent_of_expenditure_on_agriculture_allied_works,
        ),
        percent_of_nrm_expenditure: parse_rate(&raw.percent_of_nrm_expenditure),
        percentage_payments_generated_within_15_days: parse_rate(
            &raw.percentage_payments_generated_within_15_days,
        ),
        remarks: passthrough_text(&raw.remarks),
    }
}

/// Big-integer parse for count fields. Accepts an optionally signed run of
/// digits only; a decimal point, stray text, or an empty value is absent.
fn parse_count(value: &Option<String>) -> Option<Decimal> {
    let text = value.as_deref()?.trim();
    if text.is_empty() {
        return None;
    }
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    Decimal::from_str_exact(text).ok()
}

/// Floating-point parse for rate and expenditure fields.
fn parse_rate(value: &Option<String>) -> Option<f64> {
    let text = value.as_deref()?.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|parsed| parsed.is_finite())
}

/// Integer parse for small fields, truncating a fractional value toward
/// zero the way the upstream portal's own tooling does.
fn parse_small_count(value: &Option<String>) -> Option<i32> {
    let text = value.as_deref()?.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(parsed) = text.parse::<i32>() {
        return Some(parsed);
    }
    let fractional = text.parse::<f64>().ok().filter(|parsed| parsed.is_finite())?;
    let truncated = fractional.trunc();
    if truncated >= f64::from(i32::MIN) && truncated <= f64::from(i32::MAX) {
        Some(truncated as i32)
    } else {
        None
    }
}

/// Remarks pass through verbatim; blank text is absent.
fn passthrough_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

fn require(
    value: &Option<String>,
    field: &'static str,
) -> Result<String, RecordIdentityError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
        .ok_or(RecordIdentityError::MissingField { field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn keyed_record() -> RawEmploymentRecord {
        RawEmploymentRecord {
            state_code: Some("18".to_owned()),
            state_name: Some("MAHARASHTRA".to_owned()),
            district_code: Some("1808".to_owned()),
            district_name: Some("PUNE".to_owned()),
            fin_year: Some("2025-2026".to_owned()),
            month: Some("05".to_owned()),
            ..RawEmploymentRecord::default()
        }
    }

    #[rstest]
    #[case::plain("376297", Some("376297"))]
    #[case::zero_is_a_value("0", Some("0"))]
    #[case::beyond_f64_safe_range("9007199254740993", Some("9007199254740993"))]
    #[case::surrounding_whitespace(" 42 ", Some("42"))]
    #[case::empty("", None)]
    #[case::blank("   ", None)]
    #[case::decimal_point("123.45", None)]
    #[case::text("N/A", None)]
    #[case::mixed("12x4", None)]
    fn count_parse_is_exact_or_absent(#[case] input: &str, #[case] expected: Option<&str>) {
        let parsed = parse_count(&Some(input.to_owned()));
        assert_eq!(parsed.map(|value| value.to_string()), expected.map(str::to_owned));
    }

    #[test]
    fn count_survives_values_past_two_to_the_fifty_three() {
        let digits = "18014398509481985";
        let parsed = parse_count(&Some(digits.to_owned())).expect("digits parse");
        assert_eq!(parsed.to_string(), digits);
    }

    #[rstest]
    #[case::plain("245.76", Some(245.76))]
    #[case::integer_text("245", Some(245.0))]
    #[case::zero("0", Some(0.0))]
    #[case::empty("", None)]
    #[case::text("NA", None)]
    #[case::trailing_garbage("45.2abc", None)]
    fn rate_parse_is_lenient_to_absence_only(#[case] input: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_rate(&Some(input.to_owned())), expected);
    }

    #[rstest]
    #[case::integer("48", Some(48))]
    #[case::fractional_truncates("48.7", Some(48))]
    #[case::negative_fraction("-3.9", Some(-3))]
    #[case::empty("", None)]
    #[case::text("many", None)]
    fn small_count_parse_truncates_fractions(#[case] input: &str, #[case] expected: Option<i32>) {
        assert_eq!(parse_small_count(&Some(input.to_owned())), expected);
    }

    #[test]
    fn one_bad_field_never_blocks_the_rest() {
        let mut raw = keyed_record();
        raw.total_households_worked = Some("garbage".to_owned());
        raw.total_individuals_worked = Some("8123".to_owned());
        raw.wages = Some("91.5".to_owned());

        let fields = map_fields(&raw);
        assert_eq!(fields.total_households_worked, None);
        assert_eq!(
            fields.total_individuals_worked.map(|value| value.to_string()),
            Some("8123".to_owned())
        );
        assert_eq!(fields.wages, Some(91.5));
    }

    #[test]
    fn remarks_pass_through_verbatim_or_absent() {
        let mut raw = keyed_record();
        raw.remarks = Some("Data under verification".to_owned());
        assert_eq!(
            map_fields(&raw).remarks.as_deref(),
            Some("Data under verification")
        );

        raw.remarks = Some("   ".to_owned());
        assert_eq!(map_fields(&raw).remarks, None);
    }

    #[test]
    fn upsert_bundle_carries_identity_in_referential_order() {
        let raw = keyed_record();
        let upsert = to_observation_upsert(&raw).expect("identity present");

        assert_eq!(upsert.state.code, "18");
        assert_eq!(upsert.district.state_code, "18");
        assert_eq!(upsert.key.district_code, "1808");
        assert_eq!(upsert.key.fin_year, "2025-2026");
        assert_eq!(upsert.key.month, "05");
    }

    #[rstest]
    #[case::missing_state_code(|raw: &mut RawEmploymentRecord| raw.state_code = None, "state_code")]
    #[case::blank_district(
        |raw: &mut RawEmploymentRecord| raw.district_code = Some("  ".to_owned()),
        "district_code"
    )]
    #[case::missing_month(|raw: &mut RawEmploymentRecord| raw.month = None, "month")]
    fn records_without_identity_are_rejected(
        #[case] mutate: fn(&mut RawEmploymentRecord),
        #[case] field: &str,
    ) {
        let mut raw = keyed_record();
        mutate(&mut raw);
        let error = to_observation_upsert(&raw).expect_err("identity should be required");
        assert!(error.to_string().contains(field));
    }

    #[test]
    fn mapping_is_deterministic() {
        let mut raw = keyed_record();
        raw.sc_persondays = Some("1234567890123456789".to_owned());
        raw.percent_of_nrm_expenditure = Some("17.25".to_owned());
        assert_eq!(map_fields(&raw), map_fields(&raw));
    }
}
