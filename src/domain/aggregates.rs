//! Year-to-date and cross-district aggregation.
//!
//! Absent measures are excluded from both the numerator and the denominator
//! of every mean; summing treats them as contributing nothing. Treating
//! absent as zero would silently drag averages down in sparse months, and
//! the data model deliberately keeps absent distinct from zero.

use rust_decimal::Decimal;

use crate::domain::observation::ObservationFields;

/// Sums and means across the months of one district's financial year.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct YearAggregates {
    pub total_households_worked: Decimal,
    pub total_individuals_worked: Decimal,
    pub total_expenditure: f64,
    /// Mean of the monthly wage rates that were reported.
    pub average_wage_rate: Option<f64>,
    pub total_works: Decimal,
    pub completed_works: Decimal,
}

/// Cross-district aggregates for one state and financial year.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StateAggregates {
    pub average_wage_rate: Option<f64>,
    pub average_days_of_employment: Option<f64>,
    pub total_households_worked: Decimal,
    pub total_expenditure: f64,
    pub total_works: Decimal,
}

/// Aggregate one district's months. Returns `None` for an empty year so
/// callers can distinguish "no data" from "all zeroes".
pub fn year_aggregates<'a, I>(months: I) -> Option<YearAggregates>
where
    I: IntoIterator<Item = &'a ObservationFields>,
{
    let months: Vec<&ObservationFields> = months.into_iter().collect();
    if months.is_empty() {
        return None;
    }

    Some(YearAggregates {
        total_households_worked: sum_counts(&months, |fields| fields.total_households_worked),
        total_individuals_worked: sum_counts(&months, |fields| fields.total_individuals_worked),
        total_expenditure: sum_rates(&months, |fields| fields.total_exp),
        average_wage_rate: mean_rate(&months, |fields| {
            fields.average_wage_rate_per_day_per_person
        }),
        total_works: sum_counts(&months, |fields| fields.total_no_of_works_takenup),
        completed_works: sum_counts(&months, |fields| fields.number_of_completed_works),
    })
}

/// Aggregate every observation of one state's year across its districts.
pub fn state_aggregates<'a, I>(observations: I) -> Option<StateAggregates>
where
    I: IntoIterator<Item = &'a ObservationFields>,
{
    let observations: Vec<&ObservationFields> = observations.into_iter().collect();
    if observations.is_empty() {
        return None;
    }

    Some(StateAggregates {
        average_wage_rate: mean_rate(&observations, |fields| {
            fields.average_wage_rate_per_day_per_person
        }),
        average_days_of_employment: mean_small_count(&observations, |fields| {
            fields.average_days_of_employment_provided_per_household
        }),
        total_households_worked: sum_counts(&observations, |fields| {
            fields.total_households_worked
        }),
        total_expenditure: sum_rates(&observations, |fields| fields.total_exp),
        total_works: sum_counts(&observations, |fields| fields.total_no_of_works_takenup),
    })
}

fn sum_counts(
    rows: &[&ObservationFields],
    select: impl Fn(&ObservationFields) -> Option<Decimal>,
) -> Decimal {
    rows.iter().filter_map(|fields| select(fields)).sum()
}

fn sum_rates(
    rows: &[&ObservationFields],
    select: impl Fn(&ObservationFields) -> Option<f64>,
) -> f64 {
    rows.iter().filter_map(|fields| select(fields)).sum()
}

fn mean_rate(
    rows: &[&ObservationFields],
    select: impl Fn(&ObservationFields) -> Option<f64>,
) -> Option<f64> {
    let present: Vec<f64> = rows.iter().filter_map(|fields| select(fields)).collect();
    if present.is_empty() {
        return None;
    }
    Some(present.iter().sum::<f64>() / present.len() as f64)
}

fn mean_small_count(
    rows: &[&ObservationFields],
    select: impl Fn(&ObservationFields) -> Option<i32>,
) -> Option<f64> {
    let present: Vec<i32> = rows.iter().filter_map(|fields| select(fields)).collect();
    if present.is_empty() {
        return None;
    }
    Some(present.iter().map(|value| f64::from(*value)).sum::<f64>() / present.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn month(households: Option<&str>, wage_rate: Option<f64>) -> ObservationFields {
        ObservationFields {
            total_households_worked: households
                .map(|digits| digits.parse::<Decimal>().expect("valid decimal")),
            average_wage_rate_per_day_per_person: wage_rate,
            total_exp: Some(10.0),
            ..ObservationFields::default()
        }
    }

    #[test]
    fn empty_year_has_no_aggregates() {
        assert_eq!(year_aggregates(std::iter::empty()), None);
        assert_eq!(state_aggregates(std::iter::empty()), None);
    }

    #[test]
    fn sums_skip_absent_values() {
        let months = [
            month(Some("100"), Some(200.0)),
            month(None, Some(300.0)),
            month(Some("50"), None),
        ];
        let aggregates = year_aggregates(months.iter()).expect("non-empty year");
        assert_eq!(aggregates.total_households_worked, Decimal::from(150));
        assert_eq!(aggregates.total_expenditure, 30.0);
    }

    #[test]
    fn means_exclude_absent_values_from_the_denominator() {
        let months = [
            month(Some("1"), Some(200.0)),
            month(Some("1"), None),
            month(Some("1"), Some(300.0)),
        ];
        let aggregates = year_aggregates(months.iter()).expect("non-empty year");
        // 2 reported rates, not 3: (200 + 300) / 2.
        assert_eq!(aggregates.average_wage_rate, Some(250.0));
    }

    #[test]
    fn all_absent_rates_yield_no_mean() {
        let months = [month(Some("1"), None), month(Some("2"), None)];
        let aggregates = year_aggregates(months.iter()).expect("non-empty year");
        assert_eq!(aggregates.average_wage_rate, None);
    }

    #[rstest]
    #[case::big_counts("9007199254740993", "9007199254740993", "18014398509481986")]
    #[case::small_counts("2", "3", "5")]
    fn count_sums_are_exact(#[case] first: &str, #[case] second: &str, #[case] expected: &str) {
        let months = [month(Some(first), None), month(Some(second), None)];
        let aggregates = year_aggregates(months.iter()).expect("non-empty year");
        assert_eq!(aggregates.total_households_worked.to_string(), expected);
    }

    #[test]
    fn state_aggregates_average_days_over_reporting_districts() {
        let mut first = month(Some("10"), Some(100.0));
        first.average_days_of_employment_provided_per_household = Some(40);
        let mut second = month(Some("20"), Some(200.0));
        second.average_days_of_employment_provided_per_household = None;
        let mut third = month(Some("30"), Some(300.0));
        third.average_days_of_employment_provided_per_household = Some(60);

        let aggregates =
            state_aggregates([&first, &second, &third]).expect("non-empty state year");
        assert_eq!(aggregates.average_days_of_employment, Some(50.0));
        assert_eq!(aggregates.average_wage_rate, Some(200.0));
        assert_eq!(aggregates.total_households_worked, Decimal::from(60));
    }
}
