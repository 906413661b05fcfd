//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; regenerate with
//! `diesel print-schema` after a migration changes the schema.

diesel::table! {
    /// States keyed by the scheme's natural state code.
    states (state_code) {
        state_code -> Varchar,
        state_name -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Districts keyed by the scheme's natural district code.
    districts (district_code) {
        district_code -> Varchar,
        district_name -> Varchar,
        state_code -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Monthly employment observations; unique on
    /// (district_code, fin_year, month).
    mgnrega_data (id) {
        id -> Uuid,
        district_code -> Varchar,
        fin_year -> Varchar,
        month -> Varchar,
        approved_labour_budget -> Nullable<Numeric>,
        average_wage_rate_per_day_per_person -> Nullable<Float8>,
        average_days_of_employment_provided_per_household -> Nullable<Int4>,
        total_households_worked -> Nullable<Numeric>,
        total_individuals_worked -> Nullable<Numeric>,
        total_no_of_active_job_cards -> Nullable<Numeric>,
        total_no_of_active_workers -> Nullable<Numeric>,
        total_no_of_hhs_completed_100_days_of_wage_employment -> Nullable<Numeric>,
        total_no_of_job_cards_issued -> Nullable<Numeric>,
        total_no_of_workers -> Nullable<Numeric>,
        differently_abled_persons_worked -> Nullable<Numeric>,
        sc_persondays -> Nullable<Numeric>,
        sc_workers_against_active_workers -> Nullable<Numeric>,
        st_persondays -> Nullable<Numeric>,
        st_workers_against_active_workers -> Nullable<Numeric>,
        women_persondays -> Nullable<Numeric>,
        number_of_completed_works -> Nullable<Numeric>,
        number_of_ongoing_works -> Nullable<Numeric>,
        total_no_of_works_takenup -> Nullable<Numeric>,
        number_of_gps_with_nil_exp -> Nullable<Numeric>,
        persondays_of_central_liability_so_far -> Nullable<Numeric>,
        total_exp -> Nullable<Float8>,
        total_adm_expenditure -> Nullable<Float8>,
        wages -> Nullable<Float8>,
        material_and_skilled_wages -> Nullable<Float8>,
        percent_of_category_b_works -> Nullable<Int4>,
        percent_of_expenditure_on_agriculture_allied_works -> Nullable<Float8>,
        percent_of_nrm_expenditure -> Nullable<Float8>,
        percentage_payments_generated_within_15_days -> Nullable<Float8>,
        remarks -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Audit log of sync runs.
    sync_logs (id) {
        id -> Uuid,
        sync_type -> Varchar,
        status -> Varchar,
        record_count -> Nullable<Int8>,
        error_msg -> Nullable<Text>,
        started_at -> Timestamptz,
        completed_at -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(districts -> states (state_code));
diesel::joinable!(mgnrega_data -> districts (district_code));

diesel::allow_tables_to_appear_in_same_query!(states, districts, mgnrega_data, sync_logs);
