//! PostgreSQL-backed read adapter for the directory and observation ports.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::observation::{DistrictWithState, Observation, ObservationWithDistrict};
use crate::domain::ports::{
    DirectoryQuery, DirectoryQueryError, ObservationFilter, ObservationPage, ObservationQuery,
    ObservationQueryError, StateWithDistrictCount, StateWithDistricts,
};

use super::diesel_helpers::{map_diesel_error_message, map_pool_error_message};
use super::models::{DistrictRow, MgnregaDataRow, StateRow};
use super::pool::{DbPool, PoolError};
use super::schema::{districts, mgnrega_data, states};

/// Diesel-backed implementation of the directory and observation query
/// ports.
#[derive(Clone)]
pub struct DieselEmploymentQueryRepository {
    pool: DbPool,
}

impl DieselEmploymentQueryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn directory_pool_error(error: PoolError) -> DirectoryQueryError {
    DirectoryQueryError::connection(map_pool_error_message(error))
}

fn directory_query_error(
    operation: &'static str,
) -> impl Fn(diesel::result::Error) -> DirectoryQueryError {
    move |error| DirectoryQueryError::query(map_diesel_error_message(error, operation))
}

fn observation_pool_error(error: PoolError) -> ObservationQueryError {
    ObservationQueryError::connection(map_pool_error_message(error))
}

fn observation_query_error(
    operation: &'static str,
) -> impl Fn(diesel::result::Error) -> ObservationQueryError {
    move |error| ObservationQueryError::query(map_diesel_error_message(error, operation))
}

type JoinedRow = (MgnregaDataRow, (DistrictRow, StateRow));

fn to_joined((data, (district, state)): JoinedRow) -> ObservationWithDistrict {
    ObservationWithDistrict {
        observation: data.into(),
        district: district.into(),
        state: state.into(),
    }
}

#[async_trait::async_trait]
impl DirectoryQuery for DieselEmploymentQueryRepository {
    async fn states_with_district_counts(
        &self,
    ) -> Result<Vec<StateWithDistrictCount>, DirectoryQueryError> {
        let mut conn = self.pool.get().await.map_err(directory_pool_error)?;

        let state_rows: Vec<StateRow> = states::table
            .select(StateRow::as_select())
            .order(states::state_name.asc())
            .load(&mut conn)
            .await
            .map_err(directory_query_error("list states"))?;

        let counts: Vec<(String, i64)> = districts::table
            .group_by(districts::state_code)
            .select((districts::state_code, diesel::dsl::count_star()))
            .load(&mut conn)
            .await
            .map_err(directory_query_error("count districts per state"))?;
        let counts: HashMap<String, i64> = counts.into_iter().collect();

        Ok(state_rows
            .into_iter()
            .map(|row| {
                let district_count = counts
                    .get(&row.state_code)
                    .copied()
                    .and_then(|count| u64::try_from(count).ok())
                    .unwrap_or(0);
                StateWithDistrictCount {
                    state: row.into(),
                    district_count,
                }
            })
            .collect())
    }

    async fn state_with_districts(
        &self,
        state_code: &str,
    ) -> Result<Option<StateWithDistricts>, DirectoryQueryError> {
        let mut conn = self.pool.get().await.map_err(directory_pool_error)?;

        let state_row: Option<StateRow> = states::table
            .find(state_code)
            .select(StateRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(directory_query_error("find state"))?;
        let Some(state_row) = state_row else {
            return Ok(None);
        };

        let district_rows: Vec<DistrictRow> = districts::table
            .filter(districts::state_code.eq(state_code))
            .select(DistrictRow::as_select())
            .order(districts::district_name.asc())
            .load(&mut conn)
            .await
            .map_err(directory_query_error("list state districts"))?;

        Ok(Some(StateWithDistricts {
            state: state_row.into(),
            districts: district_rows.into_iter().map(Into::into).collect(),
        }))
    }

    async fn districts(
        &self,
        state_code: Option<String>,
    ) -> Result<Vec<DistrictWithState>, DirectoryQueryError> {
        let mut conn = self.pool.get().await.map_err(directory_pool_error)?;

        let mut query = districts::table
            .inner_join(states::table)
            .select((DistrictRow::as_select(), StateRow::as_select()))
            .into_boxed();
        if let Some(code) = state_code {
            query = query.filter(districts::state_code.eq(code));
        }

        let rows: Vec<(DistrictRow, StateRow)> = query
            .order(districts::district_name.asc())
            .load(&mut conn)
            .await
            .map_err(directory_query_error("list districts"))?;

        Ok(rows
            .into_iter()
            .map(|(district, state)| DistrictWithState {
                district: district.into(),
                state: state.into(),
            })
            .collect())
    }

    async fn district(
        &self,
        district_code: &str,
    ) -> Result<Option<DistrictWithState>, DirectoryQueryError> {
        let mut conn = self.pool.get().await.map_err(directory_pool_error)?;

        let row: Option<(DistrictRow, StateRow)> = districts::table
            .inner_join(states::table)
            .filter(districts::district_code.eq(district_code))
            .select((DistrictRow::as_select(), StateRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(directory_query_error("find district"))?;

        Ok(row.map(|(district, state)| DistrictWithState {
            district: district.into(),
            state: state.into(),
        }))
    }
}

#[async_trait::async_trait]
impl ObservationQuery for DieselEmploymentQueryRepository {
    async fn observations(
        &self,
        filter: &ObservationFilter,
        limit: i64,
        offset: i64,
    ) -> Result<ObservationPage, ObservationQueryError> {
        let mut conn = self.pool.get().await.map_err(observation_pool_error)?;

        let mut query = mgnrega_data::table
            .inner_join(districts::table.inner_join(states::table))
            .select((
                MgnregaDataRow::as_select(),
                (DistrictRow::as_select(), StateRow::as_select()),
            ))
            .into_boxed();
        let mut count_query = mgnrega_data::table
            .select(diesel::dsl::count_star())
            .into_boxed();
        if let Some(code) = &filter.district_code {
            query = query.filter(mgnrega_data::district_code.eq(code.clone()));
            count_query = count_query.filter(mgnrega_data::district_code.eq(code.clone()));
        }
        if let Some(fin_year) = &filter.fin_year {
            query = query.filter(mgnrega_data::fin_year.eq(fin_year.clone()));
            count_query = count_query.filter(mgnrega_data::fin_year.eq(fin_year.clone()));
        }
        if let Some(month) = &filter.month {
            query = query.filter(mgnrega_data::month.eq(month.clone()));
            count_query = count_query.filter(mgnrega_data::month.eq(month.clone()));
        }

        let rows: Vec<JoinedRow> = query
            .order((mgnrega_data::fin_year.desc(), mgnrega_data::month.desc()))
            .limit(limit)
            .offset(offset)
            .load(&mut conn)
            .await
            .map_err(observation_query_error("list observations"))?;

        let total: i64 = count_query
            .get_result(&mut conn)
            .await
            .map_err(observation_query_error("count observations"))?;

        Ok(ObservationPage {
            records: rows.into_iter().map(to_joined).collect(),
            total: u64::try_from(total).unwrap_or(0),
        })
    }

    async fn latest_for_district(
        &self,
        district_code: &str,
    ) -> Result<Option<ObservationWithDistrict>, ObservationQueryError> {
        let mut conn = self.pool.get().await.map_err(observation_pool_error)?;

        let row: Option<JoinedRow> = mgnrega_data::table
            .inner_join(districts::table.inner_join(states::table))
            .filter(mgnrega_data::district_code.eq(district_code))
            .order((mgnrega_data::fin_year.desc(), mgnrega_data::month.desc()))
            .select((
                MgnregaDataRow::as_select(),
                (DistrictRow::as_select(), StateRow::as_select()),
            ))
            .first(&mut conn)
            .await
            .optional()
            .map_err(observation_query_error("latest observation"))?;

        Ok(row.map(to_joined))
    }

    async fn district_year(
        &self,
        district_code: &str,
        fin_year: Option<String>,
    ) -> Result<Vec<ObservationWithDistrict>, ObservationQueryError> {
        let mut conn = self.pool.get().await.map_err(observation_pool_error)?;

        let mut query = mgnrega_data::table
            .inner_join(districts::table.inner_join(states::table))
            .filter(mgnrega_data::district_code.eq(district_code.to_owned()))
            .select((
                MgnregaDataRow::as_select(),
                (DistrictRow::as_select(), StateRow::as_select()),
            ))
            .into_boxed();
        if let Some(year) = fin_year {
            query = query.filter(mgnrega_data::fin_year.eq(year));
        }

        let rows: Vec<JoinedRow> = query
            .order(mgnrega_data::month.asc())
            .load(&mut conn)
            .await
            .map_err(observation_query_error("district year observations"))?;

        Ok(rows.into_iter().map(to_joined).collect())
    }

    async fn available_years(
        &self,
        district_code: &str,
    ) -> Result<Vec<String>, ObservationQueryError> {
        let mut conn = self.pool.get().await.map_err(observation_pool_error)?;

        mgnrega_data::table
            .filter(mgnrega_data::district_code.eq(district_code))
            .select(mgnrega_data::fin_year)
            .distinct()
            .order(mgnrega_data::fin_year.desc())
            .load(&mut conn)
            .await
            .map_err(observation_query_error("available years"))
    }

    async fn state_year(
        &self,
        state_code: &str,
        fin_year: Option<String>,
    ) -> Result<Vec<Observation>, ObservationQueryError> {
        let mut conn = self.pool.get().await.map_err(observation_pool_error)?;

        let mut query = mgnrega_data::table
            .inner_join(districts::table)
            .filter(districts::state_code.eq(state_code.to_owned()))
            .select(MgnregaDataRow::as_select())
            .into_boxed();
        if let Some(year) = fin_year {
            query = query.filter(mgnrega_data::fin_year.eq(year));
        }

        let rows: Vec<MgnregaDataRow> = query
            .load(&mut conn)
            .await
            .map_err(observation_query_error("state year observations"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
