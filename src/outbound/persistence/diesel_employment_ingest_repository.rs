//! PostgreSQL-backed ingest adapter.
//!
//! Applies one record's three upserts in referential order so a district
//! row always exists before the observation that references it. Each
//! statement is `INSERT .. ON CONFLICT .. DO UPDATE` on the table's natural
//! key, which is what makes re-syncing the same period idempotent.

use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::observation::ObservationUpsert;
use crate::domain::ports::{EmploymentIngestRepository, IngestRepositoryError};

use super::diesel_helpers::{map_diesel_error_message, map_pool_error_message};
use super::models::{MgnregaDataUpsertRow, NewDistrictRow, NewStateRow};
use super::pool::{DbPool, PoolError};
use super::schema::{districts, mgnrega_data, states};

/// Diesel-backed implementation of the ingest port.
#[derive(Clone)]
pub struct DieselEmploymentIngestRepository {
    pool: DbPool,
}

impl DieselEmploymentIngestRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> IngestRepositoryError {
    IngestRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(operation: &'static str) -> impl Fn(diesel::result::Error) -> IngestRepositoryError {
    move |error| IngestRepositoryError::query(map_diesel_error_message(error, operation))
}

#[async_trait::async_trait]
impl EmploymentIngestRepository for DieselEmploymentIngestRepository {
    async fn upsert_record(&self, record: &ObservationUpsert) -> Result<(), IngestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(states::table)
            .values(NewStateRow {
                state_code: &record.state.code,
                state_name: &record.state.name,
            })
            .on_conflict(states::state_code)
            .do_update()
            .set(states::state_name.eq(excluded(states::state_name)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error("state upsert"))?;

        diesel::insert_into(districts::table)
            .values(NewDistrictRow {
                district_code: &record.district.code,
                district_name: &record.district.name,
                state_code: &record.district.state_code,
            })
            .on_conflict(districts::district_code)
            .do_update()
            .set((
                districts::district_name.eq(excluded(districts::district_name)),
                districts::state_code.eq(excluded(districts::state_code)),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error("district upsert"))?;

        let row = MgnregaDataUpsertRow::new(&record.key, &record.fields);
        diesel::insert_into(mgnrega_data::table)
            .values(&row)
            .on_conflict((
                mgnrega_data::district_code,
                mgnrega_data::fin_year,
                mgnrega_data::month,
            ))
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error("observation upsert"))?;

        Ok(())
    }
}
