//! PostgreSQL-backed sync audit-log adapter.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{
    DatasetCounts, SyncRunRecord, SyncRunRepository, SyncRunRepositoryError, SyncRunStatus,
    SyncRunType,
};

use super::diesel_helpers::{map_diesel_error_message, map_pool_error_message};
use super::models::{NewSyncLogRow, SyncLogRow};
use super::pool::{DbPool, PoolError};
use super::schema::{districts, mgnrega_data, states, sync_logs};

/// Diesel-backed implementation of the sync run repository.
#[derive(Clone)]
pub struct DieselSyncRunRepository {
    pool: DbPool,
}

impl DieselSyncRunRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SyncRunRepositoryError {
    SyncRunRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(
    operation: &'static str,
) -> impl Fn(diesel::result::Error) -> SyncRunRepositoryError {
    move |error| SyncRunRepositoryError::query(map_diesel_error_message(error, operation))
}

#[async_trait::async_trait]
impl SyncRunRepository for DieselSyncRunRepository {
    async fn create_started(
        &self,
        run_type: SyncRunType,
        started_at: DateTime<Utc>,
    ) -> Result<Uuid, SyncRunRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(sync_logs::table)
            .values(NewSyncLogRow {
                sync_type: run_type.as_str(),
                status: SyncRunStatus::Started.as_str(),
                started_at,
            })
            .returning(sync_logs::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error("create sync log"))
    }

    async fn mark_completed(
        &self,
        id: Uuid,
        record_count: u64,
        completed_at: DateTime<Utc>,
    ) -> Result<(), SyncRunRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count = i64::try_from(record_count).unwrap_or(i64::MAX);
        diesel::update(sync_logs::table.find(id))
            .set((
                sync_logs::status.eq(SyncRunStatus::Completed.as_str()),
                sync_logs::record_count.eq(Some(count)),
                sync_logs::completed_at.eq(Some(completed_at)),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error("mark sync completed"))?;
        Ok(())
    }

    async fn mark_failed(
        &self,
        id: Uuid,
        error_message: &str,
        completed_at: DateTime<Utc>,
    ) -> Result<(), SyncRunRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(sync_logs::table.find(id))
            .set((
                sync_logs::status.eq(SyncRunStatus::Failed.as_str()),
                sync_logs::error_msg.eq(Some(error_message)),
                sync_logs::completed_at.eq(Some(completed_at)),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error("mark sync failed"))?;
        Ok(())
    }

    async fn recent_runs(&self, limit: i64) -> Result<Vec<SyncRunRecord>, SyncRunRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SyncLogRow> = sync_logs::table
            .order(sync_logs::started_at.desc())
            .limit(limit)
            .select(SyncLogRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error("recent sync runs"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn last_successful(&self) -> Result<Option<SyncRunRecord>, SyncRunRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<SyncLogRow> = sync_logs::table
            .filter(sync_logs::status.eq(SyncRunStatus::Completed.as_str()))
            .order(sync_logs::completed_at.desc())
            .select(SyncLogRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error("last successful sync"))?;

        Ok(row.map(Into::into))
    }

    async fn dataset_counts(&self) -> Result<DatasetCounts, SyncRunRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let records: i64 = mgnrega_data::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error("count observations"))?;
        let state_count: i64 = states::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error("count states"))?;
        let district_count: i64 = districts::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error("count districts"))?;

        Ok(DatasetCounts {
            records: u64::try_from(records).unwrap_or(0),
            states: u64::try_from(state_count).unwrap_or(0),
            districts: u64::try_from(district_count).unwrap_or(0),
        })
    }
}
