//! PostgreSQL persistence adapters: pool, schema, rows, and repositories.

pub mod diesel_helpers;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod schema;

mod diesel_employment_ingest_repository;
mod diesel_employment_query_repository;
mod diesel_sync_run_repository;

pub use diesel_employment_ingest_repository::DieselEmploymentIngestRepository;
pub use diesel_employment_query_repository::DieselEmploymentQueryRepository;
pub use diesel_sync_run_repository::DieselSyncRunRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
