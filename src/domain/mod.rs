//! Domain entities, pure logic, and orchestration services.
//!
//! Everything here is transport and storage agnostic: I/O happens behind
//! the traits in [`ports`], and inbound/outbound adapters translate to and
//! from HTTP, PostgreSQL, and the external APIs.

pub mod aggregates;
pub mod chat;
pub mod district_match;
pub mod error;
pub mod financial_year;
pub mod location;
pub mod observation;
pub mod ports;
pub mod record_mapping;
pub mod sync;

pub use self::error::{Error, ErrorCode};
pub use self::financial_year::FinancialYear;

/// Convenient result alias for operations that surface domain errors.
pub type ApiResult<T> = Result<T, Error>;
