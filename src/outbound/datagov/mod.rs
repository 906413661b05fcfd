//! Outbound adapter for the data.gov.in statistics resource.

pub mod dto;
mod http_source;

pub use http_source::DataGovHttpSource;
