//! MGNREGA open-data dashboard backend.
//!
//! Ingests district/state employment statistics from the data.gov.in
//! resource API, stores them in PostgreSQL, and serves them over a REST API
//! with comparisons, geolocation-based district detection, and an AI
//! assistant.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use doc::ApiDoc;
pub use middleware::RequestTrace;
