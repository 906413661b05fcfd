//! HTTP inbound adapter exposing the REST endpoints.

pub mod chatbot;
pub mod districts;
pub mod employment_data;
pub mod error;
pub mod health;
pub mod location;
pub mod schemas;
pub mod state;
pub mod states;
pub mod sync;

pub use error::ApiResult;

use actix_web::web;

/// Register every endpoint under the `/api` scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(health::health)
            .service(states::list_states)
            .service(states::get_state)
            .service(districts::list_districts)
            .service(districts::get_district)
            .service(employment_data::list_observations)
            .service(employment_data::latest_observation)
            .service(employment_data::comparison)
            .service(employment_data::state_average)
            .service(sync::sync_state)
            .service(sync::sync_latest)
            .service(sync::sync_status)
            .service(location::detect_district)
            .service(chatbot::chatbot),
    );
}

#[cfg(test)]
mod tests;
