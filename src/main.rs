//! Backend entry-point: wires adapters and serves the REST API.

use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use mgnrega_backend::ApiDoc;
use mgnrega_backend::RequestTrace;
use mgnrega_backend::inbound::http;
use mgnrega_backend::outbound::persistence::{DbPool, PoolConfig, migrations};
use mgnrega_backend::server::config::AppConfig;
use mgnrega_backend::server::build_http_state;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    migrations::run_pending(&config.database_url)
        .await
        .map_err(|error| std::io::Error::other(format!("run migrations: {error}")))?;

    let pool = DbPool::new(PoolConfig::new(&config.database_url))
        .await
        .map_err(|error| std::io::Error::other(format!("create database pool: {error}")))?;

    let state = build_http_state(&config, &pool)
        .map_err(|error| std::io::Error::other(format!("wire application: {error}")))?;
    let state = web::Data::new(state);

    info!(addr = %config.bind_addr, "starting MGNREGA API server");
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(state.clone())
            .wrap(RequestTrace)
            .configure(http::configure);

        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );

        app
    })
    .bind(config.bind_addr)?;

    server.run().await
}
