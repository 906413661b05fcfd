//! Environment-driven application configuration.

use std::net::SocketAddr;

use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_DATAGOV_ENDPOINT: &str =
    "https://api.data.gov.in/resource/ee03643a-ee4c-48c2-ac30-9f2ff26ab722";
const DEFAULT_NOMINATIM_ENDPOINT: &str = "https://nominatim.openstreetmap.org/reverse";
const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash-exp:generateContent";

/// Errors raised while assembling the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is absent or blank.
    #[error("missing required environment variable {name}")]
    Missing { name: &'static str },
    /// A variable is present but unusable.
    #[error("invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub datagov_endpoint: Url,
    pub datagov_api_key: String,
    pub nominatim_endpoint: Url,
    pub gemini_endpoint: Url,
    /// Absent when chat is not configured; the chatbot endpoint then fails
    /// with a service-unavailable error instead of a bad upstream call.
    pub gemini_api_key: Option<String>,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = optional("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned())
            .parse::<SocketAddr>()
            .map_err(|error| ConfigError::Invalid {
                name: "BIND_ADDR",
                message: error.to_string(),
            })?;

        Ok(Self {
            bind_addr,
            database_url: required("DATABASE_URL")?,
            datagov_endpoint: url_var("DATA_GOV_ENDPOINT", DEFAULT_DATAGOV_ENDPOINT)?,
            datagov_api_key: required("DATA_GOV_API_KEY")?,
            nominatim_endpoint: url_var("NOMINATIM_ENDPOINT", DEFAULT_NOMINATIM_ENDPOINT)?,
            gemini_endpoint: url_var("GEMINI_ENDPOINT", DEFAULT_GEMINI_ENDPOINT)?,
            gemini_api_key: optional("GEMINI_API_KEY"),
        })
    }
}

/// The subset of configuration the sync CLI needs. Unlike [`AppConfig`],
/// `DATABASE_URL` is optional here because the CLI accepts it as a flag.
#[derive(Debug, Clone)]
pub struct SyncCliConfig {
    pub database_url: Option<String>,
    pub datagov_endpoint: Url,
    pub datagov_api_key: String,
}

impl SyncCliConfig {
    /// Read the sync CLI configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: optional("DATABASE_URL"),
            datagov_endpoint: url_var("DATA_GOV_ENDPOINT", DEFAULT_DATAGOV_ENDPOINT)?,
            datagov_api_key: required("DATA_GOV_API_KEY")?,
        })
    }
}

fn optional(name: &'static str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing { name })
}

fn url_var(name: &'static str, default: &str) -> Result<Url, ConfigError> {
    let raw = optional(name).unwrap_or_else(|| default.to_owned());
    Url::parse(&raw).map_err(|error| ConfigError::Invalid {
        name,
        message: error.to_string(),
    })
}
