//! Reqwest-backed data.gov.in source adapter.
//!
//! This adapter owns transport details only: query-string assembly, timeout
//! and HTTP error mapping, and JSON decoding into domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::StatisticsResponseDto;
use crate::domain::ports::{
    EmploymentStatisticsSource, StatisticsPage, StatisticsQuery, StatisticsSourceError,
};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_USER_AGENT: &str = "mgnrega-backend-sync/0.1";

/// Statistics source adapter performing keyed GET requests against one
/// resource endpoint.
pub struct DataGovHttpSource {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl DataGovHttpSource {
    /// Build an adapter with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_timeout(endpoint, api_key, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Build an adapter with an explicit per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(
        endpoint: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl EmploymentStatisticsSource for DataGovHttpSource {
    async fn fetch_page(
        &self,
        query: &StatisticsQuery,
        offset: u64,
        limit: u64,
    ) -> Result<StatisticsPage, StatisticsSourceError> {
        let mut params: Vec<(&str, String)> = vec![
            ("api-key", self.api_key.clone()),
            ("format", "json".to_owned()),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];
        if let Some(state_name) = &query.state_name {
            params.push(("filters[state_name]", state_name.clone()));
        }
        if let Some(fin_year) = &query.fin_year {
            params.push(("filters[fin_year]", fin_year.clone()));
        }

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&params)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_page(body.as_ref())
    }
}

fn parse_page(body: &[u8]) -> Result<StatisticsPage, StatisticsSourceError> {
    let decoded: StatisticsResponseDto = serde_json::from_slice(body).map_err(|error| {
        StatisticsSourceError::decode(format!("invalid statistics JSON payload: {error}"))
    })?;
    Ok(decoded.into())
}

fn map_transport_error(error: reqwest::Error) -> StatisticsSourceError {
    if error.is_timeout() {
        StatisticsSourceError::timeout(error.to_string())
    } else {
        StatisticsSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> StatisticsSourceError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => StatisticsSourceError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            StatisticsSourceError::timeout(message)
        }
        _ if status.is_client_error() => StatisticsSourceError::invalid_request(message),
        _ => StatisticsSourceError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the non-network mapping helpers.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::rate_limited(StatusCode::TOO_MANY_REQUESTS)]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT)]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT)]
    #[case::bad_key(StatusCode::FORBIDDEN)]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR)]
    fn maps_http_statuses_to_expected_port_errors(#[case] status: StatusCode) {
        let error = map_status_error(status, b"{\"message\":\"nope\"}");
        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                assert!(matches!(error, StatisticsSourceError::RateLimited { .. }));
            }
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
                assert!(matches!(error, StatisticsSourceError::Timeout { .. }));
            }
            StatusCode::FORBIDDEN => {
                assert!(matches!(error, StatisticsSourceError::InvalidRequest { .. }));
            }
            _ => {
                assert!(matches!(error, StatisticsSourceError::Transport { .. }));
            }
        }
    }

    #[test]
    fn status_message_includes_a_bounded_body_preview() {
        let long_body = "x".repeat(500);
        let error = map_status_error(StatusCode::BAD_GATEWAY, long_body.as_bytes());
        let message = error.to_string();
        assert!(message.contains("status 502"));
        assert!(message.ends_with("..."));
    }

    #[test]
    fn malformed_json_maps_to_decode_error() {
        let error = parse_page(b"<html>gateway error</html>").expect_err("decode should fail");
        assert!(matches!(error, StatisticsSourceError::Decode { .. }));
    }

    #[test]
    fn well_formed_page_decodes_records_and_total() {
        let body = br#"{
            "records": [ { "district_code": "1808", "month": "05" } ],
            "total": 2500
        }"#;
        let page = parse_page(body).expect("page should decode");
        assert_eq!(page.total, 2500);
        assert_eq!(page.records.len(), 1);
    }
}
