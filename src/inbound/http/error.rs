//! HTTP adapter mapping for domain errors.
//!
//! Every failure — whatever the endpoint — renders the same envelope:
//! `{"success": false, "error": "..."}` plus an appropriate status code, so
//! the frontend has exactly one error shape to handle. Internal errors are
//! logged server-side and redacted before leaving the process.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::error;

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn client_message(err: &Error) -> &str {
    match err.code() {
        ErrorCode::InternalError => "Internal server error",
        _ => err.message(),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if self.code() == ErrorCode::InternalError {
            error!(message = self.message(), "internal error surfaced to client");
        }
        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "error": client_message(self),
        }))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak framework internals to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::invalid(Error::invalid_request("stateName is required"), 400)]
    #[case::not_found(Error::not_found("district unknown"), 404)]
    #[case::unavailable(Error::service_unavailable("database down"), 503)]
    #[case::internal(Error::internal("secret detail"), 500)]
    fn codes_map_to_expected_statuses(#[case] err: Error, #[case] status: u16) {
        assert_eq!(err.status_code().as_u16(), status);
    }

    #[actix_web::test]
    async fn envelope_carries_success_flag_and_message() {
        let response = Error::not_found("district unknown").error_response();
        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("body bytes");
        let parsed: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(parsed["success"], false);
        assert_eq!(parsed["error"], "district unknown");
    }

    #[actix_web::test]
    async fn internal_messages_are_redacted() {
        let response = Error::internal("connection string leaked").error_response();
        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("body bytes");
        let parsed: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(parsed["error"], "Internal server error");
    }
}
