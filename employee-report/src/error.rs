//! Error types for employee-report
//!
//! Handler errors render as small HTML documents; the dashboard is a
//! browser UI, not a JSON API.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::components::html::escape;

/// Handler / bootstrap error
#[derive(Debug, Error)]
pub enum ReportError {
    /// Database unreachable or a query failed (503)
    #[error("Data unavailable: {0}")]
    DataUnavailable(employee_events::Error),

    /// Missing or malformed request input (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<employee_events::Error> for ReportError {
    fn from(err: employee_events::Error) -> Self {
        match err {
            employee_events::Error::InvalidInput(msg) => ReportError::BadRequest(msg),
            other => ReportError::DataUnavailable(other),
        }
    }
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        let (status, title, detail) = match self {
            ReportError::DataUnavailable(ref err) => {
                error!("Request failed, data unavailable: {}", err);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Data unavailable",
                    "The employee events database could not be queried. Try again later.".to_string(),
                )
            }
            ReportError::BadRequest(msg) => {
                warn!("Rejected request: {}", msg);
                (StatusCode::BAD_REQUEST, "Invalid request", msg)
            }
            ReportError::Config(ref msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error",
                    "The report service is misconfigured.".to_string(),
                )
            }
        };

        let body = format!(
            r#"<div class="error" role="alert"><h2>{}</h2><p>{}</p></div>"#,
            title,
            escape(&detail)
        );

        (status, Html(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let err: ReportError = employee_events::Error::InvalidInput("nope".into()).into();
        assert!(matches!(err, ReportError::BadRequest(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_database_failure_maps_to_unavailable() {
        let err: ReportError = employee_events::Error::NotFound("x.db".into()).into();
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
