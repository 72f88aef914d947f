use crate::query::errors::ReportError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// API error type with HTTP status code mapping.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
    Report(ReportError),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
            Self::Report(e) => write!(f, "Report error: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            Self::Report(
                e @ (ReportError::InvalidRange { .. } | ReportError::InvalidMaxResults),
            ) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::Report(e @ ReportError::InvalidConfiguration(_)) => {
                tracing::error!(error = %e, "Report engine misconfigured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            Self::Report(
                e @ (ReportError::Gateway { .. } | ReportError::MalformedResponse { .. }),
            ) => {
                tracing::error!(error = %e, "Analytics provider error");
                (
                    StatusCode::BAD_GATEWAY,
                    "Analytics provider error".to_string(),
                )
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}

impl From<ReportError> for ApiError {
    fn from(e: ReportError) -> Self {
        Self::Report(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GatewayError;
    use axum::response::IntoResponse;

    #[test]
    fn test_bad_request_status() {
        let err = ApiError::BadRequest("invalid input".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_range_is_bad_request() {
        let err = ApiError::from(ReportError::InvalidRange {
            start: chrono::NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            end: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_gateway_error_is_bad_gateway() {
        let err = ApiError::from(ReportError::Gateway {
            metrics: vec!["ga:sessions".to_string()],
            period: None,
            source: GatewayError::Transport("reset".to_string()),
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_malformed_is_bad_gateway() {
        let err = ApiError::from(ReportError::MalformedResponse {
            row: vec!["abc".to_string()],
            reason: "bad date".to_string(),
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_configuration_is_internal() {
        let err = ApiError::from(ReportError::InvalidConfiguration("no view".to_string()));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display() {
        let err = ApiError::BadRequest("test".to_string());
        assert_eq!(format!("{err}"), "Bad request: test");
    }
}
