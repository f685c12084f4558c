use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use fc_domain::error::Error;

/// Domain error rendered as `{"error": "..."}` with a matching status.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self(Error::Validation(message.into()))
    }

    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::SessionNotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict { .. } => StatusCode::CONFLICT,
            Error::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            e if e.is_provider_failure() => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, status = status.as_u16(), "request failed");
        } else {
            tracing::debug!(error = %self.0, status = status.as_u16(), "request rejected");
        }
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (Error::Validation("x".into()), StatusCode::BAD_REQUEST),
            (Error::SessionNotFound("s".into()), StatusCode::NOT_FOUND),
            (
                Error::Conflict {
                    session_id: "s".into(),
                    expected: 1,
                    found: 2,
                },
                StatusCode::CONFLICT,
            ),
            (
                Error::Provider {
                    provider: "p".into(),
                    message: "m".into(),
                },
                StatusCode::BAD_GATEWAY,
            ),
            (Error::Http("refused".into()), StatusCode::BAD_GATEWAY),
            (Error::Timeout("slow".into()), StatusCode::GATEWAY_TIMEOUT),
            (Error::Other("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError(err).status(), expected);
        }
    }
}
