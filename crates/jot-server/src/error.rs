use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use jot_actor::{ActorError, CallError};

/// HTTP projection of a failed store call.
///
/// Each kind maps to a distinct status so clients can tell "not found"
/// from "timed out" from "storage failure" and decide whether to retry.
/// Nothing here terminates the process — that is reserved for startup.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("store call timed out")]
    Timeout,

    #[error("store is unavailable")]
    Unavailable,

    #[error("storage failure")]
    Storage(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CallError> for ApiError {
    fn from(err: CallError) -> Self {
        match err {
            CallError::Timeout(_) => Self::Timeout,
            CallError::Closed => Self::Unavailable,
            CallError::Actor(ActorError::NotFound { family, key }) => {
                Self::NotFound(format!("key {key:?} not found in family {family:?}"))
            }
            CallError::Actor(ActorError::InvalidRequest(reason)) => Self::BadRequest(reason),
            CallError::Actor(ActorError::Storage(e)) => Self::Storage(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, error = %self, "request failed");
        }
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn distinct_statuses_per_error_kind() {
        let not_found: ApiError = CallError::Actor(ActorError::NotFound {
            family: "f".into(),
            key: "k".into(),
        })
        .into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let timeout: ApiError = CallError::Timeout(Duration::from_secs(5)).into();
        assert_eq!(timeout.status(), StatusCode::GATEWAY_TIMEOUT);

        let gone: ApiError = CallError::Closed.into();
        assert_eq!(gone.status(), StatusCode::SERVICE_UNAVAILABLE);

        let bad: ApiError = CallError::Actor(ActorError::InvalidRequest("no".into())).into();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_message_names_the_key() {
        let err: ApiError = CallError::Actor(ActorError::NotFound {
            family: "ram_usage".into(),
            key: "t9".into(),
        })
        .into();
        assert!(err.to_string().contains("t9"));
    }
}
