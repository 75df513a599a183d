use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

use crate::services::github::RemoteError;

/// Guidance appended to authentication failures.
pub const TOKEN_GUIDANCE: &str = "supply a GitHub access token via the \
`Authorization: token <value>` header or the `token` query parameter";

/// Application-level error type for failures raised before the response
/// stream begins. Failures after the first streamed byte never reach
/// this boundary; they are embedded in the stream as markers instead.
#[derive(Debug)]
pub enum AppError {
    /// Missing or rejected access token
    Unauthorized(String),
    /// Unknown organization, owner, repository or team
    NotFound(String),
    /// The hosting API kept failing after the retry budget
    Upstream(String),
    /// Anything unclassified
    Internal(String),
}

/// Error body shape shared with the in-stream marker records.
#[derive(Serialize)]
struct ErrorBody {
    message: String,
    code: u16,
}

impl AppError {
    /// HTTP status for this error; the body carries the same code.
    pub fn code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::NotFound(_) => 404,
            Self::Upstream(_) | Self::Internal(_) => 500,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized(msg)
            | Self::NotFound(msg)
            | Self::Upstream(msg)
            | Self::Internal(msg) => write!(f, "{msg}"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = ErrorBody {
            message: self.to_string(),
            code: self.code(),
        };

        match self {
            Self::Unauthorized(_) => HttpResponse::Unauthorized().json(body),
            Self::NotFound(_) => HttpResponse::NotFound().json(body),
            Self::Upstream(_) | Self::Internal(_) => {
                HttpResponse::InternalServerError().json(body)
            }
        }
    }
}

impl From<RemoteError> for AppError {
    fn from(err: RemoteError) -> Self {
        match &err {
            RemoteError::Status { code: 401, .. } => {
                Self::Unauthorized(format!("{err}; {TOKEN_GUIDANCE}"))
            }
            RemoteError::Status { code: 404, .. } => Self::NotFound(err.to_string()),
            RemoteError::Status { code, .. } if *code >= 500 => Self::Upstream(err.to_string()),
            RemoteError::Transport(_) | RemoteError::Decode(_) => Self::Upstream(err.to_string()),
            RemoteError::Status { .. } => Self::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_the_taxonomy() {
        assert_eq!(AppError::Unauthorized("no token".to_string()).code(), 401);
        assert_eq!(AppError::NotFound("Not Found".to_string()).code(), 404);
        assert_eq!(AppError::Upstream("Bad Gateway".to_string()).code(), 500);
        assert_eq!(AppError::Internal("boom".to_string()).code(), 500);
    }

    #[test]
    fn display_is_the_bare_message() {
        let err = AppError::NotFound("Not Found".to_string());
        assert_eq!(err.to_string(), "Not Found");
    }

    #[test]
    fn remote_401_maps_to_unauthorized_with_guidance() {
        let err: AppError = RemoteError::Status {
            code: 401,
            message: "Unauthorized".to_string(),
        }
        .into();

        assert_eq!(err.code(), 401);
        assert!(err.to_string().contains("Authorization: token"));
    }

    #[test]
    fn remote_404_maps_to_not_found_with_status_text() {
        let err: AppError = RemoteError::Status {
            code: 404,
            message: "Not Found".to_string(),
        }
        .into();

        assert_eq!(err.code(), 404);
        assert_eq!(err.to_string(), "Not Found");
    }

    #[test]
    fn remote_5xx_and_transport_map_to_upstream() {
        let err: AppError = RemoteError::Status {
            code: 502,
            message: "Bad Gateway".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Upstream(_)));

        let err: AppError = RemoteError::Transport("connection reset".to_string()).into();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[test]
    fn other_remote_statuses_map_to_internal() {
        let err: AppError = RemoteError::Status {
            code: 403,
            message: "Forbidden".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.code(), 500);
    }

    #[test]
    fn error_body_serializes_message_and_code() {
        let body = ErrorBody {
            message: "Not Found".to_string(),
            code: 404,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "Not Found", "code": 404 }));
    }
}
