//! Infrastructure-level errors (API transport and client wiring)

use serde::Deserialize;
use thiserror::Error;

/// Failure of a single API round-trip: a human-readable message plus its cause.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("unable to reach the Doppler API: {context}")]
    Transport {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    #[error("unexpected response from the Doppler API: {context}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    messages: Vec<String>,
}

impl ApiError {
    /// Build a status error, preferring the API's own messages over the HTTP reason.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let messages = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.messages)
            .unwrap_or_default();
        let message = if messages.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else {
            messages.join("; ")
        };
        Self::Status {
            status: status.as_u16(),
            message,
        }
    }

    /// HTTP status of the response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            Self::Decode { .. } => None,
        }
    }
}

/// Result type for a single API call.
pub type ApiResult<T> = Result<T, ApiError>;

/// Infrastructure errors raised while wiring the API client.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("no API token resolved (use --token, DOPPLER_TOKEN or the settings file)")]
    MissingToken,

    #[error("HTTP client setup failed: {context}")]
    Http {
        context: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn given_error_body_with_messages_when_from_status_then_joins_messages() {
        let body = r#"{"messages": ["Invalid config", "Try again"], "success": false}"#;

        let err = ApiError::from_status(StatusCode::BAD_REQUEST, body);

        assert_eq!(err.to_string(), "Invalid config; Try again (HTTP 400)");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn given_non_json_body_when_from_status_then_uses_reason() {
        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, "<html>oops</html>");

        assert_eq!(err.to_string(), "Bad Gateway (HTTP 502)");
    }
}
