//! Request-level failures and their HTTP mapping
//!
//! Every failure in the request lifecycle becomes an `ApiError`, and
//! `ApiError::status` is the single place that decides the status code.
//! Error bodies are plain text.

use axum::{
    extract::rejection::BytesRejection,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::provider::ProviderError;

/// Errors that end a gateway request
#[derive(Error, Debug)]
pub enum ApiError {
    /// Server-side setup problem, e.g. no API key
    #[error("{0}")]
    Configuration(String),

    /// Provider answered non-2xx; status and body are forwarded verbatim
    #[error("Upstream returned {status}")]
    Upstream { status: u16, body: String },

    /// Provider unreachable, timed out, or answered unreadably
    #[error("{0}")]
    Transport(String),

    /// Request body is not JSON, or names an unusable model
    #[error("Invalid request: {0}")]
    MalformedRequest(String),

    /// Request body exceeds `server.max_body_bytes`
    #[error("Request body too large")]
    PayloadTooLarge,

    /// Structured output was expected and the model did not produce it
    #[error("Model did not return valid JSON")]
    MalformedModelOutput,

    #[error("Not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Configuration(_)
            | ApiError::Transport(_)
            | ApiError::MalformedRequest(_)
            | ApiError::MalformedModelOutput => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text sent to the client
    pub fn message(&self) -> String {
        let message = match self {
            ApiError::Upstream { body, .. } if body.is_empty() => "Upstream error".to_string(),
            ApiError::Upstream { body, .. } => body.clone(),
            other => other.to_string(),
        };
        if message.is_empty() {
            "Server error".to_string()
        } else {
            message
        }
    }

    /// Error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            ApiError::Configuration(_) => "configuration",
            ApiError::Upstream { .. } => "upstream",
            ApiError::Transport(_) => "transport",
            ApiError::MalformedRequest(_) | ApiError::PayloadTooLarge => "request",
            ApiError::MalformedModelOutput => "model_output",
            ApiError::NotFound | ApiError::MethodNotAllowed => "routing",
        }
    }
}

impl From<ProviderError> for ApiError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::Upstream { status, body } => ApiError::Upstream { status, body },
            ProviderError::MissingApiKey(_) | ProviderError::Client(_) => {
                ApiError::Configuration(error.to_string())
            }
            ProviderError::Transport(_) | ProviderError::Decode(_) => {
                ApiError::Transport(error.to_string())
            }
            ProviderError::InvalidModel(_) => ApiError::MalformedRequest(error.to_string()),
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::MalformedRequest(rejection.body_text())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                (header::CACHE_CONTROL, "no-store"),
            ],
            self.message(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::Configuration("x".into()), 500),
            (
                ApiError::Upstream {
                    status: 429,
                    body: String::new(),
                },
                429,
            ),
            (ApiError::Transport("x".into()), 500),
            (ApiError::MalformedRequest("x".into()), 500),
            (ApiError::MalformedModelOutput, 500),
            (ApiError::PayloadTooLarge, 413),
            (ApiError::NotFound, 404),
            (ApiError::MethodNotAllowed, 405),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status().as_u16(), expected, "{error:?}");
        }
    }

    #[test]
    fn test_upstream_message_is_raw_body() {
        let error = ApiError::Upstream {
            status: 400,
            body: r#"{"error":{"message":"API key not valid"}}"#.to_string(),
        };
        assert_eq!(error.message(), r#"{"error":{"message":"API key not valid"}}"#);

        let empty = ApiError::Upstream {
            status: 503,
            body: String::new(),
        };
        assert_eq!(empty.message(), "Upstream error");
    }

    #[test]
    fn test_empty_message_falls_back() {
        assert_eq!(ApiError::Transport(String::new()).message(), "Server error");
    }

    #[test]
    fn test_from_provider_error() {
        let missing: ApiError = ProviderError::MissingApiKey("GEMINI_API_KEY".into()).into();
        assert!(matches!(missing, ApiError::Configuration(_)));
        assert_eq!(missing.message(), "Missing GEMINI_API_KEY on the server");

        let upstream: ApiError = ProviderError::Upstream {
            status: 429,
            body: "slow down".into(),
        }
        .into();
        assert_eq!(upstream.status(), StatusCode::TOO_MANY_REQUESTS);

        let transport: ApiError = ProviderError::Transport("Request timed out".into()).into();
        assert_eq!(transport.message(), "Request timed out");

        let decode: ApiError = ProviderError::Decode("eof".into()).into();
        assert!(matches!(decode, ApiError::Transport(_)));

        let model: ApiError = ProviderError::InvalidModel("../x".into()).into();
        assert!(matches!(model, ApiError::MalformedRequest(_)));
        assert_eq!(model.message(), "Invalid request: Invalid model name '../x'");
    }

    #[test]
    fn test_into_response_headers() {
        let response = ApiError::MalformedModelOutput.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
    }
}
