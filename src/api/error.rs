//! API error types for the ABL REST API client.

use serde_json::Value;
use thiserror::Error;

use crate::auth::CredentialsError;

/// API-specific error type for the ABL REST API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Key pair rejected at construction
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(#[from] CredentialsError),

    /// Network-level failure (DNS, connection refused, TLS, ...), unmodified
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a status other than 200
    #[error("API error {status}: {body}")]
    Api { status: u16, body: Value },

    /// Endpoint input could not be turned into a JSON object
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A path parameter was absent or null in the endpoint input
    #[error("Missing path parameter '{parameter}' for {endpoint}")]
    MissingPathParameter {
        endpoint: &'static str,
        parameter: String,
    },

    /// Response body did not match the requested type
    #[error("Deserialization error: {0}")]
    Deserialize(String),

    /// Unusable client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// HTTP status of an `Api` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Parsed response body of an `Api` error.
    pub fn body(&self) -> Option<&Value> {
        match self {
            ApiError::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// View an `Api` error body as the conventional `{status, errors}` shape.
    ///
    /// The HTTP status fills in `status` when the body omits it. Returns `None`
    /// for other variants or for bodies that are not JSON objects.
    pub fn error_response(&self) -> Option<ErrorResponse> {
        let ApiError::Api { status, body } = self else {
            return None;
        };
        if !body.is_object() {
            return None;
        }
        let mut response: ErrorResponse = serde_json::from_value(body.clone()).ok()?;
        response.status.get_or_insert(*status);
        Some(response)
    }

    /// Whether the server listed `code` among its errors.
    pub fn has_error(&self, code: &str) -> bool {
        self.error_response()
            .map(|r| r.errors.iter().any(|e| e == code))
            .unwrap_or(false)
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error body convention used by the API server.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    /// HTTP status mirrored in the body
    #[serde(default)]
    pub status: Option<u16>,
    /// Error codes or messages, e.g. `"access-denied"`
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ErrorResponse {
    /// First error message, if any.
    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_response_from_api_error() {
        let err = ApiError::Api {
            status: 403,
            body: json!({"status": 403, "errors": ["access-denied"]}),
        };
        let response = err.error_response().unwrap();
        assert_eq!(response.status, Some(403));
        assert_eq!(response.first_error(), Some("access-denied"));
        assert!(err.has_error("access-denied"));
        assert!(!err.has_error("not-found"));
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn test_error_response_status_falls_back_to_http_status() {
        let err = ApiError::Api {
            status: 404,
            body: json!({"errors": ["not-found"]}),
        };
        assert_eq!(err.error_response().unwrap().status, Some(404));
    }

    #[test]
    fn test_error_response_for_non_object_body() {
        let err = ApiError::Api {
            status: 502,
            body: json!("Bad Gateway"),
        };
        assert!(err.error_response().is_none());
        assert_eq!(err.body(), Some(&json!("Bad Gateway")));
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::MissingPathParameter {
            endpoint: "get_activity",
            parameter: "_id".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing path parameter '_id' for get_activity"
        );

        let err = ApiError::Api {
            status: 400,
            body: json!({"errors": ["invalid"]}),
        };
        assert_eq!(err.to_string(), r#"API error 400: {"errors":["invalid"]}"#);
    }
}
