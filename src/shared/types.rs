//! Shared type definitions for the ABL SDK.
//!
//! Used by both the canonical URL builder and the HTTP client.

use std::fmt;

use serde::{Deserialize, Serialize};

/// JSON object sent with a request, as query parameters or as the body.
pub type Payload = serde_json::Map<String, serde_json::Value>;

// ============================================================================
// Method Enum
// ============================================================================

/// HTTP methods accepted by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Whether the payload travels as the request body.
    ///
    /// POST, PUT and PATCH send a JSON body; GET and DELETE send the payload
    /// as URL query parameters.
    pub fn carries_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }

    /// Returns the uppercase method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "http")]
impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

// ============================================================================
// PayloadMode Enum
// ============================================================================

/// What an endpoint sends once its path parameters are taken out of the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PayloadMode {
    /// Send every remaining input field.
    #[default]
    Remainder,
    /// Send an empty payload; extra input fields are ignored.
    Empty,
}
