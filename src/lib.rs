//! # ABL Rust SDK
//!
//! A Rust SDK for the ABL operator API.
//!
//! ## Modules
//!
//! - [`auth`]: API key pair validation and request signing
//! - [`api`]: Signing REST client with one method per endpoint
//! - [`shared`]: Canonical URL construction and shared types
//! - [`network`]: Default deployment and header constants
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use abl_client::api::AblApiClient;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AblApiClient::new(public_key, private_key)?;
//!
//!     let event = client.get_event(json!({"eventInstanceId": "E1"})).await?;
//!     println!("Event: {}", event);
//!
//!     let daily = client.get_daily_events(json!({"date": "2016-03-02"})).await?;
//!     println!("{} events", daily["list"].as_array().map_or(0, |l| l.len()));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Signing
//!
//! Every request carries the public key, a millisecond timestamp and an
//! HMAC-SHA256 signature over the canonical string and that timestamp. The
//! canonical string is the resource path plus the sorted payload query for GET
//! and DELETE, or plus the exact JSON body for POST, PUT and PATCH. See
//! [`auth::sign`], [`shared::canonical_url`] and [`shared::canonical_body`].

// ============================================================================
// MODULES
// ============================================================================

/// Network constants (default deployment, header names).
pub mod network;

/// API key pair validation and request signing.
pub mod auth;

/// Shared utilities and types.
/// Used by both the signing and HTTP layers.
pub mod shared;

/// REST API client module.
#[cfg(feature = "http")]
pub mod api;

// ============================================================================
// PRELUDE
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use abl_client::prelude::*;
/// ```
pub mod prelude {
    // Auth exports
    pub use crate::auth::{
        current_timestamp_ms, sign, Credentials, CredentialsError, CredentialsResult, KEY_LENGTH,
    };

    // Shared exports
    pub use crate::shared::{
        body_text, canonical_body, canonical_url, encode_query, Method, Payload, PayloadMode,
    };

    // Network constants
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_PATH_PREFIX};

    // API module exports
    #[cfg(feature = "http")]
    pub use crate::api::{
        routes, AblApiClient, AblApiClientBuilder, ApiError, ApiResult, ClientConfig, Endpoint,
        ErrorResponse, SignedEnvelope, SignedRequest,
    };
}
