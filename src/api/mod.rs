//! REST API client module for ABL.
//!
//! This module provides a signing HTTP client for the ABL operator API:
//! activities, events, time slots, guides, coupons, bookings, transactions
//! and users.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use abl_client::api::AblApiClient;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Both keys must be exactly 64 characters
//!     let client = AblApiClient::new(public_key, private_key)?;
//!
//!     // GET /activities?limit=10
//!     let activities = client.get_activities(json!({"limit": 10})).await?;
//!
//!     // PUT /activities/A1 with body {"title": "Sunset kayak"}
//!     let updated = client
//!         .edit_activity(json!({"_id": "A1", "title": "Sunset kayak"}))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Client Configuration
//!
//! ```rust,ignore
//! use abl_client::api::AblApiClient;
//!
//! let client = AblApiClient::builder(public_key, private_key)
//!     .base_url("https://api.example.com")
//!     .path_prefix("/api/v1")
//!     .verbose(true)
//!     .build()?;
//! ```
//!
//! # Error Handling
//!
//! All methods return `ApiResult<T>` which is an alias for `Result<T, ApiError>`.
//! Transport failures and non-200 responses are distinct variants:
//!
//! ```rust,ignore
//! use abl_client::api::ApiError;
//!
//! match client.get_event(json!({"eventInstanceId": "E1"})).await {
//!     Ok(event) => println!("Event: {}", event),
//!     Err(e) if e.has_error("access-denied") => println!("Not allowed"),
//!     Err(ApiError::Api { status, body }) => println!("API error {}: {}", status, body),
//!     Err(ApiError::Transport(e)) => println!("Network error: {}", e),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod request;

// Re-export main types for convenience
pub use client::{AblApiClient, AblApiClientBuilder};
pub use config::ClientConfig;
pub use endpoints::{routes, to_payload, Endpoint};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use request::{SignedEnvelope, SignedRequest};
