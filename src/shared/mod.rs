//! Shared utilities and types used by the signing and HTTP layers.

pub mod canonical;
pub mod types;

// Re-export commonly used items
pub use canonical::{body_text, canonical_body, canonical_url, encode_query, flatten_payload};
pub use types::*;
