//! Network constants for the ABL SDK.

/// Default REST API base URL (local operator deployment).
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default path prefix prepended to every endpoint path.
pub const DEFAULT_PATH_PREFIX: &str = "/";

/// Header carrying the client's public key.
pub const ACCESS_KEY_HEADER: &str = "X-ABL-Access-Key";

/// Header carrying the request signature.
pub const SIGNATURE_HEADER: &str = "X-ABL-Signature";

/// Header carrying the millisecond timestamp bound into the signature.
pub const DATE_HEADER: &str = "X-ABL-Date";

/// Content type sent with every request.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Environment variables read by `ClientConfig::from_env`.
pub const API_URL_ENV: &str = "ABL_API_URL";
pub const API_PREFIX_ENV: &str = "ABL_API_PREFIX";
pub const DEBUG_ENV: &str = "ABL_DEBUG";
