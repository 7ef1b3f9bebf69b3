//! ABL REST API client implementation.
//!
//! The [`AblApiClient`] signs every request with the operator's key pair and
//! resolves to the parsed JSON body.
//!
//! # Example
//!
//! ```rust,ignore
//! use abl_client::api::AblApiClient;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AblApiClient::new(public_key, private_key)?;
//!
//!     let activity = client.get_activity(json!({"_id": "A1"})).await?;
//!     println!("Activity: {}", activity["title"]);
//!
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::config::ClientConfig;
use crate::api::error::{ApiError, ApiResult};
use crate::api::request::SignedRequest;
use crate::auth::{current_timestamp_ms, Credentials};
use crate::shared::types::{Method, Payload};

/// Builder for configuring [`AblApiClient`].
#[derive(Debug, Clone)]
pub struct AblApiClientBuilder {
    public_key: String,
    private_key: String,
    config: ClientConfig,
}

impl AblApiClientBuilder {
    /// Create a new builder with the given key pair and default deployment.
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
            config: ClientConfig::default(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the base URL of the API server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config = self.config.with_base_url(base_url);
        self
    }

    /// Set the path prefix placed before every endpoint path.
    pub fn path_prefix(mut self, prefix: impl AsRef<str>) -> Self {
        self.config = self.config.with_path_prefix(prefix);
        self
    }

    /// Log every request and its outcome at debug level.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config = self.config.with_verbose(verbose);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidCredentials`] if either key is not 64
    /// characters long, or [`ApiError::InvalidConfig`] if the base URL is not
    /// an http(s) URL or the HTTP client cannot be initialized.
    pub fn build(self) -> ApiResult<AblApiClient> {
        let credentials = Credentials::new(self.public_key, self.private_key)?;

        let base_url = self.config.base_url();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::InvalidConfig(format!(
                "Base URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        let http_client = Client::builder()
            .build()
            .map_err(|e| ApiError::InvalidConfig(format!("HTTP client init failed: {}", e)))?;

        Ok(AblApiClient {
            http_client,
            credentials: Arc::new(credentials),
            config: Arc::new(self.config),
        })
    }
}

/// ABL REST API client.
///
/// Cheap to clone; clones share the HTTP connection and the immutable
/// identity, and may issue requests concurrently.
#[derive(Debug, Clone)]
pub struct AblApiClient {
    http_client: Client,
    credentials: Arc<Credentials>,
    config: Arc<ClientConfig>,
}

impl AblApiClient {
    /// Create a client for the default deployment.
    ///
    /// # Errors
    ///
    /// Fails immediately if either key is not exactly 64 characters.
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> ApiResult<Self> {
        AblApiClientBuilder::new(public_key, private_key).build()
    }

    /// Create a client configured from `ABL_API_URL`, `ABL_API_PREFIX` and `ABL_DEBUG`.
    pub fn from_env(
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> ApiResult<Self> {
        AblApiClientBuilder::new(public_key, private_key)
            .config(ClientConfig::from_env())
            .build()
    }

    /// Create a new client builder for custom configuration.
    pub fn builder(
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> AblApiClientBuilder {
        AblApiClientBuilder::new(public_key, private_key)
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    pub fn path_prefix(&self) -> &str {
        self.config.path_prefix()
    }

    pub fn public_key(&self) -> &str {
        self.credentials.public_key()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // =========================================================================
    // Signed request primitive
    // =========================================================================

    /// Prepare a signed request at a given timestamp without sending it.
    pub fn prepare(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
        timestamp_ms: i64,
    ) -> SignedRequest {
        SignedRequest::new(
            &self.credentials,
            &self.config,
            method,
            path,
            payload,
            timestamp_ms,
        )
    }

    /// Sign and send one request, resolving to the parsed response body.
    ///
    /// GET and DELETE send `payload` as query parameters; POST, PUT and PATCH
    /// send it as a JSON body.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Transport`] if no response was received
    /// - [`ApiError::Api`] with the parsed body if the status is not 200
    pub async fn request(&self, method: Method, path: &str, payload: Payload) -> ApiResult<Value> {
        let signed = self.prepare(method, path, payload, current_timestamp_ms());
        self.send(signed).await
    }

    /// Like [`request`](Self::request), deserializing the body into `T`.
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
    ) -> ApiResult<T> {
        let value = self.request(method, path, payload).await?;
        serde_json::from_value(value)
            .map_err(|e| ApiError::Deserialize(format!("Failed to deserialize response: {}", e)))
    }

    /// Send an already signed request.
    pub async fn send(&self, signed: SignedRequest) -> ApiResult<Value> {
        let verbose = self.config.verbose();
        if verbose {
            tracing::debug!(
                method = %signed.method,
                url = %signed.url,
                timestamp = signed.envelope.date,
                "Sending signed request"
            );
        }

        let mut request = self
            .http_client
            .request(signed.method.into(), &signed.url);
        for (name, value) in signed.envelope.headers() {
            request = request.header(name, value);
        }
        if let Some(body) = &signed.body {
            request = request.body(body.clone());
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                if verbose {
                    tracing::warn!(method = %signed.method, url = %signed.url, error = %e, "Request failed");
                }
                return Err(ApiError::Transport(e));
            }
        };

        let status = response.status();
        let text = response.text().await?;
        let body = parse_body(&text);

        if status == StatusCode::OK {
            if verbose {
                tracing::debug!(method = %signed.method, url = %signed.url, "Request succeeded");
            }
            Ok(body)
        } else {
            if verbose {
                tracing::warn!(
                    method = %signed.method,
                    url = %signed.url,
                    status = status.as_u16(),
                    body = %body,
                    "API returned an error"
                );
            }
            Err(ApiError::Api {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Parse a response body: empty is `null`, invalid JSON is kept as a string.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
