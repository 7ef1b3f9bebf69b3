//! Signed request preparation.
//!
//! A [`SignedRequest`] is everything one HTTP call needs: target URL, payload
//! placement and the [`SignedEnvelope`] headers. Building one is pure, so the
//! signature can be checked for a frozen timestamp without any I/O.

use crate::api::config::ClientConfig;
use crate::auth::Credentials;
use crate::network::{ACCESS_KEY_HEADER, DATE_HEADER, JSON_CONTENT_TYPE, SIGNATURE_HEADER};
use crate::shared::canonical::{body_text, canonical_body, canonical_url};
use crate::shared::types::{Method, Payload};

/// Identity, signature and timestamp headers for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedEnvelope {
    pub access_key: String,
    pub signature: String,
    pub date: i64,
    pub origin: String,
    pub content_type: &'static str,
}

impl SignedEnvelope {
    /// Header name/value pairs in the order they are sent.
    pub fn headers(&self) -> [(&'static str, String); 5] {
        [
            (ACCESS_KEY_HEADER, self.access_key.clone()),
            (SIGNATURE_HEADER, self.signature.clone()),
            (DATE_HEADER, self.date.to_string()),
            ("Origin", self.origin.clone()),
            ("Content-Type", self.content_type.to_string()),
        ]
    }
}

/// A fully prepared, signed request.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedRequest {
    pub method: Method,
    /// Path prefix + endpoint path, e.g. `/activities/A1`
    pub resource: String,
    /// Signed material: resource plus sorted query, or resource plus body text
    pub canonical: String,
    /// Absolute URL, including the query string for GET and DELETE
    pub url: String,
    /// Exact JSON body text for POST, PUT and PATCH
    pub body: Option<String>,
    pub envelope: SignedEnvelope,
}

impl SignedRequest {
    pub fn new(
        credentials: &Credentials,
        config: &ClientConfig,
        method: Method,
        path: &str,
        payload: Payload,
        timestamp_ms: i64,
    ) -> Self {
        let resource = format!("{}{}", config.path_prefix(), path.trim_start_matches('/'));

        let (canonical, url, body) = if method.carries_body() {
            let body = body_text(&payload);
            (
                canonical_body(&resource, &body),
                format!("{}{}", config.base_url(), resource),
                Some(body),
            )
        } else {
            let canonical = canonical_url(&resource, &payload);
            let url = format!("{}{}", config.base_url(), canonical);
            (canonical, url, None)
        };

        let envelope = SignedEnvelope {
            access_key: credentials.public_key().to_string(),
            signature: credentials.sign(&canonical, timestamp_ms),
            date: timestamp_ms,
            origin: config.base_url().to_string(),
            content_type: JSON_CONTENT_TYPE,
        };

        Self {
            method,
            resource,
            canonical,
            url,
            body,
            envelope,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{sign, KEY_LENGTH};
    use serde_json::json;

    fn credentials() -> Credentials {
        Credentials::new("p".repeat(KEY_LENGTH), "s".repeat(KEY_LENGTH)).unwrap()
    }

    fn payload(value: serde_json::Value) -> Payload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_get_payload_goes_to_query() {
        let config = ClientConfig::default();
        let req = SignedRequest::new(
            &credentials(),
            &config,
            Method::Get,
            "activities",
            payload(json!({"limit": 5})),
            1000,
        );
        assert_eq!(req.resource, "/activities");
        assert_eq!(req.canonical, "/activities?limit=5");
        assert_eq!(req.url, "http://localhost:8000/activities?limit=5");
        assert!(req.body.is_none());
    }

    #[test]
    fn test_put_payload_goes_to_body() {
        let config = ClientConfig::default();
        let req = SignedRequest::new(
            &credentials(),
            &config,
            Method::Put,
            "activities/A1",
            payload(json!({"name": "X"})),
            1000,
        );
        assert_eq!(req.url, "http://localhost:8000/activities/A1");
        assert_eq!(req.canonical, r#"/activities/A1{"name":"X"}"#);
        assert_eq!(req.body.as_deref(), Some(r#"{"name":"X"}"#));
    }

    #[test]
    fn test_body_types_change_signature() {
        let config = ClientConfig::default();
        let make = |input| {
            SignedRequest::new(
                &credentials(),
                &config,
                Method::Patch,
                "transaction/T1",
                payload(input),
                1000,
            )
        };
        let number = make(json!({"amount": 50}));
        let string = make(json!({"amount": "50"}));
        assert_ne!(number.envelope.signature, string.envelope.signature);
        assert_eq!(
            number.envelope.signature,
            sign(&"s".repeat(KEY_LENGTH), r#"/transaction/T1{"amount":50}"#, 1000)
        );
    }

    #[test]
    fn test_empty_body_is_still_sent() {
        let req = SignedRequest::new(
            &credentials(),
            &ClientConfig::default(),
            Method::Post,
            "apikeys/affiliate",
            Payload::new(),
            1000,
        );
        assert_eq!(req.body.as_deref(), Some("{}"));
        assert_eq!(req.canonical, "/apikeys/affiliate{}");
    }

    #[test]
    fn test_delete_with_empty_payload_has_no_query() {
        let req = SignedRequest::new(
            &credentials(),
            &ClientConfig::default(),
            Method::Delete,
            "events/E1",
            Payload::new(),
            1000,
        );
        assert_eq!(req.url, "http://localhost:8000/events/E1");
        assert!(req.body.is_none());
    }

    #[test]
    fn test_prefix_is_part_of_signed_resource() {
        let config = ClientConfig::new()
            .with_base_url("https://api.example.com/")
            .with_path_prefix("api/v1");
        let req = SignedRequest::new(
            &credentials(),
            &config,
            Method::Get,
            "/bookings/getOfflineData",
            Payload::new(),
            42,
        );
        assert_eq!(req.resource, "/api/v1/bookings/getOfflineData");
        assert_eq!(req.url, "https://api.example.com/api/v1/bookings/getOfflineData");
        assert_eq!(
            req.envelope.signature,
            sign(&"s".repeat(KEY_LENGTH), "/api/v1/bookings/getOfflineData", 42)
        );
        assert_eq!(req.envelope.origin, "https://api.example.com");
    }

    #[test]
    fn test_envelope_headers() {
        let req = SignedRequest::new(
            &credentials(),
            &ClientConfig::default(),
            Method::Get,
            "timeslots",
            Payload::new(),
            1_450_000_000_000,
        );
        let headers = req.envelope.headers();
        assert_eq!(headers[0], ("X-ABL-Access-Key", "p".repeat(KEY_LENGTH)));
        assert_eq!(headers[1].0, "X-ABL-Signature");
        assert_eq!(headers[2], ("X-ABL-Date", "1450000000000".to_string()));
        assert_eq!(headers[3], ("Origin", "http://localhost:8000".to_string()));
        assert_eq!(
            headers[4],
            ("Content-Type", "application/json; charset=utf-8".to_string())
        );
    }

    #[test]
    fn test_same_inputs_same_signature() {
        let config = ClientConfig::default();
        let make = |ts| {
            SignedRequest::new(
                &credentials(),
                &config,
                Method::Get,
                "metrics/overview",
                payload(json!({"from": "2016-01-01"})),
                ts,
            )
        };
        assert_eq!(make(7).envelope.signature, make(7).envelope.signature);
        assert_ne!(make(7).envelope.signature, make(8).envelope.signature);
    }
}
