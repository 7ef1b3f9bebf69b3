//! Canonical URL construction.
//!
//! The canonical string is the material that gets signed. For GET and DELETE it
//! is the resource path plus the payload rendered as a sorted query string, and
//! that same query string is used on the wire, so the server sees exactly what
//! the client signed. For POST, PUT and PATCH it is the resource path followed by
//! the exact JSON body text, which keeps value types and nesting.
//!
//! Nested values use bracket notation:
//!
//! ```text
//! {"dateRange": ["2016-01-01", "2016-01-02"], "type": "pdf"}
//!   -> dateRange%5B0%5D=2016-01-01&dateRange%5B1%5D=2016-01-02&type=pdf
//! ```

use serde_json::Value;

use crate::shared::types::Payload;

/// Build the canonical URL for a resource and its payload.
///
/// Returns `resource` unchanged when the payload encodes to nothing.
pub fn canonical_url(resource: &str, payload: &Payload) -> String {
    let query = encode_query(payload);
    if query.is_empty() {
        resource.to_string()
    } else {
        format!("{}?{}", resource, query)
    }
}

/// Build the signed material for a request that carries a JSON body.
///
/// The body text is what gets sent, so it must come from [`body_text`].
pub fn canonical_body(resource: &str, body: &str) -> String {
    format!("{}{}", resource, body)
}

/// Serialize a payload as compact JSON with sorted keys.
pub fn body_text(payload: &Payload) -> String {
    match serde_json::to_string(payload) {
        Ok(text) => text,
        Err(_) => unreachable!("JSON object with string keys always serializes"),
    }
}

/// Encode a payload as a percent-encoded query string with sorted keys.
pub fn encode_query(payload: &Payload) -> String {
    flatten_payload(payload)
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Flatten a payload into `(key, value)` pairs.
///
/// Object keys come out sorted (`Payload` iterates in key order) and array
/// items keep their index order.
pub fn flatten_payload(payload: &Payload) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in payload {
        flatten_value(key.clone(), value, &mut pairs);
    }
    pairs
}

fn flatten_value(key: String, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Null => pairs.push((key, String::new())),
        Value::Bool(b) => pairs.push((key, b.to_string())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::String(s) => pairs.push((key, s.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_value(format!("{}[{}]", key, index), item, pairs);
            }
        }
        Value::Object(map) => {
            for (child, item) in map {
                flatten_value(format!("{}[{}]", key, child), item, pairs);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {}", other),
        }
    }

    #[test]
    fn test_empty_payload_is_bare_resource() {
        assert_eq!(canonical_url("/activities", &Payload::new()), "/activities");
    }

    #[test]
    fn test_scalar_values() {
        let p = payload(json!({"limit": 10, "active": true, "name": "Kayak tour", "note": null}));
        assert_eq!(
            encode_query(&p),
            "active=true&limit=10&name=Kayak%20tour&note="
        );
    }

    #[test]
    fn test_key_order_does_not_matter() {
        let a: Payload = serde_json::from_str(r#"{"b": 2, "a": 1, "c": {"y": 1, "x": 2}}"#).unwrap();
        let b: Payload =
            serde_json::from_str("{ \"c\" : { \"x\" : 2 , \"y\" : 1 },\n \"a\": 1, \"b\": 2 }").unwrap();
        assert_eq!(canonical_url("/events", &a), canonical_url("/events", &b));
    }

    #[test]
    fn test_nested_values_use_brackets() {
        let p = payload(json!({
            "dateRange": ["2016-01-01", "2016-01-02"],
            "attendees": {"c1": [null]}
        }));
        assert_eq!(
            flatten_payload(&p),
            vec![
                ("attendees[c1][0]".to_string(), String::new()),
                ("dateRange[0]".to_string(), "2016-01-01".to_string()),
                ("dateRange[1]".to_string(), "2016-01-02".to_string()),
            ]
        );
        assert_eq!(
            canonical_url("/operators/guide/G1/events", &p),
            "/operators/guide/G1/events?attendees%5Bc1%5D%5B0%5D=&dateRange%5B0%5D=2016-01-01&dateRange%5B1%5D=2016-01-02"
        );
    }

    #[test]
    fn test_empty_containers_contribute_nothing() {
        let p = payload(json!({"tags": [], "meta": {}}));
        assert_eq!(canonical_url("/activities", &p), "/activities");
    }

    #[test]
    fn test_different_payloads_differ() {
        let a = payload(json!({"amount": 50}));
        let b = payload(json!({"amount": 51}));
        let c = payload(json!({"amounts": 50}));
        assert_ne!(canonical_url("/x", &a), canonical_url("/x", &b));
        assert_ne!(canonical_url("/x", &a), canonical_url("/x", &c));
    }

    #[test]
    fn test_long_arrays_keep_index_order() {
        let p = payload(json!({"list": (0..12).collect::<Vec<_>>()}));
        let keys: Vec<String> = flatten_payload(&p).into_iter().map(|(k, _)| k).collect();
        let expected: Vec<String> = (0..12).map(|i| format!("list[{}]", i)).collect();
        assert_eq!(keys, expected);

        let values: Vec<String> = flatten_payload(&p).into_iter().map(|(_, v)| v).collect();
        assert_eq!(values[10], "10");
        assert_eq!(values[2], "2");
    }

    #[test]
    fn test_body_text_sorts_keys() {
        let a: Payload = serde_json::from_str(r#"{"b": {"y": 1, "x": [2, null]}, "a": "1"}"#).unwrap();
        assert_eq!(body_text(&a), r#"{"a":"1","b":{"x":[2,null],"y":1}}"#);
        assert_eq!(body_text(&Payload::new()), "{}");
    }

    #[test]
    fn test_body_material_keeps_types_and_structure() {
        let pairs = [
            (json!({"amount": 50}), json!({"amount": "50"})),
            (json!({"active": true}), json!({"active": "true"})),
            (json!({"note": null}), json!({"note": ""})),
            (json!({"tags": []}), json!({})),
            (json!({"a": {"b": 1}}), json!({"a[b]": 1})),
        ];
        for (a, b) in pairs {
            let a = canonical_body("/transaction/T1", &body_text(&payload(a)));
            let b = canonical_body("/transaction/T1", &body_text(&payload(b)));
            assert_ne!(a, b);
        }
    }

    #[test]
    fn test_reserved_characters_are_encoded() {
        let p = payload(json!({"q": "a&b=c"}));
        assert_eq!(encode_query(&p), "q=a%26b%3Dc");
    }
}
