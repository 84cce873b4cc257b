//! Request assembly.
//!
//! A [`RequestSpec`] is what every accessor hands to the dispatcher. Payloads
//! and query parameters are serialized eagerly into JSON objects so the
//! omission rules hold in one place: `null` members are dropped, the payload
//! is always an object (empty unless set) and query values are flattened to
//! strings.

use reqwest::Method;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{HalonError, Result};

/// A single call to the appliance, before it is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    method: Method,
    path: String,
    payload: Map<String, Value>,
    query: Vec<(String, String)>,
}

impl RequestSpec {
    /// A request with an empty payload and no query parameters.
    ///
    /// `path` is relative to the API base and begins with `/`.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            payload: Map::new(),
            query: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Set the JSON body. Without a call to this the body is `{}`.
    ///
    /// # Errors
    ///
    /// Returns [`HalonError::InvalidArgument`] if `payload` does not
    /// serialize to a JSON object.
    pub fn payload<P: Serialize + ?Sized>(mut self, payload: &P) -> Result<Self> {
        let mut map = to_object(payload, "payload")?;
        map.retain(|_, v| !v.is_null());
        self.payload = map;
        Ok(self)
    }

    /// Append query parameters.
    ///
    /// Absent (`null`) members are omitted. Booleans become `"true"` or
    /// `"false"`, numbers their decimal text.
    ///
    /// # Errors
    ///
    /// Returns [`HalonError::InvalidArgument`] if `query` is not an object of
    /// scalars.
    pub fn query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Result<Self> {
        for (key, value) in to_object(query, "query")? {
            let text = match value {
                Value::Null => continue,
                Value::String(s) => s,
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(HalonError::InvalidArgument(format!(
                        "query parameter '{key}' is not a scalar"
                    )));
                }
            };
            self.query.push((key, text));
        }
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn payload_map(&self) -> &Map<String, Value> {
        &self.payload
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }
}

fn to_object<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<Map<String, Value>> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(HalonError::InvalidArgument(format!(
            "{what} must be a JSON object, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_drops_absent_members() {
        let spec = RequestSpec::post("/x")
            .payload(&json!({"config": [], "id": null}))
            .unwrap();
        let payload = spec.payload_map();
        assert!(payload.contains_key("config"));
        assert!(!payload.contains_key("id"));
    }

    #[test]
    fn test_payload_defaults_to_empty_object() {
        let spec = RequestSpec::delete("/x");
        assert!(spec.payload_map().is_empty());
    }

    #[test]
    fn test_payload_rejects_scalars_and_lists() {
        assert!(RequestSpec::post("/x").payload(&json!([1, 2])).is_err());
        assert!(RequestSpec::post("/x").payload("text").is_err());
    }

    #[test]
    fn test_query_flattens_scalars() {
        let spec = RequestSpec::get("/x")
            .query(&json!({"offset": 0, "total": false, "name": "a", "sortby": null}))
            .unwrap();
        let pairs = spec.query_pairs();
        assert!(pairs.contains(&("offset".to_string(), "0".to_string())));
        assert!(pairs.contains(&("total".to_string(), "false".to_string())));
        assert!(pairs.contains(&("name".to_string(), "a".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k == "sortby"));
    }

    #[test]
    fn test_query_rejects_nested_values() {
        assert!(RequestSpec::get("/x").query(&json!({"a": [1]})).is_err());
    }
}
