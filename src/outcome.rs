//! Normalized results of a successful call.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{HalonError, Result};

/// What a successful request produced.
///
/// A `204 No Content` is always [`Outcome::NoContent`]; any other 2xx is
/// the decoded body.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    NoContent,
    Json(Value),
}

impl Outcome {
    /// True for a `204 No Content` response.
    pub fn is_no_content(&self) -> bool {
        matches!(self, Self::NoContent)
    }

    /// The response as a JSON value; no-content becomes `true`.
    pub fn into_value(self) -> Value {
        match self {
            Self::NoContent => Value::Bool(true),
            Self::Json(value) => value,
        }
    }

    /// Decode the whole body.
    ///
    /// # Errors
    ///
    /// Fails on a no-content response or when the body does not match `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T> {
        match self {
            Self::NoContent => Err(HalonError::UnexpectedResponse(
                "expected a body, got no content".to_string(),
            )),
            Self::Json(value) => Ok(serde_json::from_value(value)?),
        }
    }

    /// Decode one member of the response object.
    ///
    /// # Errors
    ///
    /// Fails when the body is absent, not an object, lacks `field`, or the
    /// member does not match `T`.
    pub fn field<T: DeserializeOwned>(self, field: &str) -> Result<T> {
        match self {
            Self::Json(Value::Object(mut map)) => {
                let value = map
                    .remove(field)
                    .ok_or_else(|| HalonError::missing_field(field))?;
                Ok(serde_json::from_value(value)?)
            }
            _ => Err(HalonError::missing_field(field)),
        }
    }
}

impl From<Outcome> for Value {
    fn from(outcome: Outcome) -> Self {
        outcome.into_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_content_is_true() {
        assert_eq!(Outcome::NoContent.into_value(), Value::Bool(true));
        assert!(Outcome::NoContent.is_no_content());
    }

    #[test]
    fn test_field_extracts_member() {
        let outcome = Outcome::Json(json!({"affected": 7, "other": "x"}));
        let affected: u64 = outcome.field("affected").unwrap();
        assert_eq!(affected, 7);
    }

    #[test]
    fn test_field_missing_is_error() {
        let outcome = Outcome::Json(json!({"other": 1}));
        assert!(outcome.field::<u64>("affected").is_err());
        assert!(Outcome::NoContent.field::<u64>("affected").is_err());
    }
}
