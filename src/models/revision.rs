//! Configuration revision model and trait implementations.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::client::HalonClient;
use crate::error::{HalonError, Result};
use crate::pagination::Page;
use crate::params::Pagination;
use crate::request::RequestSpec;
use crate::traits::{Get, List};

/// Identifier of a stored configuration revision.
///
/// Either the literal `HEAD` (the newest revision) or a number. Positive
/// numbers address stored revisions; negative numbers address test
/// configurations. Zero addresses nothing and is rejected by
/// [`RevisionId::number`], by parsing, and before any request is sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RevisionId {
    #[default]
    Head,
    Number(i64),
}

impl RevisionId {
    /// A numbered revision.
    ///
    /// # Errors
    ///
    /// Returns [`HalonError::InvalidArgument`] for `0`.
    pub fn number(n: i64) -> Result<Self> {
        let id = Self::Number(n);
        id.check()?;
        Ok(id)
    }

    pub(crate) fn check(&self) -> Result<()> {
        match self {
            Self::Number(0) => Err(HalonError::InvalidArgument(
                "revision id 0 does not exist".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// True for `HEAD` and for negative (test configuration) ids, the only
    /// ids that accept a config type.
    pub fn accepts_type(&self) -> bool {
        match self {
            Self::Head => true,
            Self::Number(n) => *n < 0,
        }
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Head => f.write_str("HEAD"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<i64> for RevisionId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl FromStr for RevisionId {
    type Err = HalonError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "HEAD" {
            return Ok(Self::Head);
        }
        let n = s.parse::<i64>().map_err(|_| {
            HalonError::InvalidArgument(format!("'{s}' is not HEAD or a revision number"))
        })?;
        Self::number(n)
    }
}

impl Serialize for RevisionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Head => serializer.serialize_str("HEAD"),
            Self::Number(n) => serializer.serialize_i64(*n),
        }
    }
}

impl<'de> Deserialize<'de> for RevisionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Self::number(n).map_err(de::Error::custom),
            Raw::Text(s) => s.parse().map_err(de::Error::custom),
        }
    }
}

/// Which configuration slot of a revision to read (`-1..=5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ConfigType(i8);

impl ConfigType {
    pub const MIN: i8 = -1;
    pub const MAX: i8 = 5;

    pub fn value(self) -> i8 {
        self.0
    }
}

impl TryFrom<i64> for ConfigType {
    type Error = HalonError;

    fn try_from(value: i64) -> Result<Self> {
        i8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or_else(|| {
                HalonError::InvalidArgument(format!(
                    "config type {value} is outside {}..={}",
                    Self::MIN,
                    Self::MAX
                ))
            })
    }
}

impl From<ConfigType> for i64 {
    fn from(t: ConfigType) -> Self {
        i64::from(t.0)
    }
}

/// One configuration parameter record.
///
/// The appliance defines the record's fields; the client carries them
/// as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigParameter(Map<String, Value>);

impl ConfigParameter {
    /// A `{"param": ..., "value": ...}` record.
    pub fn new(param: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut map = Map::new();
        map.insert("param".to_string(), Value::String(param.into()));
        map.insert("value".to_string(), value.into());
        Self(map)
    }

    pub fn param(&self) -> Option<&str> {
        self.0.get("param").and_then(Value::as_str)
    }

    pub fn value(&self) -> Option<&Value> {
        self.0.get("value")
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for ConfigParameter {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A configuration snapshot stored on the appliance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigRevision {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RevisionId>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub config_type: Option<ConfigType>,

    #[serde(default)]
    pub config: Vec<ConfigParameter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Any further fields the appliance reports.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Selects a revision and, optionally, one of its config slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevisionSelector {
    pub id: RevisionId,
    pub config_type: Option<ConfigType>,
}

impl RevisionSelector {
    /// Narrow to one config slot.
    ///
    /// # Errors
    ///
    /// Returns [`HalonError::InvalidArgument`] unless `id` is `HEAD` or a
    /// test configuration.
    pub fn with_type(id: RevisionId, config_type: ConfigType) -> Result<Self> {
        let selector = Self {
            id,
            config_type: Some(config_type),
        };
        selector.validate()?;
        Ok(selector)
    }

    fn validate(&self) -> Result<()> {
        if self.config_type.is_some() && !self.id.accepts_type() {
            return Err(HalonError::InvalidArgument(format!(
                "config type can only be used with HEAD or a test configuration, not revision {}",
                self.id
            )));
        }
        Ok(())
    }
}

impl From<RevisionId> for RevisionSelector {
    fn from(id: RevisionId) -> Self {
        Self {
            id,
            config_type: None,
        }
    }
}

#[derive(Serialize)]
struct TypeQuery {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    config_type: Option<ConfigType>,
}

pub(crate) fn revision_path(id: RevisionId) -> Result<String> {
    id.check()?;
    Ok(format!("/config/revisions/{id}"))
}

#[async_trait]
impl Get for ConfigRevision {
    type Id = RevisionSelector;

    #[tracing::instrument(skip(client))]
    async fn get(client: &HalonClient, selector: RevisionSelector) -> Result<Self> {
        selector.validate()?;
        let spec = RequestSpec::get(revision_path(selector.id)?).query(&TypeQuery {
            config_type: selector.config_type,
        })?;
        client.execute(spec).await?.decode()
    }
}

#[async_trait]
impl List for ConfigRevision {
    type Query = ();

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &HalonClient,
        _query: &(),
        pagination: Pagination,
    ) -> Result<Page<Self>> {
        let spec = RequestSpec::get("/config/revisions").query(&pagination)?;
        let items: Vec<Self> = client.execute(spec).await?.decode()?;
        Ok(Page::new(items, pagination))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_revision_id_paths() {
        assert_eq!(
            revision_path(RevisionId::Head).unwrap(),
            "/config/revisions/HEAD"
        );
        assert_eq!(
            revision_path(RevisionId::Number(42)).unwrap(),
            "/config/revisions/42"
        );
    }

    #[test]
    fn test_revision_id_from_str() {
        assert_eq!("HEAD".parse::<RevisionId>().unwrap(), RevisionId::Head);
        assert_eq!("-1".parse::<RevisionId>().unwrap(), RevisionId::Number(-1));
        assert!("head".parse::<RevisionId>().is_err());
    }

    #[test]
    fn test_revision_id_zero_is_rejected() {
        assert!(RevisionId::number(0).is_err());
        assert_eq!(RevisionId::number(5).unwrap(), RevisionId::Number(5));

        let err = "0".parse::<RevisionId>().unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument);
        assert!(serde_json::from_value::<RevisionId>(json!(0)).is_err());
        assert!(revision_path(RevisionId::Number(0)).is_err());
    }

    #[test]
    fn test_revision_id_serde() {
        assert_eq!(serde_json::to_value(RevisionId::Head).unwrap(), json!("HEAD"));
        assert_eq!(serde_json::to_value(RevisionId::Number(3)).unwrap(), json!(3));
        let id: RevisionId = serde_json::from_value(json!(12)).unwrap();
        assert_eq!(id, RevisionId::Number(12));
        let id: RevisionId = serde_json::from_value(json!("HEAD")).unwrap();
        assert_eq!(id, RevisionId::Head);
    }

    #[test]
    fn test_config_type_bounds() {
        assert!(ConfigType::try_from(-1).is_ok());
        assert!(ConfigType::try_from(5).is_ok());
        assert!(ConfigType::try_from(6).is_err());
        assert!(ConfigType::try_from(-2).is_err());
    }

    #[test]
    fn test_type_only_with_head_or_test_id() {
        let t = ConfigType::try_from(1).unwrap();
        assert!(RevisionSelector::with_type(RevisionId::Head, t).is_ok());
        assert!(RevisionSelector::with_type(RevisionId::Number(-1), t).is_ok());
        let err = RevisionSelector::with_type(RevisionId::Number(42), t).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_revision_decodes_with_unknown_fields() {
        let revision: ConfigRevision = serde_json::from_value(json!({
            "id": 7,
            "config": [{"param": "x", "value": "1"}],
            "message": "hello",
            "created": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(revision.id, Some(RevisionId::Number(7)));
        assert_eq!(revision.config[0].param(), Some("x"));
        assert!(revision.extra.contains_key("created"));
    }
}
