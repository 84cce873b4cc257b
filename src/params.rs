//! Query parameter sets for list, filter and range operations.
//!
//! Every optional field is an `Option` that is left out of the query string
//! entirely when `None`; nothing is ever sent as an empty string.

use serde::{Deserialize, Serialize, Serializer};

/// Default page size used when the caller does not choose one.
pub const DEFAULT_LIMIT: u32 = 5;

/// Page selection for collection endpoints.
///
/// `offset` is a page index (not an item offset); `limit` is the page size
/// and is bounded by the appliance (typically `1..=10000`). Both are passed
/// through verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub offset: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    #[must_use]
    pub fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }

    /// The following page with the same size.
    #[must_use]
    pub fn next(self) -> Self {
        Self {
            offset: self.offset.saturating_add(1),
            limit: self.limit,
        }
    }
}

/// Field filters for the stats endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsFilter {
    #[serde(rename = "filter[name]", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "filter[namespace]", skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(rename = "filter[legend]", skip_serializing_if = "Option::is_none")]
    pub legend: Option<String>,
}

impl StatsFilter {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    #[must_use]
    pub fn legend(mut self, legend: impl Into<String>) -> Self {
        self.legend = Some(legend.into());
        self
    }
}

/// Name filter for DNS cache eviction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsCacheFilter {
    #[serde(rename = "filter[name]", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl DnsCacheFilter {
    /// Match cache entries by record name.
    #[must_use]
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// Query for the email history listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmailHistoryQuery {
    /// Appliance search expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Sort key; the appliance default applies when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sortby: Option<String>,
    /// Ask the appliance to include the total hit count.
    #[serde(serialize_with = "bool_as_string")]
    pub total: bool,
}

/// Byte window for file reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRange {
    pub offset: u64,
    pub limit: u64,
}

impl Default for FileRange {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 1024,
        }
    }
}

/// The appliance expects string-typed flags.
fn bool_as_string<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "true" } else { "false" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_stats_filter_serializes_to_nothing() {
        let value = serde_json::to_value(StatsFilter::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_stats_filter_uses_bracketed_keys() {
        let filter = StatsFilter::default().name("mail").legend("sent");
        let value = serde_json::to_value(filter).unwrap();
        assert_eq!(value, json!({"filter[name]": "mail", "filter[legend]": "sent"}));
    }

    #[test]
    fn test_email_total_is_string() {
        let query = EmailHistoryQuery {
            total: true,
            ..Default::default()
        };
        let value = serde_json::to_value(query).unwrap();
        assert_eq!(value, json!({"total": "true"}));
    }

    #[test]
    fn test_email_query_string() {
        let query = EmailHistoryQuery {
            filter: Some("mallory".to_string()),
            ..Default::default()
        };
        let serialized = serde_qs::to_string(&query).expect("Failed to serialize query");

        assert!(serialized.contains("filter=mallory"));
        assert!(serialized.contains("total=false"));
        assert!(!serialized.contains("sortby"));
    }

    #[test]
    fn test_empty_dns_filter_query_string() {
        let serialized =
            serde_qs::to_string(&DnsCacheFilter::default()).expect("Failed to serialize query");
        assert!(serialized.is_empty());
    }

    #[test]
    fn test_pagination_defaults_and_next() {
        let page = Pagination::default();
        assert_eq!(page, Pagination::new(0, DEFAULT_LIMIT));
        assert_eq!(page.next().offset, 1);
    }
}
