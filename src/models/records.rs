//! Appliance-defined records returned verbatim.
//!
//! The client does not model the fields of these records; each wraps the
//! decoded JSON and derefs to it.

use std::ops::Deref;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::HalonClient;
use crate::error::Result;
use crate::pagination::Page;
use crate::params::{Pagination, StatsFilter};
use crate::request::RequestSpec;
use crate::traits::{Get, List};

macro_rules! opaque_record {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Value);

        impl $name {
            /// The raw JSON.
            pub fn into_inner(self) -> Value {
                self.0
            }
        }

        impl Deref for $name {
            type Target = Value;

            fn deref(&self) -> &Value {
                &self.0
            }
        }

        impl From<$name> for Value {
            fn from(record: $name) -> Self {
                record.0
            }
        }
    };
}

opaque_record!(
    /// One statistics counter.
    StatEntry
);

opaque_record!(
    /// One graph database.
    GraphEntry
);

opaque_record!(
    /// One message from the email history.
    EmailRecord
);

opaque_record!(
    /// License information for the system.
    LicenseInfo
);

opaque_record!(
    /// Progress of a download or install started through the update endpoints.
    UpdateStatus
);

#[async_trait]
impl List for StatEntry {
    type Query = StatsFilter;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &HalonClient,
        filter: &StatsFilter,
        pagination: Pagination,
    ) -> Result<Page<Self>> {
        let spec = RequestSpec::get("/stats")
            .query(filter)?
            .query(&pagination)?;
        let items: Vec<Self> = client.execute(spec).await?.decode()?;
        Ok(Page::new(items, pagination))
    }
}

#[async_trait]
impl List for GraphEntry {
    type Query = ();

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &HalonClient,
        _query: &(),
        pagination: Pagination,
    ) -> Result<Page<Self>> {
        let spec = RequestSpec::get("/graphs").query(&pagination)?;
        let items: Vec<Self> = client.execute(spec).await?.decode()?;
        Ok(Page::new(items, pagination))
    }
}

#[async_trait]
impl Get for EmailRecord {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &HalonClient, id: u64) -> Result<Self> {
        let spec = RequestSpec::get(format!("/email/history/{id}"));
        client.execute(spec).await?.field("email")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_is_transparent() {
        let entry: StatEntry = serde_json::from_value(json!({"name": "mail", "count": 3})).unwrap();
        assert_eq!(entry["count"], 3);
        assert_eq!(entry.into_inner(), json!({"name": "mail", "count": 3}));
    }
}
