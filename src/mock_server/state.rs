//! Mock server state management.
//!
//! Provides the in-memory appliance backing the mock Halon API server.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::{ConfigParameter, ConfigRevision, RevisionId};

/// Everything the simulated appliance knows.
///
/// Wrapped in `Arc<RwLock<_>>` by the server for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Basic-auth credentials every request must carry, if set.
    pub credentials: Option<(String, String)>,

    /// Clock, in `YYYY-MM-DDTHH:MM:SSZ` form.
    pub time: String,
    pub uptime: u64,
    pub reboots: u32,
    pub shut_down: bool,

    pub version: String,
    pub latest_versions: Vec<Value>,
    /// Update in progress; `None` makes the status endpoint fail.
    pub update: Option<Value>,

    /// Cached DNS record names.
    pub dns_cache: Vec<String>,

    /// File contents by path.
    pub files: HashMap<String, Vec<u8>>,

    /// Stored revisions by numeric id.
    pub revisions: BTreeMap<i64, ConfigRevision>,

    /// Email history records by id.
    pub emails: BTreeMap<u64, Value>,

    pub license: Value,
    pub license_key: Option<String>,

    /// Counters; each carries `name`, `namespace` and `legend` members.
    pub stats: Vec<Value>,

    /// Exported graph data by graph id.
    pub graphs: BTreeMap<String, String>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self {
            time: "2024-01-01T00:00:00Z".to_string(),
            version: "5.6.0".to_string(),
            license: json!({}),
            ..Self::default()
        }
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Require these Basic-auth credentials on every request.
    pub fn with_credentials(mut self, user: &str, password: &str) -> Self {
        self.credentials = Some((user.to_string(), password.to_string()));
        self
    }

    /// Store a file.
    pub fn with_file(mut self, path: &str, data: &[u8]) -> Self {
        self.files.insert(path.to_string(), data.to_vec());
        self
    }

    /// Store a revision under `id`.
    pub fn with_revision(mut self, id: i64, config: Vec<ConfigParameter>, message: &str) -> Self {
        self.insert_revision(id, config, message.to_string());
        self
    }

    /// Add a counter.
    pub fn with_stat(mut self, name: &str, namespace: &str, legend: &str, count: u64) -> Self {
        self.stats.push(json!({
            "name": name,
            "namespace": namespace,
            "legend": legend,
            "count": count,
        }));
        self
    }

    /// Add a graph database.
    pub fn with_graph(mut self, id: &str, data: &str) -> Self {
        self.graphs.insert(id.to_string(), data.to_string());
        self
    }

    /// Add an email history record.
    pub fn with_email(mut self, id: u64, record: Value) -> Self {
        self.emails.insert(id, record);
        self
    }

    /// Mark an update as in progress.
    pub fn with_update(mut self, status: Value) -> Self {
        self.update = Some(status);
        self
    }

    /// Id of the newest revision.
    pub fn head_revision(&self) -> Option<i64> {
        self.revisions.keys().next_back().copied()
    }

    /// Store a revision under the next free id and return it.
    pub fn push_revision(&mut self, config: Vec<ConfigParameter>, message: String) -> i64 {
        let id = self.head_revision().unwrap_or(0) + 1;
        self.insert_revision(id, config, message);
        id
    }

    fn insert_revision(&mut self, id: i64, config: Vec<ConfigParameter>, message: String) {
        self.revisions.insert(
            id,
            ConfigRevision {
                id: Some(RevisionId::Number(id)),
                config,
                message: Some(message),
                ..ConfigRevision::default()
            },
        );
    }

    /// Counters whose fields equal every given filter value.
    pub fn matching_stats(&self, filters: &[(&str, Option<&String>)]) -> Vec<usize> {
        self.stats
            .iter()
            .enumerate()
            .filter(|(_, stat)| {
                filters.iter().all(|(field, wanted)| match wanted {
                    Some(wanted) => {
                        stat.get(*field).and_then(Value::as_str) == Some(wanted.as_str())
                    }
                    None => true,
                })
            })
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_revision_allocates_next_id() {
        let mut state = MockState::new().with_revision(3, vec![], "first");
        let id = state.push_revision(vec![ConfigParameter::new("x", "1")], "next".to_string());
        assert_eq!(id, 4);
        assert_eq!(state.head_revision(), Some(4));
    }

    #[test]
    fn test_matching_stats() {
        let state = MockState::new()
            .with_stat("mail", "core", "sent", 1)
            .with_stat("mail", "core", "received", 2)
            .with_stat("dns", "core", "queries", 3);
        let name = "mail".to_string();
        assert_eq!(state.matching_stats(&[("name", Some(&name))]), vec![0, 1]);
        assert_eq!(state.matching_stats(&[("name", None)]).len(), 3);
    }
}
