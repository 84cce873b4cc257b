//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic appliance state.

use serde_json::json;

use super::state::MockState;
use crate::ConfigParameter;

/// User name the default scenario expects.
pub const MOCK_USER: &str = "admin";

/// Password the default scenario expects.
pub const MOCK_PASSWORD: &str = "password";

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    /// A small but complete appliance: credentials, clock, two revisions,
    /// a handful of counters, graphs, files and email records.
    pub fn default_state() -> MockState {
        let mut state = MockState::new()
            .with_credentials(MOCK_USER, MOCK_PASSWORD)
            .with_revision(1, Self::base_config(), "Initial configuration")
            .with_revision(
                2,
                vec![
                    ConfigParameter::new("hostname", "mx1.example.com"),
                    ConfigParameter::new("smtp_banner", "ESMTP"),
                ],
                "Set banner",
            )
            .with_stat("mail", "core", "sent", 120)
            .with_stat("mail", "core", "received", 340)
            .with_stat("mail", "spam", "rejected", 17)
            .with_stat("dns", "core", "queries", 9001)
            .with_graph("mail-in", "rrd-mail-in")
            .with_graph("mail-out", "rrd-mail-out")
            .with_file("/cfg/motd.txt", b"Welcome to the test appliance\n")
            .with_email(
                100,
                json!({"id": 100, "sender": "alice@example.com", "action": "DELIVER"}),
            )
            .with_email(
                101,
                json!({"id": 101, "sender": "mallory@example.net", "action": "REJECT"}),
            );

        state.time = "2024-05-17T08:00:00Z".to_string();
        state.uptime = 86_400;
        state.version = "5.6.0".to_string();
        state.latest_versions = vec![json!({"version": "5.6.0"}), json!({"version": "5.7.1"})];
        state.dns_cache = vec!["example.com".to_string(), "example.net".to_string()];
        state.license = json!({"type": "subscription", "expires": "2030-01-01"});
        state
    }

    /// The parameters of revision 1.
    pub fn base_config() -> Vec<ConfigParameter> {
        vec![ConfigParameter::new("hostname", "mx1.example.com")]
    }
}
