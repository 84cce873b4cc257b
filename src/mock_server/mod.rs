//! Mock Halon appliance for E2E testing.
//!
//! This module provides an in-memory server that simulates the management
//! API for integration and end-to-end testing. Unlike wiremock, which
//! mocks at the HTTP level per test, this server keeps state across
//! requests: a file written can be read back, a revision created can be
//! fetched, cleared counters are gone.
//!
//! # Example
//!
//! ```ignore
//! use halonapi::mock_server::MockServer;
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = server.client();
//!
//!     let version = client.get_software_version().await.unwrap();
//!     assert_eq!(version, "5.6.0");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{Fixtures, MOCK_PASSWORD, MOCK_USER};
pub use server::MockServer;
pub use state::MockState;
