//! Halon management API client library.
//!
//! A Rust client for the administrative REST API of a Halon mail-security
//! appliance: system control, clock and updates, files, configuration
//! revisions, email history, licensing, statistics and graph export.
//!
//! # Quick Start
//!
//! ```no_run
//! use halonapi::{ClientConfig, HalonClient, Pagination, RevisionId, StatsFilter};
//!
//! #[tokio::main]
//! async fn main() -> halonapi::Result<()> {
//!     // Create client from environment variables
//!     let client = HalonClient::from_env()?;
//!
//!     println!("Version: {}", client.get_software_version().await?);
//!
//!     // Newest configuration revision
//!     let head = client.get_config_revision(RevisionId::Head, None).await?;
//!     println!("HEAD has {} parameters", head.config.len());
//!
//!     // Clear every counter in one namespace
//!     let filter = StatsFilter::default().namespace("mail");
//!     let cleared = client.clear_stats(&filter).await?;
//!     println!("Cleared {cleared} counters");
//!
//!     let graphs = client.list_graphs(Pagination::default()).await?;
//!     println!("Found {} graphs", graphs.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Every accessor builds a [`RequestSpec`] and hands it to
//! [`HalonClient::execute`], which attaches Basic auth, sends it, and
//! normalizes the answer into an [`Outcome`] or a [`HalonError`]. A
//! `204 No Content` is always [`Outcome::NoContent`]; a failed status
//! carries the appliance's `message` when it sent one.
//!
//! Collection records implement [`List`] and single records [`Get`].
//!
//! # Configuration
//!
//! [`ClientConfig::from_env`] reads:
//!
//! - `HALON_HOST`, `HALON_USER`, `HALON_PASSWORD` (required)
//! - `HALON_API_VERSION` (defaults to [`DEFAULT_API_VERSION`])
//! - `HALON_PORT`, `HALON_CA_BUNDLE`, `HALON_VERIFY_TLS`, `HALON_INSECURE`

pub mod blocking;
mod client;
mod config;
mod error;
mod models;
mod outcome;
mod pagination;
mod params;
mod request;
mod resources;
mod traits;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::HalonClient;
pub use config::{ClientConfig, TlsMode, DEFAULT_API_VERSION};
pub use error::{ErrorKind, HalonError, Result};
pub use outcome::Outcome;
pub use pagination::Page;
pub use params::{
    DnsCacheFilter, EmailHistoryQuery, FileRange, Pagination, StatsFilter, DEFAULT_LIMIT,
};
pub use request::RequestSpec;
pub use resources::DEFAULT_REVISION_MESSAGE;

// Re-export traits
pub use traits::{Get, List};

// Re-export models
pub use models::{
    ConfigParameter, ConfigRevision, ConfigType, EmailRecord, GraphEntry, LicenseInfo,
    RevisionId, RevisionSelector, StatEntry, UpdateStatus,
};
