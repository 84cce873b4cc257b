//! Resource accessors.
//!
//! Each submodule adds inherent methods to [`HalonClient`](crate::HalonClient)
//! for one appliance resource. An accessor only knows its verb, its path
//! and the shape of its parameters; everything else goes through
//! [`HalonClient::execute`](crate::HalonClient::execute).

mod config;
mod dns;
mod email;
mod files;
mod graphs;
mod license;
mod scripts;
mod stats;
mod system;
mod update;

pub use config::DEFAULT_REVISION_MESSAGE;
