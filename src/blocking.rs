//! Thread-blocking access to a [`HalonClient`].
//!
//! [`BlockingClient`] owns a single-threaded runtime and drives each call
//! to completion on the calling thread. It must not be used from inside an
//! async context.

use std::future::Future;

use tokio::runtime::{Builder, Runtime};

use crate::client::HalonClient;
use crate::config::ClientConfig;
use crate::error::{HalonError, Result};

/// Synchronous wrapper around [`HalonClient`].
///
/// # Example
///
/// ```no_run
/// use halonapi::blocking::BlockingClient;
/// use halonapi::ClientConfig;
///
/// # fn example() -> halonapi::Result<()> {
/// let client = BlockingClient::new(ClientConfig::new("mx1", "admin", "secret"))?;
/// let version = client.call(|c| c.get_software_version())?;
/// println!("running {version}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct BlockingClient {
    inner: HalonClient,
    runtime: Runtime,
}

impl BlockingClient {
    /// Build the client and its runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the runtime
    /// cannot be started.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::from_client(HalonClient::new(config)?)
    }

    /// Wrap an existing async client.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be started.
    pub fn from_client(inner: HalonClient) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| HalonError::Config(format!("failed to start runtime: {e}")))?;
        Ok(Self { inner, runtime })
    }

    /// The wrapped async client.
    pub fn client(&self) -> &HalonClient {
        &self.inner
    }

    /// Run one accessor to completion, blocking the current thread.
    pub fn call<'a, T, F, Fut>(&'a self, f: F) -> Result<T>
    where
        F: FnOnce(&'a HalonClient) -> Fut,
        Fut: Future<Output = Result<T>> + 'a,
    {
        self.runtime.block_on(f(&self.inner))
    }
}
