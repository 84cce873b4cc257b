//! HSL script tooling. None of it is implemented by this client; every
//! call fails with [`HalonError::Unsupported`].

use serde_json::Value;

use crate::client::HalonClient;
use crate::error::{HalonError, Result};
use crate::models::ConfigParameter;

impl HalonClient {
    /// Check a script for errors.
    pub async fn check_hsl_script(
        &self,
        _script: &str,
        _config: &[ConfigParameter],
        _script_type: &str,
        _compat: Option<u32>,
    ) -> Result<Vec<Value>> {
        Err(HalonError::unsupported("check_hsl_script"))
    }

    /// Run a script.
    pub async fn run_hsl_script(
        &self,
        _script: &str,
        _config: &[ConfigParameter],
        _preamble: Option<&str>,
        _postamble: Option<&str>,
    ) -> Result<String> {
        Err(HalonError::unsupported("run_hsl_script"))
    }

    /// Debug a running script.
    pub async fn debug_hsl_script(&self, _id: &str) -> Result<Value> {
        Err(HalonError::unsupported("debug_hsl_script"))
    }

    /// Include graph of a script.
    pub async fn get_hsl_include_graph(
        &self,
        _script: &str,
        _config: &[ConfigParameter],
        _script_type: &str,
    ) -> Result<Value> {
        Err(HalonError::unsupported("get_hsl_include_graph"))
    }
}
