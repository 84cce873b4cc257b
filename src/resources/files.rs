//! Files on the appliance's disk.
//!
//! Contents travel as base64 text in the `data` member, in both
//! directions.

use serde::{Deserialize, Serialize};
use serde_with::base64::Base64;
use serde_with::serde_as;

use crate::client::HalonClient;
use crate::error::Result;
use crate::outcome::Outcome;
use crate::params::FileRange;
use crate::request::RequestSpec;

#[derive(Debug, Serialize)]
struct PathQuery<'a> {
    path: &'a str,
}

#[serde_as]
#[derive(Serialize)]
struct FileContents<'a> {
    #[serde_as(as = "Base64")]
    data: &'a [u8],
}

#[serde_as]
#[derive(Deserialize)]
struct FileChunk {
    #[serde_as(as = "Base64")]
    data: Vec<u8>,
}

impl HalonClient {
    /// Read the bytes of `path` inside `range`.
    #[tracing::instrument(skip(self))]
    pub async fn read_file(&self, path: &str, range: FileRange) -> Result<Vec<u8>> {
        let spec = RequestSpec::get("/system/files")
            .query(&PathQuery { path })?
            .query(&range)?;
        let chunk: FileChunk = self.execute(spec).await?.decode()?;
        Ok(chunk.data)
    }

    /// Replace the contents of `path` with `data`.
    #[tracing::instrument(skip(self, data), fields(len = data.len()))]
    pub async fn write_file(&self, path: &str, data: &[u8]) -> Result<Outcome> {
        let spec = RequestSpec::put("/system/files")
            .query(&PathQuery { path })?
            .payload(&FileContents { data })?;
        self.execute(spec).await
    }

    /// Delete `path`.
    #[tracing::instrument(skip(self))]
    pub async fn clear_file(&self, path: &str) -> Result<Outcome> {
        let spec = RequestSpec::delete("/system/files").query(&PathQuery { path })?;
        self.execute(spec).await
    }

    /// Size of `path` in bytes.
    #[tracing::instrument(skip(self))]
    pub async fn get_file_size(&self, path: &str) -> Result<u64> {
        let spec = RequestSpec::post("/system/files:size").query(&PathQuery { path })?;
        self.execute(spec).await?.field("size")
    }
}
