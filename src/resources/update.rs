//! Software versions and updates.

use serde::Serialize;
use serde_json::Value;

use crate::client::HalonClient;
use crate::error::Result;
use crate::models::UpdateStatus;
use crate::outcome::Outcome;
use crate::request::RequestSpec;

#[derive(Serialize)]
struct VersionPayload<'a> {
    version: &'a str,
}

impl HalonClient {
    /// The installed software version.
    #[tracing::instrument(skip(self))]
    pub async fn get_software_version(&self) -> Result<String> {
        self.execute(RequestSpec::get("/system/versions/current"))
            .await?
            .field("version")
    }

    /// Available versions, including the installed one.
    #[tracing::instrument(skip(self))]
    pub async fn get_latest_software_version(&self) -> Result<Vec<Value>> {
        self.execute(RequestSpec::get("/system/versions/latest"))
            .await?
            .decode()
    }

    /// Status of the update in progress.
    ///
    /// The appliance answers with an error status when no update is in
    /// progress; that surfaces as an ordinary [`HalonError::Remote`](crate::HalonError::Remote).
    #[tracing::instrument(skip(self))]
    pub async fn get_update_status(&self) -> Result<UpdateStatus> {
        self.execute(RequestSpec::get("/system/update"))
            .await?
            .decode()
    }

    /// Cancel a pending update.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_pending_update(&self) -> Result<Outcome> {
        self.execute(RequestSpec::delete("/system/update")).await
    }

    /// Start downloading `version` without installing it.
    #[tracing::instrument(skip(self))]
    pub async fn download_update(&self, version: &str) -> Result<Outcome> {
        let spec =
            RequestSpec::post("/system/update:download").payload(&VersionPayload { version })?;
        self.execute(spec).await
    }

    /// Install `version`, downloading it first if needed.
    #[tracing::instrument(skip(self))]
    pub async fn install_update(&self, version: &str) -> Result<Outcome> {
        let spec =
            RequestSpec::post("/system/update:install").payload(&VersionPayload { version })?;
        self.execute(spec).await
    }
}
