//! Licensing.

use serde::Serialize;

use crate::client::HalonClient;
use crate::error::Result;
use crate::models::LicenseInfo;
use crate::outcome::Outcome;
use crate::request::RequestSpec;

#[derive(Serialize)]
struct KeyPayload<'a> {
    key: &'a str,
}

impl HalonClient {
    /// License information for the system.
    #[tracing::instrument(skip(self))]
    pub async fn get_license(&self) -> Result<LicenseInfo> {
        self.execute(RequestSpec::get("/license")).await?.decode()
    }

    /// Ask the appliance to refresh its license from the license server.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_license(&self) -> Result<Outcome> {
        self.execute(RequestSpec::post("/license:refresh")).await
    }

    /// Import a license key for offline use.
    #[tracing::instrument(skip(self, key))]
    pub async fn import_license_key(&self, key: &str) -> Result<Outcome> {
        let spec = RequestSpec::put("/license/key").payload(&KeyPayload { key })?;
        self.execute(spec).await
    }
}
