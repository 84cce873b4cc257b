//! Configuration revisions, plus the config test family this client does
//! not implement.

use serde::Serialize;
use serde_json::Value;

use crate::client::HalonClient;
use crate::error::{HalonError, Result};
use crate::models::{
    revision_path, ConfigParameter, ConfigRevision, ConfigType, RevisionId, RevisionSelector,
};
use crate::pagination::Page;
use crate::params::Pagination;
use crate::request::RequestSpec;
use crate::traits::{Get, List};

/// Message attached to revisions created without one.
pub const DEFAULT_REVISION_MESSAGE: &str = "Created through API";

#[derive(Serialize)]
struct NewRevision<'a> {
    config: &'a [ConfigParameter],
    message: &'a str,
}

impl HalonClient {
    /// List stored revisions.
    pub async fn list_config_revisions(
        &self,
        pagination: Pagination,
    ) -> Result<Page<ConfigRevision>> {
        ConfigRevision::list_page(self, &(), pagination).await
    }

    /// Fetch one revision, optionally narrowed to a config slot.
    ///
    /// # Errors
    ///
    /// Returns [`HalonError::InvalidArgument`] without sending anything if
    /// `config_type` is given with a positive revision id.
    pub async fn get_config_revision(
        &self,
        id: RevisionId,
        config_type: Option<ConfigType>,
    ) -> Result<ConfigRevision> {
        let selector = match config_type {
            Some(t) => RevisionSelector::with_type(id, t)?,
            None => RevisionSelector::from(id),
        };
        ConfigRevision::get(self, selector).await
    }

    /// Store a new revision and return its id.
    ///
    /// `message` defaults to [`DEFAULT_REVISION_MESSAGE`].
    #[tracing::instrument(skip(self, config), fields(params = config.len()))]
    pub async fn create_config_revision(
        &self,
        id: RevisionId,
        config: &[ConfigParameter],
        message: Option<&str>,
    ) -> Result<i64> {
        let payload = NewRevision {
            config,
            message: message.unwrap_or(DEFAULT_REVISION_MESSAGE),
        };
        let spec = RequestSpec::post(revision_path(id)?).payload(&payload)?;
        self.execute(spec).await?.field("id")
    }

    /// Start a configuration test. Not implemented.
    pub async fn start_config_test(
        &self,
        _config: &[ConfigParameter],
        _id: Option<RevisionId>,
        _conditions: Option<&Value>,
    ) -> Result<()> {
        Err(HalonError::unsupported("start_config_test"))
    }

    /// Status of the running configuration test. Not implemented.
    pub async fn get_config_test_status(&self) -> Result<Value> {
        Err(HalonError::unsupported("get_config_test_status"))
    }

    /// Fetch a test configuration. Not implemented.
    pub async fn get_test_config(
        &self,
        _id: RevisionId,
        _config_type: Option<ConfigType>,
    ) -> Result<ConfigRevision> {
        Err(HalonError::unsupported("get_test_config"))
    }

    /// Cancel the running configuration test. Not implemented.
    pub async fn cancel_config_test(&self, _id: RevisionId) -> Result<()> {
        Err(HalonError::unsupported("cancel_config_test"))
    }

    /// Debug the running configuration test. Not implemented.
    pub async fn debug_config_test(&self, _id: RevisionId) -> Result<Value> {
        Err(HalonError::unsupported("debug_config_test"))
    }

    /// Check a configuration for errors. Not implemented.
    pub async fn check_config(&self, _config: &[ConfigParameter]) -> Result<()> {
        Err(HalonError::unsupported("check_config"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::ErrorKind;

    fn offline_client() -> HalonClient {
        HalonClient::new(ClientConfig::new("127.0.0.1", "admin", "pw").port(9)).unwrap()
    }

    #[test]
    fn test_config_test_family_is_unsupported() {
        let client = offline_client();
        let err = tokio_test::block_on(client.check_config(&[])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
        let err = tokio_test::block_on(client.get_config_test_status()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
        let err =
            tokio_test::block_on(client.cancel_config_test(RevisionId::Number(-1))).unwrap_err();
        assert!(err.to_string().contains("cancel_config_test"));
    }

    #[test]
    fn test_type_with_positive_id_fails_before_sending() {
        let client = offline_client();
        let t = ConfigType::try_from(2).unwrap();
        let err = tokio_test::block_on(client.get_config_revision(RevisionId::Number(42), Some(t)))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_revision_zero_fails_before_sending() {
        let client = offline_client();
        let err = tokio_test::block_on(client.get_config_revision(RevisionId::Number(0), None))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let config = [ConfigParameter::new("x", "1")];
        let err = tokio_test::block_on(client.create_config_revision(
            RevisionId::Number(0),
            &config,
            None,
        ))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
