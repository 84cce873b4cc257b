//! Email history.

use serde_json::Value;

use crate::client::HalonClient;
use crate::error::Result;
use crate::models::EmailRecord;
use crate::params::{EmailHistoryQuery, Pagination};
use crate::request::RequestSpec;
use crate::traits::Get;

impl HalonClient {
    /// Search the email history.
    ///
    /// The envelope is returned as-is; its shape depends on whether
    /// `query.total` was requested.
    #[tracing::instrument(skip(self))]
    pub async fn list_email_history(
        &self,
        query: &EmailHistoryQuery,
        pagination: Pagination,
    ) -> Result<Value> {
        let spec = RequestSpec::get("/email/history")
            .query(query)?
            .query(&pagination)?;
        Ok(self.execute(spec).await?.into_value())
    }

    /// Fetch one message from the email history.
    pub async fn get_email(&self, id: u64) -> Result<EmailRecord> {
        EmailRecord::get(self, id).await
    }
}
