//! Statistics counters.

use crate::client::HalonClient;
use crate::error::Result;
use crate::models::StatEntry;
use crate::pagination::Page;
use crate::params::{Pagination, StatsFilter};
use crate::request::RequestSpec;
use crate::traits::List;

impl HalonClient {
    /// List counters matching `filter`.
    pub async fn list_stats(
        &self,
        filter: &StatsFilter,
        pagination: Pagination,
    ) -> Result<Page<StatEntry>> {
        StatEntry::list_page(self, filter, pagination).await
    }

    /// Clear counters matching `filter` and return how many were affected.
    #[tracing::instrument(skip(self))]
    pub async fn clear_stats(&self, filter: &StatsFilter) -> Result<u64> {
        let spec = RequestSpec::delete("/stats").query(filter)?;
        self.execute(spec).await?.field("affected")
    }
}
