//! DNS cache.

use crate::client::HalonClient;
use crate::error::Result;
use crate::outcome::Outcome;
use crate::params::DnsCacheFilter;
use crate::request::RequestSpec;

impl HalonClient {
    /// Evict DNS cache entries matching `filter`.
    ///
    /// An empty filter sends no `filter[...]` key at all.
    #[tracing::instrument(skip(self))]
    pub async fn clear_dns_cache(&self, filter: &DnsCacheFilter) -> Result<Outcome> {
        let spec = RequestSpec::delete("/system/dns/cache").query(filter)?;
        self.execute(spec).await
    }
}
