//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::client::HalonClient;
use crate::error::Result;
use crate::pagination::Page;
use crate::params::Pagination;

/// Page size used by [`List::list_all`].
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Maximum pages to fetch (safety limit).
const MAX_PAGES: u32 = 1000;

/// List entities with pagination support.
///
/// # Example
///
/// ```ignore
/// use halonapi::{HalonClient, List, Pagination, StatEntry, StatsFilter};
///
/// let client = HalonClient::from_env()?;
///
/// // Fetch a single page
/// let filter = StatsFilter::default();
/// let page = StatEntry::list_page(&client, &filter, Pagination::new(0, 50)).await?;
///
/// // Fetch all pages
/// let all = StatEntry::list_all(&client, &StatsFilter::default()).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Query parameters for filtering.
    type Query: Default + Send + Sync;

    /// List entities matching the query (single page).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list_page(
        client: &HalonClient,
        query: &Self::Query,
        pagination: Pagination,
    ) -> Result<Page<Self>>;

    /// List all entities matching the query (fetches all pages).
    ///
    /// Pages are requested with increasing `offset` until one comes back
    /// short.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all(client: &HalonClient, query: &Self::Query) -> Result<Vec<Self>> {
        let mut all_items = Vec::new();
        let mut pagination = Pagination::new(0, DEFAULT_PAGE_SIZE);

        loop {
            let result = Self::list_page(client, query, pagination).await?;
            let has_more = result.has_more;
            all_items.extend(result.items);

            if !has_more {
                break;
            }
            pagination = pagination.next();

            if pagination.offset >= MAX_PAGES {
                tracing::warn!(
                    "Reached pagination limit of {} pages, stopping",
                    MAX_PAGES
                );
                break;
            }
        }

        Ok(all_items)
    }
}
