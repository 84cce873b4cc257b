//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::HalonClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// # Example
///
/// ```ignore
/// use halonapi::{ConfigRevision, Get, HalonClient, RevisionId};
///
/// let client = HalonClient::from_env()?;
/// let head = ConfigRevision::get(&client, RevisionId::Head.into()).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity.
    type Id: Send;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the appliance rejects the ID or the request fails.
    async fn get(client: &HalonClient, id: Self::Id) -> Result<Self>;
}
