//! Graph databases.

use crate::client::HalonClient;
use crate::error::Result;
use crate::models::GraphEntry;
use crate::outcome::Outcome;
use crate::pagination::Page;
use crate::params::Pagination;
use crate::request::RequestSpec;
use crate::traits::List;

fn graph_path(id: &str) -> String {
    format!("/graphs/{}", urlencoding::encode(id))
}

impl HalonClient {
    /// List graph databases.
    pub async fn list_graphs(&self, pagination: Pagination) -> Result<Page<GraphEntry>> {
        GraphEntry::list_page(self, &(), pagination).await
    }

    /// Export one graph database.
    #[tracing::instrument(skip(self))]
    pub async fn export_graph(&self, id: &str) -> Result<String> {
        self.execute(RequestSpec::get(graph_path(id)))
            .await?
            .field("data")
    }

    /// Clear one graph database.
    #[tracing::instrument(skip(self))]
    pub async fn clear_graph(&self, id: &str) -> Result<Outcome> {
        self.execute(RequestSpec::delete(graph_path(id))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_id_is_escaped() {
        assert_eq!(graph_path("mail-in"), "/graphs/mail-in");
        assert_eq!(graph_path("a/b c"), "/graphs/a%2Fb%20c");
    }
}
