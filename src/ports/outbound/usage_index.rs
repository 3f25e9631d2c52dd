use crate::cookbook_analysis::domain::{CookbookVersionRef, NodeRaw};
use crate::shared::Result;
use async_trait::async_trait;

/// UsageIndex port for questions about which nodes apply which cookbooks
///
/// Backed by a search service over node attribute data.
#[async_trait]
pub trait UsageIndex: Send + Sync {
    /// Names of the nodes whose last run applied exactly this cookbook version
    ///
    /// # Errors
    /// Returns an error if the search request fails or its response can't be decoded
    async fn nodes_using(&self, cookbook: &CookbookVersionRef) -> Result<Vec<String>>;

    /// Raw attribute payloads of every node visible to the search service
    ///
    /// # Errors
    /// Returns an error if the search request fails or its response can't be decoded
    async fn all_nodes(&self) -> Result<Vec<NodeRaw>>;
}
