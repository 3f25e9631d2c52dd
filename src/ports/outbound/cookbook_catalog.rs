use crate::cookbook_analysis::domain::{CatalogEntry, CookbookVersionRef};
use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// CookbookCatalog port for the authoritative cookbook inventory
///
/// This port abstracts the server that knows which cookbook versions exist
/// and can hand out their source files.
///
/// # Async Support
/// Implementations must be `Send + Sync` so that downloads for many cookbook
/// versions can run concurrently against one shared client.
#[async_trait]
pub trait CookbookCatalog: Send + Sync {
    /// Lists every cookbook version known to the catalog
    ///
    /// Entries are returned as listed; validating them is up to the caller.
    ///
    /// # Errors
    /// Returns an error if the listing cannot be retrieved. No report can be
    /// produced without it.
    async fn list_cookbooks(&self) -> Result<Vec<CatalogEntry>>;

    /// Downloads the source tree of one cookbook version
    ///
    /// # Arguments
    /// * `cookbook` - The exact version to fetch
    /// * `destination` - Empty directory the tree is written into
    ///
    /// # Returns
    /// The root directory of the downloaded cookbook
    ///
    /// # Errors
    /// Returns an error if the manifest or any file cannot be fetched or written
    async fn download(&self, cookbook: &CookbookVersionRef, destination: &Path)
        -> Result<PathBuf>;
}
