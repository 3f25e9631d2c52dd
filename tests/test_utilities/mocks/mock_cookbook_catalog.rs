use async_trait::async_trait;
use cookbook_audit::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock CookbookCatalog serving a fixed list of cookbook versions
#[derive(Clone, Default)]
pub struct MockCookbookCatalog {
    cookbooks: Vec<(String, String)>,
    listing_error: Option<String>,
    download_errors: HashMap<String, String>,
    downloads: Arc<Mutex<Vec<String>>>,
}

impl MockCookbookCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cookbook(mut self, name: &str, version: &str) -> Self {
        self.cookbooks.push((name.to_string(), version.to_string()));
        self
    }

    /// Listing fails with this message
    pub fn unavailable(message: &str) -> Self {
        Self {
            listing_error: Some(message.to_string()),
            ..Default::default()
        }
    }

    /// Downloads of `name` (any version) fail with this message
    pub fn with_download_error(mut self, name: &str, message: &str) -> Self {
        self.download_errors
            .insert(name.to_string(), message.to_string());
        self
    }

    pub fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl CookbookCatalog for MockCookbookCatalog {
    async fn list_cookbooks(&self) -> Result<Vec<CatalogEntry>> {
        if let Some(message) = &self.listing_error {
            anyhow::bail!("{}", message);
        }
        Ok(self
            .cookbooks
            .iter()
            .map(|(name, version)| CatalogEntry::new(name.clone(), version.clone()))
            .collect())
    }

    async fn download(&self, cookbook: &CookbookVersionRef, destination: &Path) -> Result<PathBuf> {
        self.downloads.lock().unwrap().push(cookbook.to_string());
        if let Some(message) = self.download_errors.get(cookbook.name()) {
            anyhow::bail!("{}", message);
        }
        std::fs::create_dir_all(destination)?;
        Ok(destination.to_path_buf())
    }
}
