use crate::cookbook_analysis::domain::FileOffenses;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// StaticAnalyzer port for linting a cookbook source tree
///
/// The rules themselves live in an external tool; implementations only run
/// it and decode its machine-readable output.
#[async_trait]
pub trait StaticAnalyzer: Send + Sync {
    /// Analyzes the cookbook rooted at `cookbook_path`
    ///
    /// # Returns
    /// Offenses grouped by file. An empty vector means a clean cookbook.
    ///
    /// # Errors
    /// Returns an error if the tool could not be run or its output could not
    /// be decoded. Finding offenses is never an error.
    async fn analyze(&self, cookbook_path: &Path) -> Result<Vec<FileOffenses>>;
}
