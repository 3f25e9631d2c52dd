/// Mock implementations for testing
mod mock_cookbook_catalog;
mod mock_progress_reporter;
mod mock_static_analyzer;
mod mock_usage_index;

pub use mock_cookbook_catalog::MockCookbookCatalog;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_static_analyzer::MockStaticAnalyzer;
pub use mock_usage_index::MockUsageIndex;
