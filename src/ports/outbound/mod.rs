/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (Chef server, analyzer process, console, etc.).
pub mod cookbook_catalog;
pub mod output_presenter;
pub mod progress_reporter;
pub mod report_formatter;
pub mod static_analyzer;
pub mod usage_index;

pub use cookbook_catalog::CookbookCatalog;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use report_formatter::{CookbookReportFormatter, NodeReportFormatter};
pub use static_analyzer::StaticAnalyzer;
pub use usage_index::UsageIndex;
