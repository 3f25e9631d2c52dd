/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod cookbook_report;
mod node_report;
mod output_format;
mod report_options;

pub use cookbook_report::CookbookReport;
pub use node_report::NodeReport;
pub use output_format::OutputFormat;
pub use report_options::{ReportOptions, ReportOptionsBuilder, DEFAULT_WORKERS};
