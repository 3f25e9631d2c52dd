/// Formatter adapters for cookbook and node reports
mod csv_formatter;
mod error_summary_formatter;
mod node_table_formatter;
mod text_formatter;

pub use csv_formatter::CsvFormatter;
pub use error_summary_formatter::ErrorSummaryFormatter;
pub use node_table_formatter::{NodeTableFormatter, MIN_TERMINAL_WIDTH};
pub use text_formatter::TextFormatter;
