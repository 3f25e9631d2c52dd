use crate::adapters::outbound::formatters::{CsvFormatter, TextFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::CookbookReportFormatter;

/// Factory for creating cookbook report formatters
///
/// This factory encapsulates the creation logic for different formatter implementations,
/// following the Factory Pattern. It belongs in the application layer as it orchestrates
/// the selection of infrastructure adapters based on application needs.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter for the output format and layout
    ///
    /// # Examples
    /// ```
    /// use cookbook_audit::application::dto::OutputFormat;
    /// use cookbook_audit::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Csv, true);
    /// ```
    pub fn create(format: OutputFormat, detailed: bool) -> Box<dyn CookbookReportFormatter> {
        match (format, detailed) {
            (OutputFormat::Txt, false) => Box::new(TextFormatter::summary()),
            (OutputFormat::Txt, true) => Box::new(TextFormatter::detailed()),
            (OutputFormat::Csv, false) => Box::new(CsvFormatter::summary()),
            (OutputFormat::Csv, true) => Box::new(CsvFormatter::detailed()),
        }
    }

    /// Returns the progress message for the specified output format
    ///
    /// # Examples
    /// ```
    /// use cookbook_audit::application::dto::OutputFormat;
    /// use cookbook_audit::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Csv);
    /// assert_eq!(message, "📝 Generating CSV report...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Txt => "📝 Generating text report...",
            OutputFormat::Csv => "📝 Generating CSV report...",
        }
    }
}
