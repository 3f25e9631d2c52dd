use crate::application::dto::CookbookReport;
use crate::cookbook_analysis::domain::CookbookRecord;
use crate::ports::outbound::CookbookReportFormatter;
use crate::shared::Result;

const SUMMARY_HEADER: [&str; 5] = [
    "Cookbook Name",
    "Version",
    "Violations",
    "Automatically Correctable",
    "Nodes Affected",
];

const DETAILED_HEADER: [&str; 7] = [
    "Cookbook Name",
    "Version",
    "File",
    "Offense",
    "Automatically Correctable",
    "Message",
    "Nodes",
];

/// Machine readable cookbook report (RFC 4180)
pub struct CsvFormatter {
    detailed: bool,
}

impl CsvFormatter {
    pub fn summary() -> Self {
        Self { detailed: false }
    }

    pub fn detailed() -> Self {
        Self { detailed: true }
    }

    /// Quotes a field when it contains a delimiter, quote or line break
    fn escape_field(field: &str) -> String {
        if field.contains([',', '"', '\n', '\r']) {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn push_row<S: AsRef<str>>(output: &mut String, fields: &[S]) {
        let row: Vec<String> = fields
            .iter()
            .map(|f| Self::escape_field(f.as_ref()))
            .collect();
        output.push_str(&row.join(","));
        output.push_str("\r\n");
    }

    fn yes_no(value: bool) -> &'static str {
        if value {
            "Y"
        } else {
            "N"
        }
    }

    fn summary_rows(output: &mut String, record: &CookbookRecord) {
        Self::push_row(
            output,
            &[
                record.name().to_string(),
                record.version().to_string(),
                record.num_offenses().to_string(),
                record.num_correctable().to_string(),
                record.nodes().len().to_string(),
            ],
        );
    }

    /// One row per offense; identity columns only on the record's first row
    fn detailed_rows(output: &mut String, record: &CookbookRecord) {
        let nodes: Vec<&str> = record.nodes().iter().map(String::as_str).collect();
        let mut first_row = true;

        for file in record.files() {
            for (index, offense) in file.offenses().iter().enumerate() {
                let (name, version, node_list) = if first_row {
                    (record.name(), record.version(), nodes.join(" "))
                } else {
                    ("", "", String::new())
                };
                let path = if index == 0 { file.path() } else { "" };
                Self::push_row(
                    output,
                    &[
                        name,
                        version,
                        path,
                        offense.rule_id(),
                        Self::yes_no(offense.auto_correctable()),
                        offense.message(),
                        node_list.as_str(),
                    ],
                );
                first_row = false;
            }
        }

        if first_row {
            let node_list = nodes.join(" ");
            Self::push_row(
                output,
                &[
                    record.name(),
                    record.version(),
                    "",
                    "",
                    "",
                    "",
                    node_list.as_str(),
                ],
            );
        }
    }
}

impl CookbookReportFormatter for CsvFormatter {
    fn format(&self, report: &CookbookReport) -> Result<String> {
        let mut output = String::new();
        if self.detailed {
            Self::push_row(&mut output, &DETAILED_HEADER);
        } else {
            Self::push_row(&mut output, &SUMMARY_HEADER);
        }

        for record in report.displayed_records() {
            if self.detailed {
                Self::detailed_rows(&mut output, record);
            } else {
                Self::summary_rows(&mut output, record);
            }
        }
        Ok(output)
    }
}
