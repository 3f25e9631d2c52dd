use crate::application::dto::NodeReport;
use crate::ports::outbound::NodeReportFormatter;
use crate::shared::Result;
use tabled::{
    settings::{object::Columns, Modify, Style, Width},
    Table, Tabled,
};

/// Terminal width below which the table may wrap badly
pub const MIN_TERMINAL_WIDTH: usize = 120;

const NARROW_TERMINAL_NOTE: &str = "\nNote: If the output above is not formatted correctly,\n      please expand your terminal window to be at least \n      120 characters wide.\n";

#[derive(Tabled)]
struct NodeRow {
    #[tabled(rename = "Node Name")]
    node_name: String,
    #[tabled(rename = "Chef Version")]
    chef_version: String,
    #[tabled(rename = "Operating System")]
    operating_system: String,
    #[tabled(rename = "Cookbooks")]
    cookbooks: String,
}

/// Borderless fixed-width node table sized to the terminal
pub struct NodeTableFormatter {
    terminal_width: usize,
}

impl NodeTableFormatter {
    pub fn new(terminal_width: usize) -> Self {
        Self { terminal_width }
    }

    /// Minimum widths of the first three columns (30%, 10% and 15% of the terminal)
    fn min_widths(&self) -> [usize; 3] {
        [
            self.terminal_width * 30 / 100,
            self.terminal_width * 10 / 100,
            self.terminal_width * 15 / 100,
        ]
    }
}

impl Default for NodeTableFormatter {
    fn default() -> Self {
        Self::new(MIN_TERMINAL_WIDTH)
    }
}

impl NodeReportFormatter for NodeTableFormatter {
    fn format(&self, report: &NodeReport) -> Result<String> {
        let rows = report.items.iter().map(|item| {
            let [node_name, chef_version, operating_system, cookbooks] = item.to_row();
            NodeRow {
                node_name,
                chef_version,
                operating_system,
                cookbooks,
            }
        });

        let mut table = Table::new(rows);
        table.with(Style::blank());
        for (column, width) in self.min_widths().into_iter().enumerate() {
            table.with(Modify::new(Columns::single(column)).with(Width::increase(width)));
        }

        let mut output = format!("\n{}\n", table);
        if self.terminal_width < MIN_TERMINAL_WIDTH {
            output.push_str(NARROW_TERMINAL_NOTE);
        }
        Ok(output)
    }
}
