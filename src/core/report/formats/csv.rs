//! CSV report generator

use super::ReportFormat;
use crate::core::report::{ReportGenerator, Table};

/// Renders tables as RFC 4180-style CSV
pub struct CsvReporter;

impl CsvReporter {
    /// Create a new CSV reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Quote a field when it contains a delimiter, quote or line break
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn line<S: AsRef<str>>(cells: &[S]) -> String {
    cells
        .iter()
        .map(|c| escape(c.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

impl ReportGenerator for CsvReporter {
    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }

    fn render(&self, table: &Table) -> String {
        let mut out = line(&table.headers);
        out.push('\n');
        for row in &table.rows {
            out.push_str(&line(row));
            out.push('\n');
        }
        out
    }
}
