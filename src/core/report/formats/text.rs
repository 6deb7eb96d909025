//! Column-aligned text for terminal output

use super::ReportFormat;
use crate::core::report::{ReportGenerator, Table};
use std::fmt::Write;

/// Pads every column to its widest cell
pub struct TextReporter;

impl TextReporter {
    /// Create a new text reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{:<w$}", c.as_ref(), w = *w))
        .collect();
    let _ = writeln!(out, "{}", padded.join("  ").trim_end());
}

impl ReportGenerator for TextReporter {
    fn format(&self) -> ReportFormat {
        ReportFormat::Text
    }

    fn render(&self, table: &Table) -> String {
        let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
        for row in &table.rows {
            for (width, value) in widths.iter_mut().zip(row) {
                *width = (*width).max(value.chars().count());
            }
        }

        let mut out = String::new();
        push_row(&mut out, &table.headers, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_row(&mut out, &rule, &widths);
        for row in &table.rows {
            push_row(&mut out, row, &widths);
        }
        out
    }
}
