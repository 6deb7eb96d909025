//! Markdown report generator
//!
//! Renders rosters as pipe tables, which display well on GitHub, GitLab and
//! in VS Code.

use super::ReportFormat;
use crate::core::report::{ReportGenerator, Table};
use std::fmt::Write;

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn title(name: &str) -> String {
        let mut chars = name.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Pipes inside a cell would end it early
fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

impl ReportGenerator for MarkdownReporter {
    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }

    fn render(&self, table: &Table) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# {}\n", Self::title(table.name));

        let _ = writeln!(out, "| {} |", table.headers.join(" | "));
        let _ = writeln!(out, "|{}", "---|".repeat(table.headers.len()));
        for row in &table.rows {
            let cells: Vec<String> = row.iter().map(|c| cell(c)).collect();
            let _ = writeln!(out, "| {} |", cells.join(" | "));
        }

        if table.is_empty() {
            out.push_str("\n_No records._\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_pipe_table() {
        let table = Table {
            name: "courses",
            headers: vec!["Code", "Name"],
            rows: vec![vec!["CS1".to_string(), "A|B".to_string()]],
        };
        let md = MarkdownReporter::new().render(&table);
        assert!(md.starts_with("# Courses\n"));
        assert!(md.contains("| Code | Name |\n|---|---|\n"));
        assert!(md.contains("| CS1 | A\\|B |"));
    }

    #[test]
    fn empty_table_is_noted() {
        let table = Table {
            name: "students",
            headers: vec!["ID"],
            rows: Vec::new(),
        };
        assert!(MarkdownReporter::new().render(&table).contains("_No records._"));
    }
}
