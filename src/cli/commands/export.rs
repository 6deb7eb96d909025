//! Export command handler

use nu_enrollment::core::report::{export_tables, ReportFormat, Table};
use nu_enrollment::core::roster::{course_roster, enrollment_roster, student_roster};
use nu_enrollment::core::RecordStore;
use nu_enrollment::{error, info};
use std::path::Path;

/// Write the three rosters to `output_dir` in `format`.
///
/// # Arguments
/// * `store` - Open record store
/// * `format` - Format name (csv, markdown/md, text/txt)
/// * `output_dir` - Directory receiving `students.*`, `courses.*` and `enrollments.*`
pub fn run(store: &RecordStore, format: &str, output_dir: &Path) {
    let format: ReportFormat = match format.parse() {
        Ok(f) => f,
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    };

    let db = store.database();
    let tables = [
        Table::students(&student_roster(db)),
        Table::courses(&course_roster(db)),
        Table::enrollments(&enrollment_roster(db)),
    ];

    match export_tables(&tables, format, output_dir) {
        Ok(paths) => {
            info!("Exported {} rosters as {format} to {}", paths.len(), output_dir.display());
            for path in paths {
                println!("✓ Exported: {}", path.display());
            }
        }
        Err(e) => {
            error!("Export to {} failed: {e}", output_dir.display());
            eprintln!("✗ Failed to export rosters to {}: {e}", output_dir.display());
            std::process::exit(1);
        }
    }
}
