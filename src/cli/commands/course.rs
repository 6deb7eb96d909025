//! Course command handler

use super::{confirm, fail, print_table};
use crate::args::CourseSubcommand;
use nu_enrollment::core::report::Table;
use nu_enrollment::core::roster::course_roster;
use nu_enrollment::core::RecordStore;

/// Dispatch course subcommands
pub fn run(subcommand: CourseSubcommand, store: &mut RecordStore) {
    match subcommand {
        CourseSubcommand::Add { code, fields } => match store.create_course(fields.into_new(code)) {
            Ok(course) => println!("✓ Added course {} ({})", course.code, course.name),
            Err(e) => fail("Add course", &e),
        },
        CourseSubcommand::Update { code, fields } => {
            let patch = fields.into_patch();
            if patch.is_empty() {
                eprintln!("✗ Nothing to update; pass at least one field");
                std::process::exit(1);
            }
            match store.update_course(&code, patch) {
                Ok(course) => println!("✓ Updated course {} ({})", course.code, course.name),
                Err(e) => fail("Update course", &e),
            }
        }
        CourseSubcommand::Delete { code, yes } => handle_delete(store, &code, yes),
        CourseSubcommand::List => print_table(&Table::courses(&course_roster(store.database()))),
    }
}

fn handle_delete(store: &mut RecordStore, code: &str, yes: bool) {
    let code = match store.course(code) {
        Ok(course) => course.code.clone(),
        Err(e) => fail("Delete course", &e),
    };
    let dependents = store.enrollments().filter(|e| e.course_code == code).count();

    if !yes && !confirm(&format!("Delete course {code} and {dependents} enrollment(s)?")) {
        println!("✗ Delete cancelled");
        return;
    }

    match store.delete_course(&code) {
        Ok(summary) => println!(
            "✓ Deleted course {code} and {} enrollment(s)",
            summary.enrollments_removed
        ),
        Err(e) => fail("Delete course", &e),
    }
}
