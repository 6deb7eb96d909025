//! Student command handler

use super::{confirm, fail, print_table};
use crate::args::StudentSubcommand;
use nu_enrollment::core::models::StudentId;
use nu_enrollment::core::report::Table;
use nu_enrollment::core::roster::student_roster;
use nu_enrollment::core::RecordStore;

/// Dispatch student subcommands
pub fn run(subcommand: StudentSubcommand, store: &mut RecordStore) {
    match subcommand {
        StudentSubcommand::Add { fields } => match store.create_student(fields.into_new()) {
            Ok(student) => println!("✓ Added student {} ({})", student.full_name(), student.id),
            Err(e) => fail("Add student", &e),
        },
        StudentSubcommand::Update { id, fields } => {
            let patch = fields.into_patch();
            if patch.is_empty() {
                eprintln!("✗ Nothing to update; pass at least one field");
                std::process::exit(1);
            }
            match store.update_student(id, patch) {
                Ok(student) => println!("✓ Updated student {} ({})", student.full_name(), id),
                Err(e) => fail("Update student", &e),
            }
        }
        StudentSubcommand::Delete { id, yes } => handle_delete(store, id, yes),
        StudentSubcommand::List => print_table(&Table::students(&student_roster(store.database()))),
    }
}

fn handle_delete(store: &mut RecordStore, id: StudentId, yes: bool) {
    let name = match store.student(id) {
        Ok(student) => student.full_name(),
        Err(e) => fail("Delete student", &e),
    };
    let dependents = store.enrollments().filter(|e| e.student_id == id).count();

    if !yes
        && !confirm(&format!(
            "Delete student {name} and {dependents} enrollment(s)?"
        ))
    {
        println!("✗ Delete cancelled");
        return;
    }

    match store.delete_student(id) {
        Ok(summary) => println!(
            "✓ Deleted student {name} and {} enrollment(s)",
            summary.enrollments_removed
        ),
        Err(e) => fail("Delete student", &e),
    }
}
