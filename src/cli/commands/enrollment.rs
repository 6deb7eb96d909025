//! Enrollment command handler

use super::{confirm, fail, print_table};
use crate::args::EnrollmentSubcommand;
use nu_enrollment::core::models::{EnrollmentPatch, NewEnrollment};
use nu_enrollment::core::report::Table;
use nu_enrollment::core::roster::enrollment_roster;
use nu_enrollment::core::RecordStore;

/// Dispatch enrollment subcommands
pub fn run(subcommand: EnrollmentSubcommand, store: &mut RecordStore) {
    match subcommand {
        EnrollmentSubcommand::Add {
            student_id,
            course_code,
            semester,
        } => {
            let request = NewEnrollment {
                student_id,
                course_code,
                semester,
            };
            match store.create_enrollment(request) {
                Ok(enrollment) => println!(
                    "✓ Enrolled student {} in {} ({}), enrollment {}",
                    enrollment.student_id,
                    enrollment.course_code,
                    enrollment.semester,
                    enrollment.id
                ),
                Err(e) => fail("Add enrollment", &e),
            }
        }
        EnrollmentSubcommand::Update {
            id,
            semester,
            grade,
        } => {
            if semester.is_none() && grade.is_none() {
                eprintln!("✗ Nothing to update; pass --semester and/or --grade");
                std::process::exit(1);
            }
            match store.update_enrollment(id, EnrollmentPatch { semester, grade }) {
                Ok(enrollment) => println!(
                    "✓ Updated enrollment {id} ({}, grade {})",
                    enrollment.semester,
                    enrollment.grade.as_deref().unwrap_or("none")
                ),
                Err(e) => fail("Update enrollment", &e),
            }
        }
        EnrollmentSubcommand::Delete { id, yes } => {
            if let Err(e) = store.enrollment(id) {
                fail("Delete enrollment", &e);
            }
            if !yes && !confirm(&format!("Delete enrollment {id}?")) {
                println!("✗ Delete cancelled");
                return;
            }
            match store.delete_enrollment(id) {
                Ok(()) => println!("✓ Deleted enrollment {id}"),
                Err(e) => fail("Delete enrollment", &e),
            }
        }
        EnrollmentSubcommand::List => {
            print_table(&Table::enrollments(&enrollment_roster(store.database())));
        }
    }
}
