//! Integration tests for roster export

use nu_enrollment::core::models::{EnrollmentPatch, NewCourse, NewEnrollment, NewStudent};
use nu_enrollment::core::report::{export_tables, ReportFormat, Table};
use nu_enrollment::core::roster::{course_roster, enrollment_roster, student_roster};
use nu_enrollment::core::RecordStore;
use std::fs;
use tempfile::TempDir;

fn populated_store() -> RecordStore {
    let mut store = RecordStore::in_memory();
    let student = store
        .create_student(NewStudent {
            first_name: "Ada".to_string(),
            last_name: "Lovelace, Countess".to_string(),
            email: "ada@example.edu".to_string(),
            ..NewStudent::default()
        })
        .unwrap();
    store
        .create_course(NewCourse {
            code: "CS1800".to_string(),
            name: "Discrete Structures".to_string(),
            department: "Khoury".to_string(),
            credits: 4,
            instructor: "O'Neil \"Doc\" Smith".to_string(),
        })
        .unwrap();
    let enrollment = store
        .create_enrollment(NewEnrollment {
            student_id: student.id,
            course_code: "CS1800".to_string(),
            semester: "Fall 2025".to_string(),
        })
        .unwrap();
    store
        .update_enrollment(
            enrollment.id,
            EnrollmentPatch {
                grade: Some("A".to_string()),
                ..EnrollmentPatch::default()
            },
        )
        .unwrap();
    store
}

fn tables(store: &RecordStore) -> [Table; 3] {
    let db = store.database();
    [
        Table::students(&student_roster(db)),
        Table::courses(&course_roster(db)),
        Table::enrollments(&enrollment_roster(db)),
    ]
}

#[test]
fn csv_export_writes_three_quoted_files() {
    let store = populated_store();
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("exports");

    let written = export_tables(&tables(&store), ReportFormat::Csv, &out).unwrap();
    let names: Vec<_> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["students.csv", "courses.csv", "enrollments.csv"]);

    let students = fs::read_to_string(out.join("students.csv")).unwrap();
    assert!(students.contains("\"Lovelace, Countess\""));
    assert!(students.trim_end().ends_with(",1,1.00"));

    let courses = fs::read_to_string(out.join("courses.csv")).unwrap();
    assert!(courses.contains("\"O'Neil \"\"Doc\"\" Smith\""));

    let enrollments = fs::read_to_string(out.join("enrollments.csv")).unwrap();
    assert_eq!(enrollments.lines().count(), 2);
    assert!(enrollments.contains("\"Ada Lovelace, Countess\""));
}

#[test]
fn markdown_export_uses_md_extension() {
    let store = populated_store();
    let dir = TempDir::new().unwrap();

    let written = export_tables(&tables(&store), ReportFormat::Markdown, dir.path()).unwrap();
    assert!(written.iter().all(|p| p.extension().unwrap() == "md"));

    let courses = fs::read_to_string(dir.path().join("courses.md")).unwrap();
    assert!(courses.starts_with("# Courses"));
    assert!(courses.contains("| CS1800 | Discrete Structures |"));
}

#[test]
fn empty_rosters_still_export_headers() {
    let store = RecordStore::in_memory();
    let dir = TempDir::new().unwrap();

    export_tables(&tables(&store), ReportFormat::Csv, dir.path()).unwrap();
    let students = fs::read_to_string(dir.path().join("students.csv")).unwrap();
    assert_eq!(students.lines().count(), 1);
    assert!(students.starts_with("ID,First Name,Last Name"));
}
