//! Roster reports
//!
//! Rosters are flattened into a [`Table`] of display strings, then rendered
//! by one of the [`formats`] (aligned text for the terminal, CSV, Markdown).

pub mod formats;

use crate::core::roster::{CourseRow, EnrollmentRow, StudentRow};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

pub use formats::{CsvReporter, MarkdownReporter, ReportFormat, TextReporter};

/// Column headers plus rows of already-formatted cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Short name, used as the export file stem (e.g. `students`)
    pub name: &'static str,
    /// Column headers
    pub headers: Vec<&'static str>,
    /// One entry per row, same length as `headers`
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Student roster table
    #[must_use]
    pub fn students(rows: &[StudentRow]) -> Self {
        Self {
            name: "students",
            headers: vec![
                "ID",
                "First Name",
                "Last Name",
                "Email",
                "Date of Birth",
                "Major",
                "Total Courses",
                "GWA",
            ],
            rows: rows
                .iter()
                .map(|r| {
                    vec![
                        r.student.id.to_string(),
                        r.student.first_name.clone(),
                        r.student.last_name.clone(),
                        r.student.email.clone(),
                        r.student.date_of_birth.clone(),
                        r.student.major.clone(),
                        r.total_courses.to_string(),
                        r.gwa.to_string(),
                    ]
                })
                .collect(),
        }
    }

    /// Course roster table
    #[must_use]
    pub fn courses(rows: &[CourseRow]) -> Self {
        Self {
            name: "courses",
            headers: vec![
                "Course ID",
                "Course Name",
                "Department",
                "Credits",
                "Instructor",
                "Enrolled Students",
                "Course Grade",
            ],
            rows: rows
                .iter()
                .map(|r| {
                    vec![
                        r.course.code.clone(),
                        r.course.name.clone(),
                        r.course.department.clone(),
                        r.course.credits.to_string(),
                        r.course.instructor.clone(),
                        r.enrolled_students.to_string(),
                        r.avg_course_grade.to_string(),
                    ]
                })
                .collect(),
        }
    }

    /// Enrollment roster table
    #[must_use]
    pub fn enrollments(rows: &[EnrollmentRow]) -> Self {
        Self {
            name: "enrollments",
            headers: vec![
                "Enrollment ID",
                "Student ID",
                "Course ID",
                "Semester",
                "Enrollment Date",
                "Grade",
                "Student Name",
                "Course Name",
            ],
            rows: rows
                .iter()
                .map(|r| {
                    vec![
                        r.id.to_string(),
                        r.student_id.to_string(),
                        r.course_code.clone(),
                        r.semester.clone(),
                        r.enrolled_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                        r.grade.clone().unwrap_or_default(),
                        r.student_name.clone(),
                        r.course_name.clone(),
                    ]
                })
                .collect(),
        }
    }

    /// True when the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Trait for roster renderers
pub trait ReportGenerator {
    /// Format produced by this generator
    fn format(&self) -> ReportFormat;

    /// Render a table as a string
    fn render(&self, table: &Table) -> String;

    /// Render a table to a file
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    fn generate(&self, table: &Table, output_path: &Path) -> Result<(), Box<dyn Error>> {
        fs::write(output_path, self.render(table))?;
        Ok(())
    }
}

/// Generator for a format
#[must_use]
pub fn generator_for(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Text => Box::new(TextReporter::new()),
        ReportFormat::Csv => Box::new(CsvReporter::new()),
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
    }
}

/// Write each table to `<dir>/<table name>.<ext>`, creating `dir` if needed
///
/// # Returns
/// Paths of the written files, in table order
///
/// # Errors
/// Returns an error if the directory cannot be created or a file cannot be written
pub fn export_tables(
    tables: &[Table],
    format: ReportFormat,
    dir: &Path,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    fs::create_dir_all(dir)?;
    let generator = generator_for(format);
    let mut written = Vec::with_capacity(tables.len());
    for table in tables {
        let path = dir.join(format!("{}.{}", table.name, format.extension()));
        generator.generate(table, &path)?;
        written.push(path);
    }
    Ok(written)
}
