//! CLI argument definitions for `NuEnrollment`

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use nu_enrollment::config::ConfigOverrides;
use nu_enrollment::core::models::{
    CoursePatch, EnrollmentId, NewCourse, NewStudent, StudentId, StudentPatch,
};
use nu_enrollment::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `backend`, `db_path`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

/// Student fields shared by `add` and `update`
#[derive(Debug, Args, Default)]
pub struct StudentFields {
    /// First name
    #[arg(long)]
    pub first_name: Option<String>,
    /// Last name
    #[arg(long)]
    pub last_name: Option<String>,
    /// Email address (unique)
    #[arg(long)]
    pub email: Option<String>,
    /// Date of birth
    #[arg(long = "dob", value_name = "DATE")]
    pub date_of_birth: Option<String>,
    /// Declared major
    #[arg(long)]
    pub major: Option<String>,
}

impl StudentFields {
    /// Request for a new student; missing fields are left blank for validation to catch
    pub fn into_new(self) -> NewStudent {
        NewStudent {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            date_of_birth: self.date_of_birth.unwrap_or_default(),
            major: self.major.unwrap_or_default(),
        }
    }

    /// Patch holding only the supplied fields
    pub fn into_patch(self) -> StudentPatch {
        StudentPatch {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            date_of_birth: self.date_of_birth,
            major: self.major,
        }
    }
}

/// Course fields shared by `add` and `update`
#[derive(Debug, Args, Default)]
pub struct CourseFields {
    /// Course name
    #[arg(long)]
    pub name: Option<String>,
    /// Offering department
    #[arg(long)]
    pub department: Option<String>,
    /// Credit count (positive)
    #[arg(long)]
    pub credits: Option<u32>,
    /// Instructor of record
    #[arg(long)]
    pub instructor: Option<String>,
}

impl CourseFields {
    /// Request for a new course with the given code
    pub fn into_new(self, code: String) -> NewCourse {
        NewCourse {
            code,
            name: self.name.unwrap_or_default(),
            department: self.department.unwrap_or_default(),
            credits: self.credits.unwrap_or_default(),
            instructor: self.instructor.unwrap_or_default(),
        }
    }

    /// Patch holding only the supplied fields
    pub fn into_patch(self) -> CoursePatch {
        CoursePatch {
            name: self.name,
            department: self.department,
            credits: self.credits,
            instructor: self.instructor,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum StudentSubcommand {
    /// Add a student
    Add {
        #[command(flatten)]
        fields: StudentFields,
    },
    /// Update the supplied fields of a student
    Update {
        /// Student ID
        #[arg(value_name = "ID")]
        id: StudentId,
        #[command(flatten)]
        fields: StudentFields,
    },
    /// Delete a student and all of their enrollments
    Delete {
        /// Student ID
        #[arg(value_name = "ID")]
        id: StudentId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List students with course count and GWA
    List,
}

#[derive(Debug, Subcommand)]
pub enum CourseSubcommand {
    /// Add a course
    Add {
        /// Course code (unique)
        #[arg(value_name = "CODE")]
        code: String,
        #[command(flatten)]
        fields: CourseFields,
    },
    /// Update the supplied fields of a course
    Update {
        /// Course code
        #[arg(value_name = "CODE")]
        code: String,
        #[command(flatten)]
        fields: CourseFields,
    },
    /// Delete a course and all of its enrollments
    Delete {
        /// Course code
        #[arg(value_name = "CODE")]
        code: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List courses with head count and average grade
    List,
}

#[derive(Debug, Subcommand)]
pub enum EnrollmentSubcommand {
    /// Enroll a student in a course
    Add {
        /// Student ID
        #[arg(long = "student", value_name = "ID")]
        student_id: StudentId,
        /// Course code
        #[arg(long = "course", value_name = "CODE")]
        course_code: String,
        /// Semester label (e.g., "Fall 2024")
        #[arg(long)]
        semester: String,
    },
    /// Change the semester or grade of an enrollment
    Update {
        /// Enrollment ID
        #[arg(value_name = "ID")]
        id: EnrollmentId,
        /// New semester label
        #[arg(long)]
        semester: Option<String>,
        /// New grade (A, B, C, D, F or any other label; empty clears it)
        #[arg(long)]
        grade: Option<String>,
    },
    /// Delete an enrollment
    Delete {
        /// Enrollment ID
        #[arg(value_name = "ID")]
        id: EnrollmentId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List enrollments with student and course names
    List,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Manage students.
    Student {
        #[command(subcommand)]
        subcommand: StudentSubcommand,
    },
    /// Manage courses.
    Course {
        #[command(subcommand)]
        subcommand: CourseSubcommand,
    },
    /// Manage enrollments.
    Enrollment {
        #[command(subcommand)]
        subcommand: EnrollmentSubcommand,
    },
    /// Export the student, course and enrollment rosters.
    ///
    /// Writes `students`, `courses` and `enrollments` files to the output
    /// directory (defaults to config `exports_dir`).
    Export {
        /// Export format: csv, markdown (md) or text (txt)
        #[arg(short, long, value_name = "FORMAT", default_value = "csv")]
        format: String,

        /// Output directory (optional; defaults to config `exports_dir`)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "nuenrollment",
    about = "NuEnrollment student and course records",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override the storage backend for this run (file|memory)
    #[arg(long = "db-backend", value_name = "BACKEND")]
    pub db_backend: Option<String>,

    /// Override the database file path for this run
    #[arg(long = "db-path", value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Override the exports directory for this run
    #[arg(long = "exports-dir", value_name = "DIR")]
    pub exports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.log_level.map(|lvl| lvl.to_string()),
            file: self
                .log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.verbose.then_some(true),
            db_backend: self.db_backend.clone(),
            db_path: self
                .db_path
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            exports_dir: self
                .exports_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("nuenrollment").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = cli(&["student", "list"]).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.db_backend.is_none());
        assert!(overrides.db_path.is_none());
        assert!(overrides.exports_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let overrides = cli(&[
            "--log-level",
            "debug",
            "--db-backend",
            "memory",
            "--db-path",
            "/tmp/db.json",
            "--exports-dir",
            "/output",
            "course",
            "list",
        ])
        .to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.db_backend, Some("memory".to_string()));
        assert_eq!(overrides.db_path, Some("/tmp/db.json".to_string()));
        assert_eq!(overrides.exports_dir, Some("/output".to_string()));
    }

    #[test]
    fn test_student_add_builds_request() {
        let args = cli(&[
            "student",
            "add",
            "--first-name",
            "Ada",
            "--last-name",
            "Lovelace",
            "--email",
            "ada@example.edu",
        ]);
        let Command::Student {
            subcommand: StudentSubcommand::Add { fields },
        } = args.command
        else {
            panic!("expected student add");
        };
        let request = fields.into_new();
        assert_eq!(request.first_name, "Ada");
        assert_eq!(request.email, "ada@example.edu");
        assert!(request.major.is_empty());
    }

    #[test]
    fn test_update_patch_only_holds_supplied_fields() {
        let args = cli(&["course", "update", "CS2500", "--credits", "4"]);
        let Command::Course {
            subcommand: CourseSubcommand::Update { code, fields },
        } = args.command
        else {
            panic!("expected course update");
        };
        assert_eq!(code, "CS2500");
        let patch = fields.into_patch();
        assert_eq!(patch.credits, Some(4));
        assert!(patch.name.is_none());
    }

    #[test]
    fn test_invalid_student_id_is_rejected() {
        let result = Cli::try_parse_from(["nuenrollment", "student", "delete", "not-a-uuid"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_enrollment_update_patch() {
        let id = EnrollmentId::generate().to_string();
        let args = cli(&["enrollment", "update", &id, "--grade", "b"]);
        let Command::Enrollment {
            subcommand: EnrollmentSubcommand::Update { semester, grade, .. },
        } = args.command
        else {
            panic!("expected enrollment update");
        };
        assert_eq!(grade.as_deref(), Some("b"));
        assert!(semester.is_none());
    }
}
