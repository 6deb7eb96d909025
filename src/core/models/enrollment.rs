//! Enrollment model

use super::{Grade, StudentId};
use crate::core::error::{require, Result, StoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// System-generated enrollment identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnrollmentId(Uuid);

impl EnrollmentId {
    /// Generate a fresh random identity
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for EnrollmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EnrollmentId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| StoreError::invalid("enrollment id", format!("is not a valid id: {e}")))
    }
}

/// A student taking a course in a given semester
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Identity
    pub id: EnrollmentId,
    /// Enrolled student
    pub student_id: StudentId,
    /// Code of the course taken
    pub course_code: String,
    /// Semester label (e.g., "Fall 2024")
    pub semester: String,
    /// When the enrollment was created
    pub enrolled_at: DateTime<Utc>,
    /// Grade label, absent until graded. Labels outside `A`-`D`/`F`
    /// (e.g., "Incomplete") are kept but never averaged.
    #[serde(default)]
    pub grade: Option<String>,
}

impl Enrollment {
    /// The grade as a mapped letter, if it is one
    #[must_use]
    pub fn letter_grade(&self) -> Option<Grade> {
        self.grade.as_deref().and_then(Grade::from_label)
    }
}

/// Input for enrolling an existing student in an existing course
#[derive(Debug, Clone)]
pub struct NewEnrollment {
    /// Student to enroll
    pub student_id: StudentId,
    /// Course code to enroll in
    pub course_code: String,
    /// Semester label (required)
    pub semester: String,
}

impl NewEnrollment {
    /// Check required fields
    ///
    /// # Errors
    /// [`StoreError::Validation`] for a blank course code or semester
    pub fn validate(&self) -> Result<()> {
        require("course code", &self.course_code)?;
        require("semester", &self.semester)
    }

    /// Build the stored record with a fresh identity and no grade
    #[must_use]
    pub fn into_enrollment(self, enrolled_at: DateTime<Utc>) -> Enrollment {
        Enrollment {
            id: EnrollmentId::generate(),
            student_id: self.student_id,
            course_code: self.course_code.trim().to_string(),
            semester: self.semester.trim().to_string(),
            enrolled_at,
            grade: None,
        }
    }
}

/// Partial update for an enrollment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrollmentPatch {
    /// New semester label
    pub semester: Option<String>,
    /// New grade label; a blank string clears the grade
    pub grade: Option<String>,
}

impl EnrollmentPatch {
    /// A supplied semester must not be blank
    ///
    /// # Errors
    /// [`StoreError::Validation`] for a blank semester
    pub fn validate(&self) -> Result<()> {
        if let Some(v) = &self.semester {
            require("semester", v)?;
        }
        Ok(())
    }

    /// Overwrite the supplied fields on `enrollment`
    pub fn apply_to(&self, enrollment: &mut Enrollment) {
        if let Some(v) = &self.semester {
            enrollment.semester = v.trim().to_string();
        }
        if let Some(g) = &self.grade {
            enrollment.grade = Grade::normalize_label(g);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enrollment() -> Enrollment {
        NewEnrollment {
            student_id: StudentId::generate(),
            course_code: "CS2510".to_string(),
            semester: "Fall 2024".to_string(),
        }
        .into_enrollment(Utc::now())
    }

    #[test]
    fn test_new_enrollment_starts_ungraded() {
        let e = enrollment();
        assert!(e.grade.is_none());
        assert!(e.letter_grade().is_none());
    }

    #[test]
    fn test_blank_semester_rejected() {
        let new = NewEnrollment {
            student_id: StudentId::generate(),
            course_code: "CS2510".to_string(),
            semester: "\t".to_string(),
        };
        assert!(new.validate().is_err());
    }

    #[test]
    fn test_grade_set_and_cleared() {
        let mut e = enrollment();
        EnrollmentPatch {
            grade: Some("b".to_string()),
            ..EnrollmentPatch::default()
        }
        .apply_to(&mut e);
        assert_eq!(e.grade.as_deref(), Some("B"));
        assert_eq!(e.letter_grade(), Some(Grade::B));

        EnrollmentPatch {
            grade: Some(String::new()),
            ..EnrollmentPatch::default()
        }
        .apply_to(&mut e);
        assert!(e.grade.is_none());
    }

    #[test]
    fn test_incomplete_is_kept_but_unmapped() {
        let mut e = enrollment();
        EnrollmentPatch {
            semester: Some("Spring 2025".to_string()),
            grade: Some("Incomplete".to_string()),
        }
        .apply_to(&mut e);
        assert_eq!(e.semester, "Spring 2025");
        assert_eq!(e.grade.as_deref(), Some("Incomplete"));
        assert!(e.letter_grade().is_none());
    }
}
