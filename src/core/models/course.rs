//! Course model

use crate::core::error::{require, Result, StoreError};
use serde::{Deserialize, Serialize};

/// A course offered for enrollment, identified by its code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course code (e.g., "CS2510"), unique across courses
    pub code: String,

    /// Course name (e.g., "Fundamentals of Computer Science 2")
    pub name: String,

    /// Offering department (e.g., "Computer Science")
    pub department: String,

    /// Credit count, always positive
    pub credits: u32,

    /// Instructor of record
    #[serde(default)]
    pub instructor: String,
}

/// Input for creating a course
#[derive(Debug, Clone, Default)]
pub struct NewCourse {
    /// Course code (required, unique)
    pub code: String,
    /// Course name (required)
    pub name: String,
    /// Department (required)
    pub department: String,
    /// Credits (required, positive)
    pub credits: u32,
    /// Instructor (optional)
    pub instructor: String,
}

fn require_credits(credits: u32) -> Result<()> {
    if credits == 0 {
        Err(StoreError::invalid("credits", "must be a positive integer"))
    } else {
        Ok(())
    }
}

impl NewCourse {
    /// Check required fields
    ///
    /// # Errors
    /// [`StoreError::Validation`] for a blank code, name or department, or zero credits
    pub fn validate(&self) -> Result<()> {
        require("course code", &self.code)?;
        require("course name", &self.name)?;
        require("department", &self.department)?;
        require_credits(self.credits)
    }

    /// Build the stored record
    #[must_use]
    pub fn into_course(self) -> Course {
        Course {
            code: self.code.trim().to_string(),
            name: self.name.trim().to_string(),
            department: self.department.trim().to_string(),
            credits: self.credits,
            instructor: self.instructor.trim().to_string(),
        }
    }
}

/// Partial update for a course. The code is the identity and never changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoursePatch {
    /// New name
    pub name: Option<String>,
    /// New department
    pub department: Option<String>,
    /// New credit count
    pub credits: Option<u32>,
    /// New instructor
    pub instructor: Option<String>,
}

impl CoursePatch {
    /// Supplied required fields must not be blank, credits must be positive
    ///
    /// # Errors
    /// [`StoreError::Validation`] naming the offending field
    pub fn validate(&self) -> Result<()> {
        if let Some(v) = &self.name {
            require("course name", v)?;
        }
        if let Some(v) = &self.department {
            require("department", v)?;
        }
        if let Some(c) = self.credits {
            require_credits(c)?;
        }
        Ok(())
    }

    /// Overwrite the supplied fields on `course`
    pub fn apply_to(&self, course: &mut Course) {
        if let Some(v) = &self.name {
            course.name = v.trim().to_string();
        }
        if let Some(v) = &self.department {
            course.department = v.trim().to_string();
        }
        if let Some(c) = self.credits {
            course.credits = c;
        }
        if let Some(v) = &self.instructor {
            course.instructor = v.trim().to_string();
        }
    }

    /// True when no field is supplied
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.department.is_none()
            && self.credits.is_none()
            && self.instructor.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fundies() -> NewCourse {
        NewCourse {
            code: "CS2510".to_string(),
            name: "Fundamentals of Computer Science 2".to_string(),
            department: "Computer Science".to_string(),
            credits: 4,
            instructor: String::new(),
        }
    }

    #[test]
    fn test_course_creation() {
        let course = fundies().into_course();

        assert_eq!(course.code, "CS2510");
        assert_eq!(course.department, "Computer Science");
        assert_eq!(course.credits, 4);
        assert!(course.instructor.is_empty());
    }

    #[test]
    fn test_zero_credits_rejected() {
        let course = NewCourse {
            credits: 0,
            ..fundies()
        };
        let err = course.validate().unwrap_err();
        assert!(matches!(err, StoreError::Validation { field: "credits", .. }));
    }

    #[test]
    fn test_blank_code_rejected() {
        let course = NewCourse {
            code: " ".to_string(),
            ..fundies()
        };
        assert!(course.validate().is_err());
    }

    #[test]
    fn test_patch_keeps_code() {
        let mut course = fundies().into_course();
        let patch = CoursePatch {
            credits: Some(3),
            instructor: Some("Prof. Hopper".to_string()),
            ..CoursePatch::default()
        };
        assert!(patch.validate().is_ok());
        patch.apply_to(&mut course);

        assert_eq!(course.code, "CS2510");
        assert_eq!(course.credits, 3);
        assert_eq!(course.instructor, "Prof. Hopper");
        assert_eq!(course.name, "Fundamentals of Computer Science 2");
    }

    #[test]
    fn test_patch_rejects_zero_credits() {
        let patch = CoursePatch {
            credits: Some(0),
            ..CoursePatch::default()
        };
        assert!(patch.validate().is_err());
    }
}
