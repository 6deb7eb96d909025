//! Student model

use crate::core::error::{require, Result, StoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// System-generated student identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(Uuid);

impl StudentId {
    /// Generate a fresh random identity
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for StudentId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| StoreError::invalid("student id", format!("is not a valid id: {e}")))
    }
}

/// A student record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Identity
    pub id: StudentId,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address, unique across students
    pub email: String,
    /// Date of birth as entered (free-form)
    #[serde(default)]
    pub date_of_birth: String,
    /// Declared major
    #[serde(default)]
    pub major: String,
    /// When the student record was created
    pub enrolled_at: DateTime<Utc>,
}

impl Student {
    /// "First Last"
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input for creating a student
#[derive(Debug, Clone, Default)]
pub struct NewStudent {
    /// First name (required)
    pub first_name: String,
    /// Last name (required)
    pub last_name: String,
    /// Email (required, unique)
    pub email: String,
    /// Date of birth (optional, free-form)
    pub date_of_birth: String,
    /// Major (optional)
    pub major: String,
}

impl NewStudent {
    /// Check required fields
    ///
    /// # Errors
    /// [`StoreError::Validation`] naming the first blank required field
    pub fn validate(&self) -> Result<()> {
        require("first name", &self.first_name)?;
        require("last name", &self.last_name)?;
        require("email", &self.email)
    }

    /// Build the stored record with a fresh identity
    #[must_use]
    pub fn into_student(self, enrolled_at: DateTime<Utc>) -> Student {
        Student {
            id: StudentId::generate(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            date_of_birth: self.date_of_birth.trim().to_string(),
            major: self.major.trim().to_string(),
            enrolled_at,
        }
    }
}

/// Partial update for a student; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    /// New first name
    pub first_name: Option<String>,
    /// New last name
    pub last_name: Option<String>,
    /// New email (must stay unique)
    pub email: Option<String>,
    /// New date of birth
    pub date_of_birth: Option<String>,
    /// New major
    pub major: Option<String>,
}

impl StudentPatch {
    /// Supplied required fields must not be blank
    ///
    /// # Errors
    /// [`StoreError::Validation`] naming the blank field
    pub fn validate(&self) -> Result<()> {
        if let Some(v) = &self.first_name {
            require("first name", v)?;
        }
        if let Some(v) = &self.last_name {
            require("last name", v)?;
        }
        if let Some(v) = &self.email {
            require("email", v)?;
        }
        Ok(())
    }

    /// Email this patch would set, trimmed
    #[must_use]
    pub fn new_email(&self) -> Option<&str> {
        self.email.as_deref().map(str::trim)
    }

    /// Overwrite the supplied fields on `student`
    pub fn apply_to(&self, student: &mut Student) {
        if let Some(v) = &self.first_name {
            student.first_name = v.trim().to_string();
        }
        if let Some(v) = &self.last_name {
            student.last_name = v.trim().to_string();
        }
        if let Some(v) = &self.email {
            student.email = v.trim().to_string();
        }
        if let Some(v) = &self.date_of_birth {
            student.date_of_birth = v.trim().to_string();
        }
        if let Some(v) = &self.major {
            student.major = v.trim().to_string();
        }
    }

    /// True when no field is supplied
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.date_of_birth.is_none()
            && self.major.is_none()
    }
}
