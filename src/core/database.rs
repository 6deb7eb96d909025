//! In-process document collections and the write statements applied to them
//!
//! A [`Database`] holds the three collections in storage order. All writes go
//! through [`Database::apply`], which checks unique indexes before touching
//! any data so a rejected statement leaves the collections unchanged.

use super::error::{Result, StoreError};
use super::models::{
    Course, CoursePatch, Enrollment, EnrollmentId, EnrollmentPatch, Student, StudentId,
    StudentPatch,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Unique index on student email
pub const STUDENT_EMAIL_INDEX: &str = "students.email";
/// Unique index on course code
pub const COURSE_CODE_INDEX: &str = "courses.code";
/// Unique index on enrollment id
pub const ENROLLMENT_ID_INDEX: &str = "enrollments.id";
/// Unique index on student id
pub const STUDENT_ID_INDEX: &str = "students.id";

/// The three collections, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    students: Vec<Student>,
    #[serde(default)]
    courses: Vec<Course>,
    #[serde(default)]
    enrollments: Vec<Enrollment>,
}

/// One write against the database
#[derive(Debug, Clone)]
pub enum Statement {
    /// Insert a student, enforcing unique id and email
    InsertStudent(Student),
    /// Insert a course, enforcing unique code
    InsertCourse(Course),
    /// Insert an enrollment, enforcing unique id
    InsertEnrollment(Enrollment),
    /// Update the student with this id
    UpdateStudent(StudentId, StudentPatch),
    /// Update the course with this code
    UpdateCourse(String, CoursePatch),
    /// Update the enrollment with this id
    UpdateEnrollment(EnrollmentId, EnrollmentPatch),
    /// Delete the student with this id
    DeleteStudent(StudentId),
    /// Delete the course with this code
    DeleteCourse(String),
    /// Delete the enrollment with this id
    DeleteEnrollment(EnrollmentId),
    /// Delete every enrollment referencing this student
    DeleteEnrollmentsOfStudent(StudentId),
    /// Delete every enrollment referencing this course code
    DeleteEnrollmentsOfCourse(String),
}

impl Statement {
    /// Collection the statement writes to
    #[must_use]
    pub const fn collection(&self) -> &'static str {
        match self {
            Self::InsertStudent(_) | Self::UpdateStudent(..) | Self::DeleteStudent(_) => {
                "students"
            }
            Self::InsertCourse(_) | Self::UpdateCourse(..) | Self::DeleteCourse(_) => "courses",
            Self::InsertEnrollment(_)
            | Self::UpdateEnrollment(..)
            | Self::DeleteEnrollment(_)
            | Self::DeleteEnrollmentsOfStudent(_)
            | Self::DeleteEnrollmentsOfCourse(_) => "enrollments",
        }
    }

    /// Kind of write
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::InsertStudent(_) | Self::InsertCourse(_) | Self::InsertEnrollment(_) => "insert",
            Self::UpdateStudent(..) | Self::UpdateCourse(..) | Self::UpdateEnrollment(..) => {
                "update"
            }
            Self::DeleteStudent(_) | Self::DeleteCourse(_) | Self::DeleteEnrollment(_) => {
                "delete"
            }
            Self::DeleteEnrollmentsOfStudent(_) | Self::DeleteEnrollmentsOfCourse(_) => {
                "delete_many"
            }
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.verb(), self.collection())
    }
}

impl Database {
    /// Empty database
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All students in storage order
    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// All courses in storage order
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// All enrollments in storage order
    #[must_use]
    pub fn enrollments(&self) -> &[Enrollment] {
        &self.enrollments
    }

    /// Student by id
    #[must_use]
    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// Course by code
    #[must_use]
    pub fn course(&self, code: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.code == code)
    }

    /// Enrollment by id
    #[must_use]
    pub fn enrollment(&self, id: EnrollmentId) -> Option<&Enrollment> {
        self.enrollments.iter().find(|e| e.id == id)
    }

    /// Verify the unique indexes over data that did not come through
    /// [`Database::apply`], such as a document read from disk.
    ///
    /// # Errors
    /// [`StoreError::Conflict`] naming the first duplicated value.
    pub fn check_indexes(&self) -> Result<()> {
        first_duplicate(self.students.iter().map(|s| s.id.to_string()))
            .map(|v| conflict(STUDENT_ID_INDEX, v))
            .or_else(|| {
                first_duplicate(self.students.iter().map(|s| s.email.clone()))
                    .map(|v| conflict(STUDENT_EMAIL_INDEX, v))
            })
            .or_else(|| {
                first_duplicate(self.courses.iter().map(|c| c.code.clone()))
                    .map(|v| conflict(COURSE_CODE_INDEX, v))
            })
            .or_else(|| {
                first_duplicate(self.enrollments.iter().map(|e| e.id.to_string()))
                    .map(|v| conflict(ENROLLMENT_ID_INDEX, v))
            })
            .map_or(Ok(()), Err)
    }

    /// Apply one statement and return the number of documents it matched.
    ///
    /// Inserts always match one document. Updates and deletes match zero when
    /// the filter finds nothing; that is not an error at this level.
    ///
    /// # Errors
    /// [`StoreError::Conflict`] when an insert or update would break a unique
    /// index. The database is unchanged in that case.
    pub fn apply(&mut self, statement: Statement) -> Result<usize> {
        match statement {
            Statement::InsertStudent(student) => {
                if self.student(student.id).is_some() {
                    return Err(conflict(STUDENT_ID_INDEX, student.id));
                }
                if self.students.iter().any(|s| s.email == student.email) {
                    return Err(conflict(STUDENT_EMAIL_INDEX, &student.email));
                }
                self.students.push(student);
                Ok(1)
            }
            Statement::InsertCourse(course) => {
                if self.course(&course.code).is_some() {
                    return Err(conflict(COURSE_CODE_INDEX, &course.code));
                }
                self.courses.push(course);
                Ok(1)
            }
            Statement::InsertEnrollment(enrollment) => {
                if self.enrollment(enrollment.id).is_some() {
                    return Err(conflict(ENROLLMENT_ID_INDEX, enrollment.id));
                }
                self.enrollments.push(enrollment);
                Ok(1)
            }
            Statement::UpdateStudent(id, patch) => {
                let Some(pos) = self.students.iter().position(|s| s.id == id) else {
                    return Ok(0);
                };
                if let Some(email) = patch.new_email() {
                    if self.students.iter().any(|s| s.id != id && s.email == email) {
                        return Err(conflict(STUDENT_EMAIL_INDEX, email));
                    }
                }
                patch.apply_to(&mut self.students[pos]);
                Ok(1)
            }
            Statement::UpdateCourse(code, patch) => Ok(self
                .courses
                .iter_mut()
                .find(|c| c.code == code)
                .map_or(0, |course| {
                    patch.apply_to(course);
                    1
                })),
            Statement::UpdateEnrollment(id, patch) => Ok(self
                .enrollments
                .iter_mut()
                .find(|e| e.id == id)
                .map_or(0, |enrollment| {
                    patch.apply_to(enrollment);
                    1
                })),
            Statement::DeleteStudent(id) => Ok(remove_where(&mut self.students, |s| s.id == id)),
            Statement::DeleteCourse(code) => {
                Ok(remove_where(&mut self.courses, |c| c.code == code))
            }
            Statement::DeleteEnrollment(id) => {
                Ok(remove_where(&mut self.enrollments, |e| e.id == id))
            }
            Statement::DeleteEnrollmentsOfStudent(id) => {
                Ok(remove_where(&mut self.enrollments, |e| e.student_id == id))
            }
            Statement::DeleteEnrollmentsOfCourse(code) => Ok(remove_where(
                &mut self.enrollments,
                |e| e.course_code == code,
            )),
        }
    }
}

fn conflict(index: &'static str, value: impl ToString) -> StoreError {
    StoreError::Conflict {
        index,
        value: value.to_string(),
    }
}

fn first_duplicate(values: impl Iterator<Item = String>) -> Option<String> {
    let mut seen = HashSet::new();
    values.into_iter().find(|v| !seen.insert(v.clone()))
}

/// Remove matching documents, keeping the order of the rest. Returns how many were removed.
fn remove_where<T>(docs: &mut Vec<T>, mut matches: impl FnMut(&T) -> bool) -> usize {
    let before = docs.len();
    docs.retain(|doc| !matches(doc));
    before - docs.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{NewCourse, NewEnrollment, NewStudent};
    use chrono::Utc;

    fn student(email: &str) -> Student {
        NewStudent {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: email.to_string(),
            ..NewStudent::default()
        }
        .into_student(Utc::now())
    }

    fn course(code: &str) -> Course {
        NewCourse {
            code: code.to_string(),
            name: "Compilers".to_string(),
            department: "CS".to_string(),
            credits: 4,
            instructor: String::new(),
        }
        .into_course()
    }

    fn enrollment(student_id: StudentId, code: &str) -> Enrollment {
        NewEnrollment {
            student_id,
            course_code: code.to_string(),
            semester: "Fall".to_string(),
        }
        .into_enrollment(Utc::now())
    }

    #[test]
    fn duplicate_email_is_rejected_without_change() {
        let mut db = Database::new();
        db.apply(Statement::InsertStudent(student("g@navy.mil"))).unwrap();
        let before = db.clone();

        let err = db
            .apply(Statement::InsertStudent(student("g@navy.mil")))
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { index: STUDENT_EMAIL_INDEX, .. }));
        assert_eq!(db, before);
    }

    #[test]
    fn duplicate_course_code_is_rejected() {
        let mut db = Database::new();
        db.apply(Statement::InsertCourse(course("CS4410"))).unwrap();
        assert!(db.apply(Statement::InsertCourse(course("CS4410"))).is_err());
        assert_eq!(db.courses().len(), 1);
    }

    #[test]
    fn update_to_taken_email_conflicts() {
        let mut db = Database::new();
        let first = student("a@x.edu");
        let second = student("b@x.edu");
        let second_id = second.id;
        db.apply(Statement::InsertStudent(first)).unwrap();
        db.apply(Statement::InsertStudent(second)).unwrap();

        let patch = StudentPatch {
            email: Some("a@x.edu".to_string()),
            ..StudentPatch::default()
        };
        assert!(db.apply(Statement::UpdateStudent(second_id, patch)).is_err());

        // Re-saving your own email is fine.
        let same = StudentPatch {
            email: Some("b@x.edu".to_string()),
            ..StudentPatch::default()
        };
        assert_eq!(db.apply(Statement::UpdateStudent(second_id, same)).unwrap(), 1);
    }

    #[test]
    fn update_unknown_student_matches_nothing_before_email_check() {
        let mut db = Database::new();
        db.apply(Statement::InsertStudent(student("taken@x.edu"))).unwrap();

        let patch = StudentPatch {
            email: Some("taken@x.edu".to_string()),
            ..StudentPatch::default()
        };
        let matched = db
            .apply(Statement::UpdateStudent(StudentId::generate(), patch))
            .unwrap();
        assert_eq!(matched, 0);
    }

    #[test]
    fn check_indexes_finds_duplicate_codes() {
        let mut db = Database::new();
        db.apply(Statement::InsertCourse(course("CS1"))).unwrap();
        assert!(db.check_indexes().is_ok());

        db.courses.push(course("CS1"));
        let err = db.check_indexes().unwrap_err();
        assert!(matches!(err, StoreError::Conflict { index: COURSE_CODE_INDEX, .. }));
    }

    #[test]
    fn update_missing_matches_nothing() {
        let mut db = Database::new();
        let matched = db
            .apply(Statement::UpdateCourse("NOPE".to_string(), CoursePatch::default()))
            .unwrap();
        assert_eq!(matched, 0);
    }

    #[test]
    fn delete_many_preserves_order_of_rest() {
        let mut db = Database::new();
        let a = student("a@x.edu");
        let b = student("b@x.edu");
        let (a_id, b_id) = (a.id, b.id);
        db.apply(Statement::InsertStudent(a)).unwrap();
        db.apply(Statement::InsertStudent(b)).unwrap();

        let e1 = enrollment(a_id, "CS1");
        let e2 = enrollment(b_id, "CS1");
        let e3 = enrollment(a_id, "CS2");
        let e2_id = e2.id;
        for e in [e1, e2, e3] {
            db.apply(Statement::InsertEnrollment(e)).unwrap();
        }

        let removed = db.apply(Statement::DeleteEnrollmentsOfStudent(a_id)).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(db.enrollments().len(), 1);
        assert_eq!(db.enrollments()[0].id, e2_id);
    }

    #[test]
    fn statement_display() {
        let stmt = Statement::DeleteEnrollmentsOfCourse("CS1".to_string());
        assert_eq!(stmt.to_string(), "delete_many enrollments");
    }
}
