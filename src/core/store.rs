//! Record store: validated CRUD over students, courses and enrollments
//!
//! The store turns typed request objects into backend statements, maps
//! "matched nothing" results to [`StoreError::NotFound`], and runs the
//! cascade deletes. Read queries live in [`crate::core::roster`].

use super::backend::{Backend, BackendKind, JsonFileBackend, MemoryBackend};
use super::database::{Database, Statement};
use super::error::{Result, StoreError};
use super::models::{
    Course, CoursePatch, Enrollment, EnrollmentId, EnrollmentPatch, NewCourse, NewEnrollment,
    NewStudent, Student, StudentId, StudentPatch,
};
use crate::config::DatabaseConfig;
use crate::{info, warn};
use chrono::Utc;

/// Outcome of deleting a student or course
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeSummary {
    /// Enrollments removed along with the parent record
    pub enrollments_removed: usize,
}

/// Owns a backend and exposes the record operations
pub struct RecordStore {
    backend: Box<dyn Backend>,
}

impl RecordStore {
    /// Wrap an already-open backend
    #[must_use]
    pub fn new(backend: Box<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Store over a fresh in-memory backend
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::new()))
    }

    /// Connect to the backend named in the configuration
    ///
    /// # Errors
    /// [`StoreError::Validation`] for an unknown backend name or missing file
    /// path, [`StoreError::Backend`] if the file backend cannot be opened.
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        let kind: BackendKind = config
            .backend
            .parse()
            .map_err(|e: String| StoreError::invalid("database backend", e))?;

        let backend: Box<dyn Backend> = match kind {
            BackendKind::Memory => Box::new(MemoryBackend::new()),
            BackendKind::File => {
                if config.path.trim().is_empty() {
                    return Err(StoreError::blank("database path"));
                }
                Box::new(JsonFileBackend::open(config.path.trim())?)
            }
        };
        info!("Record store connected ({} backend)", backend.name());
        Ok(Self::new(backend))
    }

    /// Name of the active backend
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Read view used by the roster queries
    #[must_use]
    pub fn database(&self) -> &Database {
        self.backend.database()
    }

    fn execute(&mut self, statement: Statement) -> Result<usize> {
        let label = statement.to_string();
        self.backend.execute(statement).inspect_err(|e| {
            warn!("{label} rejected ({}): {e}", e.kind());
        })
    }

    // --- Students ---

    /// Add a student
    ///
    /// # Errors
    /// Validation for blank names or email, Conflict for a used email,
    /// Backend on storage failure.
    pub fn create_student(&mut self, request: NewStudent) -> Result<Student> {
        request.validate()?;
        let student = request.into_student(Utc::now());
        self.execute(Statement::InsertStudent(student.clone()))?;
        info!("Added student {} <{}>", student.id, student.email);
        Ok(student)
    }

    /// Look up a student
    ///
    /// # Errors
    /// NotFound if no student has this id.
    pub fn student(&self, id: StudentId) -> Result<&Student> {
        self.database()
            .student(id)
            .ok_or_else(|| StoreError::not_found("Student", id))
    }

    /// Overwrite the supplied student fields
    ///
    /// # Errors
    /// Validation for blank supplied fields, NotFound for an unknown id,
    /// Conflict when the new email belongs to another student.
    pub fn update_student(&mut self, id: StudentId, patch: StudentPatch) -> Result<Student> {
        patch.validate()?;
        if self.execute(Statement::UpdateStudent(id, patch))? == 0 {
            return Err(StoreError::not_found("Student", id));
        }
        info!("Updated student {id}");
        self.student(id).cloned()
    }

    /// Delete a student and, first, every enrollment referencing it
    ///
    /// The two deletes are separate statements. If the second fails the
    /// enrollments stay deleted.
    ///
    /// # Errors
    /// NotFound for an unknown id, Backend on storage failure.
    pub fn delete_student(&mut self, id: StudentId) -> Result<CascadeSummary> {
        self.student(id)?;
        let enrollments_removed = self.execute(Statement::DeleteEnrollmentsOfStudent(id))?;
        if self.execute(Statement::DeleteStudent(id))? == 0 {
            return Err(StoreError::not_found("Student", id));
        }
        info!("Deleted student {id} and {enrollments_removed} enrollment(s)");
        Ok(CascadeSummary {
            enrollments_removed,
        })
    }

    /// All students in storage order; call again to restart
    pub fn students(&self) -> impl Iterator<Item = &Student> + '_ {
        self.database().students().iter()
    }

    // --- Courses ---

    /// Add a course
    ///
    /// # Errors
    /// Validation for blank fields or zero credits, Conflict for a used code,
    /// Backend on storage failure.
    pub fn create_course(&mut self, request: NewCourse) -> Result<Course> {
        request.validate()?;
        let course = request.into_course();
        self.execute(Statement::InsertCourse(course.clone()))?;
        info!("Added course {} ({})", course.code, course.name);
        Ok(course)
    }

    /// Look up a course by code
    ///
    /// # Errors
    /// NotFound if no course has this code.
    pub fn course(&self, code: &str) -> Result<&Course> {
        self.database()
            .course(code.trim())
            .ok_or_else(|| StoreError::not_found("Course", code.trim()))
    }

    /// Overwrite the supplied course fields
    ///
    /// # Errors
    /// Validation for blank supplied fields or zero credits, NotFound for an
    /// unknown code.
    pub fn update_course(&mut self, code: &str, patch: CoursePatch) -> Result<Course> {
        patch.validate()?;
        let code = code.trim();
        if self.execute(Statement::UpdateCourse(code.to_string(), patch))? == 0 {
            return Err(StoreError::not_found("Course", code));
        }
        info!("Updated course {code}");
        self.course(code).cloned()
    }

    /// Delete a course and, first, every enrollment referencing it
    ///
    /// # Errors
    /// NotFound for an unknown code, Backend on storage failure.
    pub fn delete_course(&mut self, code: &str) -> Result<CascadeSummary> {
        let code = code.trim();
        self.course(code)?;
        let enrollments_removed =
            self.execute(Statement::DeleteEnrollmentsOfCourse(code.to_string()))?;
        if self.execute(Statement::DeleteCourse(code.to_string()))? == 0 {
            return Err(StoreError::not_found("Course", code));
        }
        info!("Deleted course {code} and {enrollments_removed} enrollment(s)");
        Ok(CascadeSummary {
            enrollments_removed,
        })
    }

    /// All courses in storage order; call again to restart
    pub fn courses(&self) -> impl Iterator<Item = &Course> + '_ {
        self.database().courses().iter()
    }

    // --- Enrollments ---

    /// Enroll an existing student in an existing course
    ///
    /// # Errors
    /// Validation for a blank semester or course code, NotFound if the
    /// student or course does not exist, Backend on storage failure.
    pub fn create_enrollment(&mut self, request: NewEnrollment) -> Result<Enrollment> {
        request.validate()?;
        self.student(request.student_id)?;
        self.course(&request.course_code)?;

        let enrollment = request.into_enrollment(Utc::now());
        self.execute(Statement::InsertEnrollment(enrollment.clone()))?;
        info!(
            "Enrolled student {} in {} ({})",
            enrollment.student_id, enrollment.course_code, enrollment.semester
        );
        Ok(enrollment)
    }

    /// Look up an enrollment
    ///
    /// # Errors
    /// NotFound if no enrollment has this id.
    pub fn enrollment(&self, id: EnrollmentId) -> Result<&Enrollment> {
        self.database()
            .enrollment(id)
            .ok_or_else(|| StoreError::not_found("Enrollment", id))
    }

    /// Change the semester and/or grade of an enrollment
    ///
    /// # Errors
    /// Validation for a blank semester, NotFound for an unknown id.
    pub fn update_enrollment(
        &mut self,
        id: EnrollmentId,
        patch: EnrollmentPatch,
    ) -> Result<Enrollment> {
        patch.validate()?;
        if self.execute(Statement::UpdateEnrollment(id, patch))? == 0 {
            return Err(StoreError::not_found("Enrollment", id));
        }
        info!("Updated enrollment {id}");
        self.enrollment(id).cloned()
    }

    /// Delete one enrollment
    ///
    /// # Errors
    /// NotFound for an unknown id, Backend on storage failure.
    pub fn delete_enrollment(&mut self, id: EnrollmentId) -> Result<()> {
        if self.execute(Statement::DeleteEnrollment(id))? == 0 {
            return Err(StoreError::not_found("Enrollment", id));
        }
        info!("Deleted enrollment {id}");
        Ok(())
    }

    /// All enrollments in storage order; call again to restart
    pub fn enrollments(&self) -> impl Iterator<Item = &Enrollment> + '_ {
        self.database().enrollments().iter()
    }
}
