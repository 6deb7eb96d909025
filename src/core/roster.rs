//! Roster queries: records joined with enrollments and derived statistics
//!
//! Results are returned in storage order.

use super::database::Database;
use super::models::{
    Course, Enrollment, EnrollmentId, Grade, GradeAverage, Student, StudentId,
};
use crate::debug;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// A student with course load and grade-weighted average
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRow {
    /// The student record
    #[serde(flatten)]
    pub student: Student,
    /// Number of enrollments referencing the student
    pub total_courses: usize,
    /// Mean grade score over gradeable enrollments
    pub gwa: GradeAverage,
}

/// A course with head count and average grade
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseRow {
    /// The course record
    #[serde(flatten)]
    pub course: Course,
    /// Number of enrollments referencing the course
    pub enrolled_students: usize,
    /// Mean grade score over gradeable enrollments
    pub avg_course_grade: GradeAverage,
}

/// An enrollment with the student's and course's names copied in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrollmentRow {
    /// Enrollment identity
    pub id: EnrollmentId,
    /// Enrolled student
    pub student_id: StudentId,
    /// Course code
    pub course_code: String,
    /// Semester label
    pub semester: String,
    /// When the enrollment was created
    pub enrolled_at: DateTime<Utc>,
    /// Grade label, if graded
    pub grade: Option<String>,
    /// "First Last" of the student
    pub student_name: String,
    /// Name of the course
    pub course_name: String,
}

/// Count and mapped grades of the enrollments sharing one key
#[derive(Default)]
struct Bucket {
    count: usize,
    grades: Vec<Grade>,
}

impl Bucket {
    fn push(&mut self, enrollment: &Enrollment) {
        self.count += 1;
        self.grades.extend(enrollment.letter_grade());
    }

    fn average(&self) -> GradeAverage {
        GradeAverage::from_grades(self.grades.iter().copied())
    }
}

/// Every student with `total_courses` and `gwa`
#[must_use]
pub fn student_roster(db: &Database) -> Vec<StudentRow> {
    let mut buckets: HashMap<StudentId, Bucket> = HashMap::new();
    for enrollment in db.enrollments() {
        buckets.entry(enrollment.student_id).or_default().push(enrollment);
    }

    db.students()
        .iter()
        .map(|student| {
            let (total_courses, gwa) = buckets
                .get(&student.id)
                .map_or((0, GradeAverage::NotApplicable), |b| (b.count, b.average()));
            StudentRow {
                student: student.clone(),
                total_courses,
                gwa,
            }
        })
        .collect()
}

/// Every course with `enrolled_students` and `avg_course_grade`
#[must_use]
pub fn course_roster(db: &Database) -> Vec<CourseRow> {
    let mut buckets: HashMap<&str, Bucket> = HashMap::new();
    for enrollment in db.enrollments() {
        buckets
            .entry(enrollment.course_code.as_str())
            .or_default()
            .push(enrollment);
    }

    db.courses()
        .iter()
        .map(|course| {
            let (enrolled_students, avg_course_grade) = buckets
                .get(course.code.as_str())
                .map_or((0, GradeAverage::NotApplicable), |b| (b.count, b.average()));
            CourseRow {
                course: course.clone(),
                enrolled_students,
                avg_course_grade,
            }
        })
        .collect()
}

/// Every enrollment whose student and course both exist, denormalized.
/// Enrollments with a dangling reference are left out.
#[must_use]
pub fn enrollment_roster(db: &Database) -> Vec<EnrollmentRow> {
    let students: HashMap<StudentId, &Student> =
        db.students().iter().map(|s| (s.id, s)).collect();
    let courses: HashMap<&str, &Course> =
        db.courses().iter().map(|c| (c.code.as_str(), c)).collect();

    db.enrollments()
        .iter()
        .filter_map(|enrollment| {
            let student = students.get(&enrollment.student_id);
            let course = courses.get(enrollment.course_code.as_str());
            let (Some(student), Some(course)) = (student, course) else {
                debug!(
                    "Enrollment {} skipped: dangling reference (student {}, course {})",
                    enrollment.id, enrollment.student_id, enrollment.course_code
                );
                return None;
            };
            Some(EnrollmentRow {
                id: enrollment.id,
                student_id: enrollment.student_id,
                course_code: enrollment.course_code.clone(),
                semester: enrollment.semester.clone(),
                enrolled_at: enrollment.enrolled_at,
                grade: enrollment.grade.clone(),
                student_name: student.full_name(),
                course_name: course.name.clone(),
            })
        })
        .collect()
}
