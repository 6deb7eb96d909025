//! Data models for `NuEnrollment`

pub mod course;
pub mod enrollment;
pub mod grade;
pub mod student;

pub use course::{Course, CoursePatch, NewCourse};
pub use enrollment::{Enrollment, EnrollmentId, EnrollmentPatch, NewEnrollment};
pub use grade::{Grade, GradeAverage};
pub use student::{NewStudent, Student, StudentId, StudentPatch};
