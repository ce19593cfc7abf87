use crate::{CourseId, UserId};

/// An operation the record store rejected.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// Course owner is not a registered instructor.
    #[error("user {0} is not a registered instructor")]
    InvalidOwner(UserId),

    #[error("email `{0}` is already registered")]
    DuplicateEmail(String),

    #[error("no student named `{0}`")]
    UnknownStudent(String),

    #[error("no teacher named `{0}`")]
    UnknownTeacher(String),

    #[error("no course named `{0}`")]
    UnknownCourse(String),

    #[error("no course with id {0}")]
    UnknownCourseId(CourseId),

    #[error("student {student} is not enrolled in course {course}")]
    NotEnrolled { student: UserId, course: CourseId },

    #[error("credit must be a non-negative number, got {0}")]
    InvalidCredit(f64),

    #[error("unknown attendance status `{0}`")]
    InvalidAttendance(String),
}
