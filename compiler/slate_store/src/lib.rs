//! Slate Store - the record store scripts run against.
//!
//! The interpreter only needs two capabilities from its store, captured by
//! [`RecordStore`]:
//!
//! - [`RecordStore::compute_gpa`]: weighted GPA for a student identifier
//! - [`RecordStore::create_course`]: open a course owned by an instructor
//!
//! [`InMemoryStore`] is the bundled implementation. Besides the two
//! capabilities it carries the school bookkeeping used to seed sessions:
//! registration and login, course listing, enrollment, scores and
//! attendance.

use std::fmt;
use std::sync::Arc;

mod error;
mod gpa;
mod memory;

pub use error::StoreError;
pub use gpa::{grade_points, weighted_gpa, GradedCourse};
pub use memory::{AttendanceStatus, CourseListing, InMemoryStore};

/// Role of the person running a script.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Student,
    Teacher,
}

impl Role {
    #[inline]
    pub fn is_student(self) -> bool {
        matches!(self, Role::Student)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => f.write_str("student"),
            Role::Teacher => f.write_str("teacher"),
        }
    }
}

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(raw: u32) -> Self {
                $name(raw)
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Identifier of a student or teacher. Unique within its role.
    UserId
);
record_id!(
    /// Identifier of a course.
    CourseId
);
record_id!(
    /// Identifier of one student's enrollment in one course.
    EnrollmentId
);

/// Capabilities the interpreter requires from a record store.
///
/// Implementations serialize conflicting writes themselves; callers never
/// coordinate across sessions.
pub trait RecordStore {
    /// Weighted GPA for the student named by `student`.
    ///
    /// A student with no qualifying scores has a GPA of exactly `0.0`;
    /// that is not an error.
    fn compute_gpa(&self, student: &str) -> Result<f64, StoreError>;

    /// Create a course owned by the instructor `owner`.
    ///
    /// Fails with [`StoreError::InvalidOwner`] when `owner` is not an
    /// instructor.
    fn create_course(&self, name: &str, owner: UserId, credit: f64) -> Result<CourseId, StoreError>;
}

/// Store handle shared between a session and its builtins.
pub type SharedStore = Arc<dyn RecordStore + Send + Sync>;
