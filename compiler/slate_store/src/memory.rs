//! In-memory record store.
//!
//! Tables mirror the school schema: students, teachers, courses,
//! enrollments and attendance. IDs start at 1 and are never reused.
//! All tables sit behind one lock so every write is serialized.

use std::fmt;
use std::str::FromStr;

use parking_lot::Mutex;
use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::gpa::{weighted_gpa, GradedCourse};
use crate::{CourseId, EnrollmentId, RecordStore, Role, StoreError, UserId};

/// Attendance outcome for one enrollment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttendanceStatus {
    Normal,
    Absent,
    LateOrEarly,
}

impl AttendanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Normal => "normal",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::LateOrEarly => "late_or_early",
        }
    }
}

impl FromStr for AttendanceStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(AttendanceStatus::Normal),
            "absent" => Ok(AttendanceStatus::Absent),
            "late_or_early" => Ok(AttendanceStatus::LateOrEarly),
            other => Err(StoreError::InvalidAttendance(other.to_string())),
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of [`InMemoryStore::list_courses`].
#[derive(Clone, Debug, PartialEq)]
pub struct CourseListing {
    pub id: CourseId,
    pub name: String,
    /// Owning teacher's name, `None` if the owner no longer resolves.
    pub teacher: Option<String>,
    pub credit: f64,
}

#[derive(Clone, Debug)]
struct Person {
    name: String,
    password: String,
}

#[derive(Clone, Debug)]
struct Course {
    name: String,
    teacher: UserId,
    credit: f64,
}

#[derive(Clone, Debug)]
struct Enrollment {
    student: UserId,
    course: CourseId,
    score: Option<f64>,
    attendance: Option<AttendanceStatus>,
}

#[derive(Default)]
struct Tables {
    students: Vec<Person>,
    teachers: Vec<Person>,
    emails: FxHashSet<String>,
    courses: Vec<Course>,
    enrollments: Vec<Enrollment>,
}

/// Convert a 1-based ID into a table index.
#[inline]
fn slot(raw: u32) -> Option<usize> {
    usize::try_from(raw).ok()?.checked_sub(1)
}

/// Next 1-based ID for a table of `len` rows.
#[inline]
fn next_id(len: usize) -> u32 {
    u32::try_from(len).map_or(u32::MAX, |n| n.saturating_add(1))
}

impl Tables {
    fn student(&self, id: UserId) -> Option<&Person> {
        self.students.get(slot(id.raw())?)
    }

    fn teacher(&self, id: UserId) -> Option<&Person> {
        self.teachers.get(slot(id.raw())?)
    }

    fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.get(slot(id.raw())?)
    }

    fn student_named(&self, name: &str) -> Option<UserId> {
        position_by_name(&self.students, name).map(UserId::new)
    }

    fn teacher_named(&self, name: &str) -> Option<UserId> {
        position_by_name(&self.teachers, name).map(UserId::new)
    }

    /// Resolve a GPA identifier: a numeric student ID, else a student name.
    fn resolve_student(&self, ident: &str) -> Option<UserId> {
        if let Ok(raw) = ident.parse::<u32>() {
            let id = UserId::new(raw);
            if self.student(id).is_some() {
                return Some(id);
            }
        }
        self.student_named(ident)
    }

    fn enrollment_mut(&mut self, student: UserId, course: CourseId) -> Option<&mut Enrollment> {
        self.enrollments
            .iter_mut()
            .find(|e| e.student == student && e.course == course)
    }

    fn register(
        &mut self,
        role: Role,
        name: &str,
        password: &str,
        email: &str,
    ) -> Result<UserId, StoreError> {
        if !self.emails.insert(email.to_string()) {
            return Err(StoreError::DuplicateEmail(email.to_string()));
        }
        let table = match role {
            Role::Student => &mut self.students,
            Role::Teacher => &mut self.teachers,
        };
        let id = UserId::new(next_id(table.len()));
        table.push(Person {
            name: name.to_string(),
            password: password.to_string(),
        });
        Ok(id)
    }
}

fn position_by_name(people: &[Person], name: &str) -> Option<u32> {
    people
        .iter()
        .position(|p| p.name == name)
        .map(next_id)
}

/// Thread-safe in-memory implementation of [`RecordStore`].
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user in the table for `role`. Emails are unique across
    /// students and teachers; ids are per table.
    pub fn register(
        &self,
        role: Role,
        name: &str,
        password: &str,
        email: &str,
    ) -> Result<UserId, StoreError> {
        let id = self.tables.lock().register(role, name, password, email)?;
        info!(%id, %role, name, "registered user");
        Ok(id)
    }

    pub fn register_student(
        &self,
        name: &str,
        password: &str,
        email: &str,
    ) -> Result<UserId, StoreError> {
        self.register(Role::Student, name, password, email)
    }

    pub fn register_teacher(
        &self,
        name: &str,
        password: &str,
        email: &str,
    ) -> Result<UserId, StoreError> {
        self.register(Role::Teacher, name, password, email)
    }

    /// Check a student's credentials.
    pub fn login_student(&self, name: &str, password: &str) -> bool {
        let tables = self.tables.lock();
        tables
            .students
            .iter()
            .any(|p| p.name == name && p.password == password)
    }

    /// Check a teacher's credentials.
    pub fn login_teacher(&self, name: &str, password: &str) -> bool {
        let tables = self.tables.lock();
        tables
            .teachers
            .iter()
            .any(|p| p.name == name && p.password == password)
    }

    /// Every course with its teacher's name and credit, in creation order.
    pub fn list_courses(&self) -> Vec<CourseListing> {
        let tables = self.tables.lock();
        tables
            .courses
            .iter()
            .enumerate()
            .map(|(index, course)| CourseListing {
                id: CourseId::new(next_id(index)),
                name: course.name.clone(),
                teacher: tables.teacher(course.teacher).map(|t| t.name.clone()),
                credit: course.credit,
            })
            .collect()
    }

    /// Enroll a student in the first course called `course_name`.
    pub fn enroll_by_name(
        &self,
        student: UserId,
        course_name: &str,
    ) -> Result<EnrollmentId, StoreError> {
        let mut tables = self.tables.lock();
        if tables.student(student).is_none() {
            return Err(StoreError::UnknownStudent(student.to_string()));
        }
        let course = tables
            .courses
            .iter()
            .position(|c| c.name == course_name)
            .map(|index| CourseId::new(next_id(index)))
            .ok_or_else(|| StoreError::UnknownCourse(course_name.to_string()))?;

        let id = EnrollmentId::new(next_id(tables.enrollments.len()));
        tables.enrollments.push(Enrollment {
            student,
            course,
            score: None,
            attendance: None,
        });
        info!(%id, %student, %course, "enrolled");
        Ok(id)
    }

    /// Set a student's score in the course `course_name` taught by
    /// `teacher_name`.
    pub fn set_score(
        &self,
        course_name: &str,
        teacher_name: &str,
        student_name: &str,
        score: f64,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.lock();
        let teacher = tables
            .teacher_named(teacher_name)
            .ok_or_else(|| StoreError::UnknownTeacher(teacher_name.to_string()))?;
        let student = tables
            .student_named(student_name)
            .ok_or_else(|| StoreError::UnknownStudent(student_name.to_string()))?;
        let course = tables
            .courses
            .iter()
            .position(|c| c.name == course_name && c.teacher == teacher)
            .map(|index| CourseId::new(next_id(index)))
            .ok_or_else(|| StoreError::UnknownCourse(course_name.to_string()))?;

        let enrollment = tables
            .enrollment_mut(student, course)
            .ok_or(StoreError::NotEnrolled { student, course })?;
        enrollment.score = Some(score);
        info!(%student, %course, score, "score recorded");
        Ok(())
    }

    /// Record attendance for `student_name` in `course`. A later record for
    /// the same enrollment replaces the earlier status.
    pub fn record_attendance(
        &self,
        student_name: &str,
        course: CourseId,
        status: AttendanceStatus,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.lock();
        if tables.course(course).is_none() {
            return Err(StoreError::UnknownCourseId(course));
        }
        let student = tables
            .student_named(student_name)
            .ok_or_else(|| StoreError::UnknownStudent(student_name.to_string()))?;
        let enrollment = tables
            .enrollment_mut(student, course)
            .ok_or(StoreError::NotEnrolled { student, course })?;
        if let Some(previous) = enrollment.attendance.replace(status) {
            debug!(%student, %course, %previous, "attendance overwritten");
        }
        info!(%student, %course, %status, "attendance recorded");
        Ok(())
    }

    /// Current attendance status for a student in a course, if any.
    pub fn attendance(&self, student: UserId, course: CourseId) -> Option<AttendanceStatus> {
        let tables = self.tables.lock();
        tables
            .enrollments
            .iter()
            .find(|e| e.student == student && e.course == course)
            .and_then(|e| e.attendance)
    }
}

impl RecordStore for InMemoryStore {
    fn compute_gpa(&self, student: &str) -> Result<f64, StoreError> {
        let tables = self.tables.lock();
        let Some(id) = tables.resolve_student(student) else {
            debug!(student, "GPA requested for unknown student");
            return Ok(0.0);
        };
        let graded = tables
            .enrollments
            .iter()
            .filter(|e| e.student == id)
            .filter_map(|e| {
                let course = tables.course(e.course)?;
                Some(GradedCourse {
                    credit: course.credit,
                    score: e.score,
                })
            });
        Ok(weighted_gpa(graded))
    }

    fn create_course(
        &self,
        name: &str,
        owner: UserId,
        credit: f64,
    ) -> Result<CourseId, StoreError> {
        if !credit.is_finite() || credit < 0.0 {
            return Err(StoreError::InvalidCredit(credit));
        }
        let mut tables = self.tables.lock();
        if tables.teacher(owner).is_none() {
            return Err(StoreError::InvalidOwner(owner));
        }
        let id = CourseId::new(next_id(tables.courses.len()));
        tables.courses.push(Course {
            name: name.to_string(),
            teacher: owner,
            credit,
        });
        info!(%id, name, %owner, credit, "course created");
        Ok(id)
    }
}
