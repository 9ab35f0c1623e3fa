//! Students, courses, and the enrollment relation between them.
//!
//! Enrollment is stored as `(student_id, course_id)` edges; each side's view
//! is derived from the same edges.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    M,
    V,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::M, Gender::V];

    pub fn as_code(self) -> &'static str {
        match self {
            Gender::M => "M",
            Gender::V => "V",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGender(pub String);

impl fmt::Display for UnknownGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown gender code '{}'", self.0)
    }
}

impl std::error::Error for UnknownGender {}

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Gender::M),
            "V" => Ok(Gender::V),
            other => Err(UnknownGender(other.to_string())),
        }
    }
}

/// Mutable fields of a student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentData {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub gsm_number: Option<String>,
}

/// Fields to overwrite on a partial update; `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub gsm_number: Option<String>,
}

impl StudentPatch {
    pub fn apply_to(self, data: &mut StudentData) {
        if let Some(v) = self.first_name {
            data.first_name = v;
        }
        if let Some(v) = self.last_name {
            data.last_name = v;
        }
        if let Some(v) = self.birth_date {
            data.birth_date = v;
        }
        if let Some(v) = self.gender {
            data.gender = v;
        }
        if let Some(v) = self.gsm_number {
            data.gsm_number = Some(v);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: i64,
    pub data: StudentData,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub name: String,
    pub phase: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub phase: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Enrollment {
    pub student_id: i64,
    pub course_id: i64,
}

impl Enrollment {
    pub fn new(student_id: i64, course_id: i64) -> Self {
        Self {
            student_id,
            course_id,
        }
    }
}

/// Enrollment edges in insertion order.
#[derive(Debug, Default, Clone)]
pub struct EnrollmentIndex {
    edges: Vec<Enrollment>,
}

impl EnrollmentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, enrollment: Enrollment) -> bool {
        self.edges.contains(&enrollment)
    }

    /// Returns false when the edge already exists.
    pub fn add(&mut self, enrollment: Enrollment) -> bool {
        if self.contains(enrollment) {
            return false;
        }
        self.edges.push(enrollment);
        true
    }

    /// Returns false when there was no such edge.
    pub fn remove(&mut self, enrollment: Enrollment) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| *e != enrollment);
        self.edges.len() != before
    }

    pub fn courses_of(&self, student_id: i64) -> impl Iterator<Item = i64> + '_ {
        self.edges
            .iter()
            .filter(move |e| e.student_id == student_id)
            .map(|e| e.course_id)
    }

    pub fn students_of(&self, course_id: i64) -> impl Iterator<Item = i64> + '_ {
        self.edges
            .iter()
            .filter(move |e| e.course_id == course_id)
            .map(|e| e.student_id)
    }

    pub fn remove_student(&mut self, student_id: i64) {
        self.edges.retain(|e| e.student_id != student_id);
    }

    pub fn remove_course(&mut self, course_id: i64) {
        self.edges.retain(|e| e.course_id != course_id);
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
