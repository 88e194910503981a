//! Detail views: one record together with its related collections.
//!
//! Related collections are back-references resolved by query when the view
//! is loaded, each in the default order of its record kind.

use std::fmt;

use serde::Serialize;

use super::{
    Course, Entity, Instructor, Period, Reference, Registration, Section, Semester, Student, Year,
};

/// A year and the semesters held in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearDetail {
    /// The year itself.
    pub year: Year,
    /// Semesters in the year.
    pub semesters: Vec<Semester>,
}

/// A period and the semesters using it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodDetail {
    /// The period itself.
    pub period: Period,
    /// Semesters in the period.
    pub semesters: Vec<Semester>,
}

/// A course and its sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseDetail {
    /// The course itself.
    pub course: Course,
    /// Sections offering the course.
    pub sections: Vec<Section>,
}

/// An instructor and the sections they teach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructorDetail {
    /// The instructor itself.
    pub instructor: Instructor,
    /// Sections taught by the instructor.
    pub sections: Vec<Section>,
}

/// A student and their registrations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentDetail {
    /// The student itself.
    pub student: Student,
    /// The student's registrations.
    pub registrations: Vec<Registration>,
}

/// A semester and the sections running in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SemesterDetail {
    /// The semester, with its year and period.
    pub semester: Semester,
    /// Sections in the semester.
    pub sections: Vec<Section>,
}

/// A section and its registrations.
///
/// The section's course, semester and instructor are resolved on
/// [`Section`] itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionDetail {
    /// The section, with its course, semester and instructor.
    pub section: Section,
    /// Registrations in the section.
    pub registrations: Vec<Registration>,
}

/// A registration with its section and student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationDetail {
    /// The registration, with its section and student.
    pub registration: Registration,
}

/// The detail view of a record of any kind.
///
/// Serializes with a `kind` tag, e.g. `{"kind": "course", "course": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RecordDetail {
    /// A year.
    Year(YearDetail),
    /// A period.
    Period(PeriodDetail),
    /// A course.
    Course(CourseDetail),
    /// An instructor.
    Instructor(InstructorDetail),
    /// A student.
    Student(StudentDetail),
    /// A semester.
    Semester(SemesterDetail),
    /// A section.
    Section(SectionDetail),
    /// A registration.
    Registration(RegistrationDetail),
}

impl RecordDetail {
    /// The reference of the record the view is centred on.
    #[must_use]
    pub fn reference(&self) -> Reference {
        match self {
            Self::Year(detail) => detail.year.reference(),
            Self::Period(detail) => detail.period.reference(),
            Self::Course(detail) => detail.course.reference(),
            Self::Instructor(detail) => detail.instructor.reference(),
            Self::Student(detail) => detail.student.reference(),
            Self::Semester(detail) => detail.semester.reference(),
            Self::Section(detail) => detail.section.reference(),
            Self::Registration(detail) => detail.registration.reference(),
        }
    }
}

/// Displays the record the view is centred on.
impl fmt::Display for RecordDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(detail) => fmt::Display::fmt(&detail.year, f),
            Self::Period(detail) => fmt::Display::fmt(&detail.period, f),
            Self::Course(detail) => fmt::Display::fmt(&detail.course, f),
            Self::Instructor(detail) => fmt::Display::fmt(&detail.instructor, f),
            Self::Student(detail) => fmt::Display::fmt(&detail.student, f),
            Self::Semester(detail) => fmt::Display::fmt(&detail.semester, f),
            Self::Section(detail) => fmt::Display::fmt(&detail.section, f),
            Self::Registration(detail) => fmt::Display::fmt(&detail.registration, f),
        }
    }
}
