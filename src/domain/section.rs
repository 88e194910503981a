use std::fmt;

use serde::Serialize;

use super::{
    Course, EntityKind, Id, Instructor, Semester, ValidationError, id::Entity,
    validation::required_text,
};

/// Longest allowed section name.
pub const NAME_MAX_LENGTH: usize = 10;

/// One offering of a course within a semester, taught by one instructor.
///
/// Displays as `"IS439 - OAG 2022 - Spring"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// System-assigned identifier.
    pub id: Id<Self>,
    /// Section name, unique per semester and course.
    pub name: String,
    /// When the section runs.
    pub semester: Semester,
    /// What the section teaches.
    pub course: Course,
    /// Who teaches the section.
    pub instructor: Instructor,
}

impl Entity for Section {
    const KIND: EntityKind = EntityKind::Section;

    fn id(&self) -> Id<Self> {
        self.id
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} {}", self.course.number, self.name, self.semester)
    }
}

/// The writable fields of a [`Section`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionFields {
    /// Section name.
    pub name: String,
    /// When the section runs.
    pub semester: Id<Semester>,
    /// What the section teaches.
    pub course: Id<Course>,
    /// Who teaches the section.
    pub instructor: Id<Instructor>,
}

impl SectionFields {
    /// Labels of the fields forming the unique key.
    pub const UNIQUE_KEY: &'static [&'static str] = &["Semester", "Course", "Section name"];

    /// Checks the name is present and short enough.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for the name field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        required_text("name", &self.name, NAME_MAX_LENGTH)
    }
}
