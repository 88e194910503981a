use std::fmt;

use serde::Serialize;

use super::{EntityKind, Id, ValidationError, id::Entity, validation::required_text};

/// Longest allowed course number.
pub const NUMBER_MAX_LENGTH: usize = 20;
/// Longest allowed course name.
pub const NAME_MAX_LENGTH: usize = 255;

/// A course in the catalog, e.g. "IS439 - Web Development".
///
/// The number alone is not unique; the (number, name) pair is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    /// System-assigned identifier.
    pub id: Id<Self>,
    /// Catalog number, e.g. "IS439".
    pub number: String,
    /// Course title.
    pub name: String,
}

impl Entity for Course {
    const KIND: EntityKind = EntityKind::Course;

    fn id(&self) -> Id<Self> {
        self.id
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.number, self.name)
    }
}

/// The writable fields of a [`Course`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseFields {
    /// Catalog number.
    pub number: String,
    /// Course title.
    pub name: String,
}

impl CourseFields {
    /// Labels of the fields forming the unique key.
    pub const UNIQUE_KEY: &'static [&'static str] = &["Course number", "Course name"];

    /// Creates a field set.
    #[must_use]
    pub fn new(number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            name: name.into(),
        }
    }

    /// Checks both fields are present and short enough.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        required_text("number", &self.number, NUMBER_MAX_LENGTH)?;
        required_text("name", &self.name, NAME_MAX_LENGTH)
    }
}
