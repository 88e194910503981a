//! Instructors and students, both identified by a disambiguated name.

use std::fmt;

use serde::Serialize;

use super::{
    EntityKind, Id, ValidationError,
    id::Entity,
    validation::{optional_text, required_text},
};

/// Longest allowed first name, last name or disambiguator.
pub const NAME_MAX_LENGTH: usize = 45;

/// A person's name, unique per (last, first, disambiguator).
///
/// This is also the writable field set of an [`Instructor`] or a
/// [`Student`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonName {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Free-text suffix distinguishing people who share a name. May be
    /// blank.
    pub disambiguator: String,
}

impl PersonName {
    /// Creates a name.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        disambiguator: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            disambiguator: disambiguator.into(),
        }
    }

    /// Checks first and last name are present and every part is short
    /// enough.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        required_text("first_name", &self.first_name, NAME_MAX_LENGTH)?;
        required_text("last_name", &self.last_name, NAME_MAX_LENGTH)?;
        optional_text("disambiguator", &self.disambiguator, NAME_MAX_LENGTH)
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.disambiguator.is_empty() {
            write!(f, "{}, {}", self.last_name, self.first_name)
        } else {
            write!(
                f,
                "{}, {}, ({})",
                self.last_name, self.first_name, self.disambiguator
            )
        }
    }
}

/// Labels of the fields forming a person's unique key.
pub const UNIQUE_KEY: &[&str] = &["Last name", "First name", "Disambiguator"];

/// A person teaching sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instructor {
    /// System-assigned identifier.
    pub id: Id<Self>,
    /// The instructor's name.
    #[serde(flatten)]
    pub name: PersonName,
}

impl Entity for Instructor {
    const KIND: EntityKind = EntityKind::Instructor;

    fn id(&self) -> Id<Self> {
        self.id
    }
}

impl fmt::Display for Instructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.name, f)
    }
}

/// A person registering for sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    /// System-assigned identifier.
    pub id: Id<Self>,
    /// The student's name.
    #[serde(flatten)]
    pub name: PersonName,
}

impl Entity for Student {
    const KIND: EntityKind = EntityKind::Student;

    fn id(&self) -> Id<Self> {
        self.id
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.name, f)
    }
}
