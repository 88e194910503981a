use std::fmt;

use serde::Serialize;

use super::{EntityKind, Id, ValidationError, id::Entity, validation::required_text};

/// Longest allowed period name.
pub const NAME_MAX_LENGTH: usize = 45;

/// A recurring named part of the academic year, ordered by `sequence`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Period {
    /// System-assigned identifier.
    pub id: Id<Self>,
    /// Position of the period within the year.
    pub sequence: i32,
    /// Unique name, e.g. "Spring".
    pub name: String,
}

impl Entity for Period {
    const KIND: EntityKind = EntityKind::Period;

    fn id(&self) -> Id<Self> {
        self.id
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The writable fields of a [`Period`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodFields {
    /// Position of the period within the year.
    pub sequence: i32,
    /// Unique name.
    pub name: String,
}

impl PeriodFields {
    /// Labels of the fields forming the unique key.
    pub const UNIQUE_KEY: &'static [&'static str] = &["Period name"];

    /// Creates a field set.
    #[must_use]
    pub fn new(sequence: i32, name: impl Into<String>) -> Self {
        Self {
            sequence,
            name: name.into(),
        }
    }

    /// Checks the name is present and short enough.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        required_text("name", &self.name, NAME_MAX_LENGTH)
    }
}
