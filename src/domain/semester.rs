use std::fmt;

use serde::Serialize;

use super::{EntityKind, Id, Period, ValidationError, Year, id::Entity};

/// One concrete academic term: a year paired with a period.
///
/// The referenced year and period are resolved eagerly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Semester {
    /// System-assigned identifier.
    pub id: Id<Self>,
    /// The semester's year.
    pub year: Year,
    /// The semester's period.
    pub period: Period,
}

impl Entity for Semester {
    const KIND: EntityKind = EntityKind::Semester;

    fn id(&self) -> Id<Self> {
        self.id
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.year, self.period)
    }
}

/// The writable fields of a [`Semester`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemesterFields {
    /// The semester's year.
    pub year: Id<Year>,
    /// The semester's period.
    pub period: Id<Period>,
}

impl SemesterFields {
    /// Labels of the fields forming the unique key.
    pub const UNIQUE_KEY: &'static [&'static str] = &["Year", "Period"];

    /// References are checked against the store; nothing to check locally.
    ///
    /// # Errors
    ///
    /// Never fails.
    pub const fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}
