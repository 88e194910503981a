use std::fmt;

use serde::Serialize;

use super::{EntityKind, Id, ValidationError, id::Entity};

/// An academic year, e.g. 2022.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Year {
    /// System-assigned identifier.
    pub id: Id<Self>,
    /// The calendar year.
    pub year: i32,
}

impl Entity for Year {
    const KIND: EntityKind = EntityKind::Year;

    fn id(&self) -> Id<Self> {
        self.id
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.year)
    }
}

/// The writable fields of a [`Year`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearFields {
    /// The calendar year.
    pub year: i32,
}

impl YearFields {
    /// Labels of the fields forming the unique key.
    pub const UNIQUE_KEY: &'static [&'static str] = &["Year"];

    /// Any integer is a valid year.
    ///
    /// # Errors
    ///
    /// Never fails; present for symmetry with the other field sets.
    pub const fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}
