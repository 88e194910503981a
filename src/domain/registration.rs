use std::fmt;

use serde::Serialize;

use super::{EntityKind, Id, Section, Student, ValidationError, id::Entity};

/// The enrollment of one student in one section.
///
/// Displays as `"<section> / <student>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// System-assigned identifier.
    pub id: Id<Self>,
    /// The section enrolled in.
    pub section: Section,
    /// The enrolled student.
    pub student: Student,
}

impl Entity for Registration {
    const KIND: EntityKind = EntityKind::Registration;

    fn id(&self) -> Id<Self> {
        self.id
    }
}

impl fmt::Display for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.section, self.student)
    }
}

/// The writable fields of a [`Registration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationFields {
    /// The section enrolled in.
    pub section: Id<Section>,
    /// The enrolled student.
    pub student: Id<Student>,
}

impl RegistrationFields {
    /// Labels of the fields forming the unique key.
    pub const UNIQUE_KEY: &'static [&'static str] = &["Section", "Student"];

    /// References are checked against the store; nothing to check locally.
    ///
    /// # Errors
    ///
    /// Never fails.
    pub const fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}
