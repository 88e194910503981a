use std::{fmt, str::FromStr};

use serde::Serialize;

/// The kinds of record stored in the catalog.
///
/// Variants are declared leaves first, so that a record kind only ever
/// references kinds declared before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// An academic year.
    Year,
    /// A recurring grading period (Spring, Summer, Fall).
    Period,
    /// A course in the catalog.
    Course,
    /// A person teaching sections.
    Instructor,
    /// A person registering for sections.
    Student,
    /// A year paired with a period.
    Semester,
    /// One offering of a course in a semester.
    Section,
    /// A student enrolled in a section.
    Registration,
}

impl EntityKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Year,
        Self::Period,
        Self::Course,
        Self::Instructor,
        Self::Student,
        Self::Semester,
        Self::Section,
        Self::Registration,
    ];

    /// The lowercase name used in references and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Period => "period",
            Self::Course => "course",
            Self::Instructor => "instructor",
            Self::Student => "student",
            Self::Semester => "semester",
            Self::Section => "section",
            Self::Registration => "registration",
        }
    }

    /// The plural form, as used in "There are no courses available."
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Year => "years",
            Self::Period => "periods",
            Self::Course => "courses",
            Self::Instructor => "instructors",
            Self::Student => "students",
            Self::Semester => "semesters",
            Self::Section => "sections",
            Self::Registration => "registrations",
        }
    }

    /// The capitalised name used in validation messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Year => "Year",
            Self::Period => "Period",
            Self::Course => "Course",
            Self::Instructor => "Instructor",
            Self::Student => "Student",
            Self::Semester => "Semester",
            Self::Section => "Section",
            Self::Registration => "Registration",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a record kind.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown record kind '{0}'")]
pub struct UnknownKindError(String);

impl FromStr for EntityKind {
    type Err = UnknownKindError;

    /// Accepts the singular or plural name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lower || kind.plural() == lower)
            .ok_or_else(|| UnknownKindError(s.to_string()))
    }
}
