use crate::domain::{DuplicateRecord, EntityKind, ValidationError};

/// The ways a catalog operation can fail.
///
/// The first four variants are expected outcomes of normal use and are
/// meant to be reported to the user; the rest indicate a broken catalog.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A field is malformed, blank, or references a missing record.
    #[error("invalid record: {0}")]
    ValidationFailure(#[from] ValidationError),

    /// The write would violate a uniqueness invariant.
    #[error(transparent)]
    DuplicateRecord(#[from] DuplicateRecord),

    /// No record of this kind has the identifier.
    #[error("{kind} {id} not found")]
    NotFound {
        /// The kind of record looked up.
        kind: EntityKind,
        /// The raw identifier looked up.
        id: i64,
    },

    /// The catalog already holds records.
    #[error("catalog is not empty")]
    NotEmpty,

    /// The catalog's configuration file exists but could not be loaded.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The database was written by a newer version of this program.
    #[error("database schema version {found} is newer than supported version {supported}")]
    UnsupportedSchema {
        /// The version recorded in the database.
        found: i32,
        /// The newest version this program understands.
        supported: i32,
    },

    /// The database failed.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl Error {
    /// Whether this is a [`Error::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
