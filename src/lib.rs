//! Course catalog record keeping
//!
//! Years, periods, courses, instructors, students, semesters, sections and
//! registrations are stored in an embedded `SQLite` database. The database
//! enforces every uniqueness invariant and cascades deletes along every
//! reference; the [`Catalog`] reports violations as typed errors.

pub mod domain;
pub use domain::{Config, EntityKind, Id, RecordDetail, Reference};

/// `SQLite` persistence and queries for catalog records.
pub mod storage;
pub use storage::{Catalog, Error};

pub mod bootstrap;
