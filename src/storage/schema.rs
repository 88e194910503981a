//! The relational schema.
//!
//! Every uniqueness invariant is a `UNIQUE` constraint and every reference a
//! foreign key with `ON DELETE CASCADE`, so the database enforces both even
//! when the application-level checks are raced. Foreign key columns are
//! indexed because detail views query them as back-references.

use rusqlite::Connection;

use super::Error;
use crate::domain::EntityKind;

/// The schema version recorded in `PRAGMA user_version`.
pub const VERSION: i32 = 1;

const SCHEMA_V1: &str = "
CREATE TABLE IF NOT EXISTS year (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    year INTEGER NOT NULL,
    UNIQUE (year)
);

CREATE TABLE IF NOT EXISTS period (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    sequence INTEGER NOT NULL,
    name TEXT NOT NULL,
    UNIQUE (name)
);

CREATE TABLE IF NOT EXISTS course (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    number TEXT NOT NULL,
    name TEXT NOT NULL,
    UNIQUE (number, name)
);

CREATE TABLE IF NOT EXISTS instructor (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    disambiguator TEXT NOT NULL DEFAULT '',
    UNIQUE (last_name, first_name, disambiguator)
);

CREATE TABLE IF NOT EXISTS student (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    disambiguator TEXT NOT NULL DEFAULT '',
    UNIQUE (last_name, first_name, disambiguator)
);

CREATE TABLE IF NOT EXISTS semester (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    year_id INTEGER NOT NULL REFERENCES year (id) ON DELETE CASCADE,
    period_id INTEGER NOT NULL REFERENCES period (id) ON DELETE CASCADE,
    UNIQUE (year_id, period_id)
);
CREATE INDEX IF NOT EXISTS semester_period_idx ON semester (period_id);

CREATE TABLE IF NOT EXISTS section (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    semester_id INTEGER NOT NULL REFERENCES semester (id) ON DELETE CASCADE,
    course_id INTEGER NOT NULL REFERENCES course (id) ON DELETE CASCADE,
    instructor_id INTEGER NOT NULL REFERENCES instructor (id) ON DELETE CASCADE,
    UNIQUE (semester_id, course_id, name)
);
CREATE INDEX IF NOT EXISTS section_course_idx ON section (course_id);
CREATE INDEX IF NOT EXISTS section_instructor_idx ON section (instructor_id);

CREATE TABLE IF NOT EXISTS registration (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    section_id INTEGER NOT NULL REFERENCES section (id) ON DELETE CASCADE,
    student_id INTEGER NOT NULL REFERENCES student (id) ON DELETE CASCADE,
    UNIQUE (section_id, student_id)
);
CREATE INDEX IF NOT EXISTS registration_student_idx ON registration (student_id);
";

/// Every foreign key as (referencing kind, column, referenced kind).
///
/// Tables are named after their kind, so this also describes which rows a
/// cascading delete reaches.
pub const FOREIGN_KEYS: &[(EntityKind, &str, EntityKind)] = &[
    (EntityKind::Semester, "year_id", EntityKind::Year),
    (EntityKind::Semester, "period_id", EntityKind::Period),
    (EntityKind::Section, "semester_id", EntityKind::Semester),
    (EntityKind::Section, "course_id", EntityKind::Course),
    (EntityKind::Section, "instructor_id", EntityKind::Instructor),
    (EntityKind::Registration, "section_id", EntityKind::Section),
    (EntityKind::Registration, "student_id", EntityKind::Student),
];

/// Enables foreign key enforcement and brings the schema up to [`VERSION`].
///
/// The migration runs in one transaction, so a failed migration leaves the
/// database as it found it.
///
/// # Errors
///
/// Returns an error if the database was written by a newer schema version,
/// or if any statement fails.
pub fn migrate(conn: &Connection) -> Result<(), Error> {
    conn.pragma_update(None, "foreign_keys", true)?;

    let current: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    if current > VERSION {
        return Err(Error::UnsupportedSchema {
            found: current,
            supported: VERSION,
        });
    }
    if current < VERSION {
        tracing::info!("Migrating database schema from version {current} to {VERSION}");
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(SCHEMA_V1)?;
        tx.pragma_update(None, "user_version", VERSION)?;
        tx.commit()?;
    }
    Ok(())
}
