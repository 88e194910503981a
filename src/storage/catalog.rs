//! A SQLite backed store of catalog records.
//!
//! The [`Catalog`] owns one database connection. Reads are plain queries;
//! every write runs in its own `IMMEDIATE` transaction so that the
//! validation queries and the write see the same state, and so that a
//! cascading delete is all-or-nothing.

use std::{collections::BTreeSet, path::Path, time::Duration};

use rusqlite::{
    Connection, OptionalExtension, Params, TransactionBehavior, ffi, params_from_iter,
    types::Value,
};

use super::{
    Detail, Error,
    record::{Record, Writable, order_clause, select},
    schema,
};
use crate::domain::{
    Config, DuplicateRecord, EntityKind, Id, RecordDetail, Reference, ValidationError,
};

/// A SQLite backed store of catalog records.
pub struct Catalog {
    conn: Connection,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("path", &self.conn.path())
            .finish()
    }
}

impl Catalog {
    /// Opens the catalog rooted at `root`, reading `courseinfo.toml` if
    /// present.
    ///
    /// The database file is created and migrated if necessary.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `courseinfo.toml` exists but is invalid,
    /// or an error if the database cannot be opened or migrated.
    pub fn open(root: &Path) -> Result<Self, Error> {
        let config = Config::load_or_default(root).map_err(Error::Config)?;
        Self::open_with_config(root, &config)
    }

    /// Opens the catalog rooted at `root` with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_with_config(root: &Path, config: &Config) -> Result<Self, Error> {
        let path = config.database_path(root);
        tracing::debug!("Opening catalog database at {}", path.display());

        let conn = Connection::open(&path)?;
        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms()))?;
        Self::from_connection(conn)
    }

    /// Opens a fresh catalog that lives only as long as the returned value.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self, Error> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, Error> {
        schema::migrate(&conn)?;
        Ok(Self { conn })
    }

    /// All records of type `R`, in their default order.
    ///
    /// # Errors
    ///
    /// Only fails if the database does.
    pub fn list<R: Record>(&self) -> Result<Vec<R>, Error> {
        let sql = format!("{} {}", select::<R>(), order_clause::<R>());
        self.query(&sql, [])
    }

    /// Records of type `R` whose `column` references the record `id`, in
    /// their default order.
    pub(crate) fn list_referencing<R: Record, P>(
        &self,
        column: &str,
        id: Id<P>,
    ) -> Result<Vec<R>, Error> {
        let sql = format!(
            "{} WHERE {}.{column} = ?1 {}",
            select::<R>(),
            R::ALIAS,
            order_clause::<R>()
        );
        self.query(&sql, [id.get()])
    }

    fn query<R: Record>(&self, sql: &str, params: impl Params) -> Result<Vec<R>, Error> {
        tracing::trace!("{sql}");
        let mut statement = self.conn.prepare(sql)?;
        let records = statement
            .query_map(params, R::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// The record of type `R` with the identifier `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there is no such record.
    pub fn get<R: Record>(&self, id: Id<R>) -> Result<R, Error> {
        let sql = format!("{} WHERE {}.id = ?1", select::<R>(), R::ALIAS);
        self.conn
            .query_row(&sql, [id], R::from_row)
            .optional()?
            .ok_or(Error::NotFound {
                kind: R::KIND,
                id: id.get(),
            })
    }

    /// The detail view `D` of the record with the identifier `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there is no such record.
    pub fn detail<D: Detail>(&self, id: Id<D::Record>) -> Result<D, Error> {
        tracing::debug!("Loading detail of {}", id.reference());
        D::load(self, id)
    }

    /// The detail view of the referenced record, whatever its kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there is no such record.
    pub fn resolve(&self, reference: Reference) -> Result<RecordDetail, Error> {
        let id = reference.id();
        Ok(match reference.kind() {
            EntityKind::Year => RecordDetail::Year(self.detail(Id::new(id))?),
            EntityKind::Period => RecordDetail::Period(self.detail(Id::new(id))?),
            EntityKind::Course => RecordDetail::Course(self.detail(Id::new(id))?),
            EntityKind::Instructor => RecordDetail::Instructor(self.detail(Id::new(id))?),
            EntityKind::Student => RecordDetail::Student(self.detail(Id::new(id))?),
            EntityKind::Semester => RecordDetail::Semester(self.detail(Id::new(id))?),
            EntityKind::Section => RecordDetail::Section(self.detail(Id::new(id))?),
            EntityKind::Registration => RecordDetail::Registration(self.detail(Id::new(id))?),
        })
    }

    /// The number of stored records of `kind`.
    ///
    /// # Errors
    ///
    /// Only fails if the database does.
    pub fn count(&self, kind: EntityKind) -> Result<usize, Error> {
        let sql = format!("SELECT COUNT(*) FROM {kind}");
        Ok(self.conn.query_row(&sql, [], |row| row.get(0))?)
    }

    /// The records a delete of `reference` would remove by cascade, sorted
    /// by kind then identifier. The referenced record itself is excluded.
    ///
    /// # Errors
    ///
    /// Only fails if the database does.
    pub fn dependants(&self, reference: Reference) -> Result<Vec<Reference>, Error> {
        let mut found = BTreeSet::new();
        let mut pending = vec![reference];

        while let Some(parent) = pending.pop() {
            for &(child, column, referenced) in schema::FOREIGN_KEYS {
                if referenced != parent.kind() {
                    continue;
                }
                let sql = format!("SELECT id FROM {child} WHERE {column} = ?1");
                let mut statement = self.conn.prepare(&sql)?;
                let ids = statement
                    .query_map([parent.id()], |row| row.get::<_, i64>(0))?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                for id in ids {
                    let dependant = Reference::new(child, id);
                    if found.insert(dependant) {
                        pending.push(dependant);
                    }
                }
            }
        }

        Ok(found.into_iter().collect())
    }

    /// Validate and store a new record of type `R`.
    ///
    /// # Errors
    ///
    /// This method can fail if:
    ///
    /// - a field is blank or too long, or a reference names a missing record
    ///   ([`Error::ValidationFailure`])
    /// - a record with the same unique key exists
    ///   ([`Error::DuplicateRecord`])
    /// - the database fails
    pub fn create<R: Writable>(&mut self, fields: &R::Fields) -> Result<Id<R>, Error> {
        R::validate(fields)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        check_references::<R>(&tx, fields)?;
        check_unique::<R>(&tx, fields, None)?;
        let id = insert::<R>(&tx, fields)?;
        tx.commit()?;

        tracing::info!("Created {}", id.reference());
        Ok(id)
    }

    /// Validate and overwrite the fields of an existing record.
    ///
    /// The record may keep its own unique key, but may not take another
    /// record's.
    ///
    /// # Errors
    ///
    /// As [`Catalog::create`], plus [`Error::NotFound`] if there is no record
    /// with the identifier `id`.
    pub fn update<R: Writable>(&mut self, id: Id<R>, fields: &R::Fields) -> Result<(), Error> {
        R::validate(fields)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if !exists(&tx, R::KIND, id.get())? {
            return Err(Error::NotFound {
                kind: R::KIND,
                id: id.get(),
            });
        }
        check_references::<R>(&tx, fields)?;
        check_unique::<R>(&tx, fields, Some(id.get()))?;

        let assignments = R::COLUMNS
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{column} = ?{}", i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {assignments} WHERE id = ?{}",
            R::TABLE,
            R::COLUMNS.len() + 1
        );
        let mut values = R::values(fields);
        values.push(Value::Integer(id.get()));
        tx.execute(&sql, params_from_iter(values))
            .map_err(constraint_error::<R>)?;
        tx.commit()?;

        tracing::info!("Updated {}", id.reference());
        Ok(())
    }

    /// Delete a record and, by cascade, every record that depends on it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there is no record with the identifier
    /// `id`.
    pub fn delete<R: Record>(&mut self, id: Id<R>) -> Result<(), Error> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let sql = format!("DELETE FROM {} WHERE id = ?1", R::TABLE);
        if tx.execute(&sql, [id])? == 0 {
            return Err(Error::NotFound {
                kind: R::KIND,
                id: id.get(),
            });
        }
        tx.commit()?;

        tracing::info!("Deleted {}", id.reference());
        Ok(())
    }

    /// Delete every record of type `R`, cascading to dependants.
    ///
    /// Returns the number of records of type `R` removed.
    ///
    /// # Errors
    ///
    /// Only fails if the database does.
    pub fn delete_all<R: Record>(&mut self) -> Result<usize, Error> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let removed = tx.execute(&format!("DELETE FROM {}", R::TABLE), [])?;
        tx.commit()?;

        tracing::info!("Deleted {removed} {}", R::KIND.plural());
        Ok(removed)
    }
}

fn exists(conn: &Connection, kind: EntityKind, id: i64) -> Result<bool, Error> {
    let sql = format!("SELECT EXISTS (SELECT 1 FROM {kind} WHERE id = ?1)");
    Ok(conn.query_row(&sql, [id], |row| row.get(0))?)
}

fn check_references<R: Writable>(conn: &Connection, fields: &R::Fields) -> Result<(), Error> {
    for key in R::references(fields) {
        if !exists(conn, key.kind, key.id)? {
            return Err(ValidationError::missing_reference(key.field, key.kind, key.id).into());
        }
    }
    Ok(())
}

/// Fails with [`Error::DuplicateRecord`] if another record has the unique key
/// of `fields`. The record `exclude`, if any, is ignored.
fn check_unique<R: Writable>(
    conn: &Connection,
    fields: &R::Fields,
    exclude: Option<i64>,
) -> Result<(), Error> {
    let (clauses, mut params): (Vec<String>, Vec<Value>) = R::COLUMNS
        .iter()
        .zip(R::values(fields))
        .filter(|(column, _)| R::KEY_COLUMNS.contains(*column))
        .enumerate()
        .map(|(i, (column, value))| (format!("{column} = ?{}", i + 1), value))
        .unzip();

    let mut condition = clauses.join(" AND ");
    if let Some(id) = exclude {
        params.push(Value::Integer(id));
        condition.push_str(&format!(" AND id != ?{}", params.len()));
    }

    let sql = format!(
        "SELECT EXISTS (SELECT 1 FROM {} WHERE {condition})",
        R::TABLE
    );
    let duplicate: bool = conn.query_row(&sql, params_from_iter(params), |row| row.get(0))?;
    if duplicate {
        return Err(DuplicateRecord::new(R::KIND, R::UNIQUE_KEY).into());
    }
    Ok(())
}

/// Writes a new row without any application-level checks.
///
/// The store's own constraints still apply and are reported as
/// [`Error::DuplicateRecord`] or [`Error::ValidationFailure`].
pub(crate) fn insert<R: Writable>(conn: &Connection, fields: &R::Fields) -> Result<Id<R>, Error> {
    let placeholders = (1..=R::COLUMNS.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({placeholders})",
        R::TABLE,
        R::COLUMNS.join(", ")
    );
    conn.execute(&sql, params_from_iter(R::values(fields)))
        .map_err(constraint_error::<R>)?;
    Ok(Id::new(conn.last_insert_rowid()))
}

/// Translates constraint violations raised by the store into the same errors
/// the application-level checks produce.
fn constraint_error<R: Writable>(error: rusqlite::Error) -> Error {
    if let rusqlite::Error::SqliteFailure(failure, _) = &error {
        match failure.extended_code {
            ffi::SQLITE_CONSTRAINT_UNIQUE => {
                tracing::debug!("Unique constraint rejected write to {}", R::TABLE);
                return DuplicateRecord::new(R::KIND, R::UNIQUE_KEY).into();
            }
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                return ValidationError::new("reference", "Referenced record does not exist.")
                    .into();
            }
            _ => {}
        }
    }
    Error::Database(error)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use test_case::test_case;

    use super::*;
    use crate::{
        bootstrap::{
            seed_courses, seed_instructors, seed_periods, seed_registration, seed_section,
            seed_semesters, seed_students, seed_years,
        },
        domain::{
            Course, CourseFields, Instructor, Period, PeriodFields, PersonName, Registration,
            RegistrationFields, Section, SectionFields, Semester, SemesterFields, Student, Year,
            YearFields,
        },
    };

    fn catalog() -> Catalog {
        Catalog::open_in_memory().unwrap()
    }

    fn assert_duplicate(result: Result<impl std::fmt::Debug, Error>, message: &str) {
        match result {
            Err(Error::DuplicateRecord(duplicate)) => assert_eq!(duplicate.to_string(), message),
            other => panic!("expected duplicate record, got {other:?}"),
        }
    }

    #[test]
    fn years_list_in_ascending_order() {
        let mut catalog = catalog();
        seed_years(&mut catalog).unwrap();

        let years: Vec<i32> = catalog
            .list::<Year>()
            .unwrap()
            .into_iter()
            .map(|year| year.year)
            .collect();
        assert_eq!(years, [2021, 2022]);
    }

    #[test]
    fn periods_list_in_sequence_order() {
        let mut catalog = catalog();
        catalog.create::<Period>(&PeriodFields::new(3, "Fall")).unwrap();
        catalog.create::<Period>(&PeriodFields::new(1, "Spring")).unwrap();
        catalog.create::<Period>(&PeriodFields::new(2, "Summer")).unwrap();

        let names: Vec<String> = catalog
            .list::<Period>()
            .unwrap()
            .into_iter()
            .map(|period| period.name)
            .collect();
        assert_eq!(names, ["Spring", "Summer", "Fall"]);
    }

    #[test]
    fn people_list_by_last_name_first_name_and_disambiguator() {
        let mut catalog = catalog();
        catalog
            .create::<Student>(&PersonName::new("Kevin", "Trainor", "UIUC"))
            .unwrap();
        catalog
            .create::<Student>(&PersonName::new("Ann", "Saoji", "B"))
            .unwrap();
        catalog
            .create::<Student>(&PersonName::new("Ann", "Saoji", "A"))
            .unwrap();

        let students: Vec<String> = catalog
            .list::<Student>()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            students,
            ["Saoji, Ann, (A)", "Saoji, Ann, (B)", "Trainor, Kevin, (UIUC)"]
        );
    }

    #[test]
    fn sections_list_by_course_then_semester_then_name() {
        let mut catalog = catalog();
        let graph = seed_section(&mut catalog).unwrap();
        let fall = catalog.create::<Period>(&PeriodFields::new(3, "Fall")).unwrap();
        let year = catalog.create::<Year>(&YearFields { year: 2021 }).unwrap();
        let fall_2021 = catalog
            .create::<Semester>(&SemesterFields { year, period: fall })
            .unwrap();
        let early = catalog
            .create::<Course>(&CourseFields::new("IS100", "Introduction"))
            .unwrap();

        let mut section = |name: &str, semester, course| {
            catalog.create::<Section>(&SectionFields {
                name: name.to_string(),
                semester,
                course,
                instructor: graph.instructor,
            })
        };
        section("AAA", graph.semester, graph.course).unwrap();
        section("ZZZ", fall_2021, graph.course).unwrap();
        section("ZZZ", graph.semester, early).unwrap();

        let sections: Vec<String> = catalog
            .list::<Section>()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            sections,
            [
                "IS100 - ZZZ 2022 - Spring",
                "IS439 - ZZZ 2021 - Fall",
                "IS439 - AAA 2022 - Spring",
                "IS439 - OAG 2022 - Spring",
            ]
        );
    }

    #[test]
    fn courses_list_by_number() {
        let mut catalog = catalog();
        catalog
            .create::<Course>(&CourseFields::new("IS455", "Database Design and Prototyping"))
            .unwrap();
        catalog
            .create::<Course>(&CourseFields::new("IS439", "Web Development"))
            .unwrap();

        let numbers: Vec<String> = catalog
            .list::<Course>()
            .unwrap()
            .into_iter()
            .map(|course| course.number)
            .collect();
        assert_eq!(numbers, ["IS439", "IS455"]);
    }

    #[test]
    fn instructors_list_by_last_name_first_name_and_disambiguator() {
        let mut catalog = catalog();
        for name in [
            PersonName::new("Kevin", "Trainor", ""),
            PersonName::new("Saurabh", "Saoji", "UIUC"),
            PersonName::new("Saurabh", "Saoji", ""),
            PersonName::new("Anita", "Saoji", ""),
        ] {
            catalog.create::<Instructor>(&name).unwrap();
        }

        let instructors: Vec<String> = catalog
            .list::<Instructor>()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            instructors,
            [
                "Saoji, Anita",
                "Saoji, Saurabh",
                "Saoji, Saurabh, (UIUC)",
                "Trainor, Kevin",
            ]
        );
    }

    #[test]
    fn semesters_list_by_year_then_period_sequence() {
        let mut catalog = catalog();
        let fall = catalog.create::<Period>(&PeriodFields::new(3, "Fall")).unwrap();
        let spring = catalog.create::<Period>(&PeriodFields::new(1, "Spring")).unwrap();
        let later = catalog.create::<Year>(&YearFields { year: 2022 }).unwrap();
        let earlier = catalog.create::<Year>(&YearFields { year: 2021 }).unwrap();
        for (year, period) in [(later, fall), (later, spring), (earlier, fall), (earlier, spring)] {
            catalog
                .create::<Semester>(&SemesterFields { year, period })
                .unwrap();
        }

        let semesters: Vec<String> = catalog
            .list::<Semester>()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            semesters,
            ["2021 - Spring", "2021 - Fall", "2022 - Spring", "2022 - Fall"]
        );
    }

    #[test]
    fn registrations_list_by_student_then_section() {
        let mut catalog = catalog();
        let graph = seed_section(&mut catalog).unwrap();
        let early = catalog
            .create::<Course>(&CourseFields::new("IS100", "Introduction"))
            .unwrap();
        let intro = catalog
            .create::<Section>(&SectionFields {
                name: "ZZZ".to_string(),
                semester: graph.semester,
                course: early,
                instructor: graph.instructor,
            })
            .unwrap();
        let trainor = catalog
            .create::<Student>(&PersonName::new("Kevin", "Trainor", ""))
            .unwrap();
        let saoji = catalog
            .create::<Student>(&PersonName::new("Saurabh", "Saoji", ""))
            .unwrap();

        for (student, section) in [
            (trainor, graph.section),
            (trainor, intro),
            (saoji, graph.section),
            (saoji, intro),
        ] {
            catalog
                .create::<Registration>(&RegistrationFields { section, student })
                .unwrap();
        }

        let registrations: Vec<String> = catalog
            .list::<Registration>()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            registrations,
            [
                "IS100 - ZZZ 2022 - Spring / Saoji, Saurabh",
                "IS439 - OAG 2022 - Spring / Saoji, Saurabh",
                "IS100 - ZZZ 2022 - Spring / Trainor, Kevin",
                "IS439 - OAG 2022 - Spring / Trainor, Kevin",
            ]
        );
    }

    #[test]
    fn empty_catalog_lists_nothing() {
        let catalog = catalog();
        assert!(catalog.list::<Registration>().unwrap().is_empty());
        assert_eq!(catalog.count(EntityKind::Course).unwrap(), 0);
    }

    #[test]
    fn duplicate_year_is_rejected() {
        let mut catalog = catalog();
        seed_years(&mut catalog).unwrap();
        assert_duplicate(
            catalog.create::<Year>(&YearFields { year: 2022 }),
            "Year with this Year already exists.",
        );
        assert_eq!(catalog.count(EntityKind::Year).unwrap(), 2);
    }

    #[test]
    fn duplicate_period_name_is_rejected() {
        let mut catalog = catalog();
        seed_periods(&mut catalog).unwrap();
        assert_duplicate(
            catalog.create::<Period>(&PeriodFields::new(4, "Spring")),
            "Period with this Period name already exists.",
        );
        assert_eq!(catalog.count(EntityKind::Period).unwrap(), 3);
    }

    #[test]
    fn course_key_is_number_and_name() {
        let mut catalog = catalog();
        seed_courses(&mut catalog).unwrap();
        assert_duplicate(
            catalog.create::<Course>(&CourseFields::new("IS439", "Web Development")),
            "Course with this Course number and Course name already exists.",
        );
        catalog
            .create::<Course>(&CourseFields::new("IS439", "Other Name"))
            .unwrap();
        assert_eq!(catalog.count(EntityKind::Course).unwrap(), 3);
    }

    #[test]
    fn duplicate_people_are_rejected() {
        let mut catalog = catalog();
        seed_students(&mut catalog).unwrap();
        seed_instructors(&mut catalog).unwrap();
        let name = PersonName::new("Kevin", "Trainor", "UIUC");

        assert_duplicate(
            catalog.create::<Student>(&name),
            "Student with this Last name, First name and Disambiguator already exists.",
        );
        assert_duplicate(
            catalog.create::<Instructor>(&name),
            "Instructor with this Last name, First name and Disambiguator already exists.",
        );

        catalog
            .create::<Student>(&PersonName::new("Kevin", "Trainor", "UCLA"))
            .unwrap();
    }

    #[test]
    fn duplicate_semester_is_rejected() {
        let mut catalog = catalog();
        let [spring, _] = seed_semesters(&mut catalog).unwrap();
        let existing = catalog.get(spring).unwrap();
        assert_duplicate(
            catalog.create::<Semester>(&SemesterFields {
                year: existing.year.id,
                period: existing.period.id,
            }),
            "Semester with this Year and Period already exists.",
        );
        assert_eq!(catalog.count(EntityKind::Semester).unwrap(), 2);
    }

    #[test]
    fn duplicate_section_and_registration_are_rejected() {
        let mut catalog = catalog();
        let graph = seed_registration(&mut catalog).unwrap();
        let section = graph.section;

        assert_duplicate(
            catalog.create::<Section>(&SectionFields {
                name: "OAG".to_string(),
                semester: section.semester,
                course: section.course,
                instructor: section.instructor,
            }),
            "Section with this Semester, Course and Section name already exists.",
        );
        assert_duplicate(
            catalog.create::<Registration>(&RegistrationFields {
                section: section.section,
                student: graph.student,
            }),
            "Registration with this Section and Student already exists.",
        );
        assert_eq!(catalog.count(EntityKind::Section).unwrap(), 1);
        assert_eq!(catalog.count(EntityKind::Registration).unwrap(), 1);
    }

    #[test]
    fn text_is_stored_trimmed() {
        let mut catalog = catalog();
        let spring = catalog
            .create::<Period>(&PeriodFields::new(1, " Spring "))
            .unwrap();

        assert_eq!(catalog.get(spring).unwrap().name, "Spring");
        assert_duplicate(
            catalog.create::<Period>(&PeriodFields::new(2, "Spring")),
            "Period with this Period name already exists.",
        );
    }

    #[test]
    fn store_constraint_is_reported_as_duplicate() {
        let catalog = catalog();
        insert::<Period>(&catalog.conn, &PeriodFields::new(1, "Spring")).unwrap();
        assert_duplicate(
            insert::<Period>(&catalog.conn, &PeriodFields::new(2, "Spring")),
            "Period with this Period name already exists.",
        );
    }

    #[test]
    fn store_foreign_key_is_reported_as_validation_failure() {
        let catalog = catalog();
        let result = insert::<Semester>(
            &catalog.conn,
            &SemesterFields {
                year: Id::new(7),
                period: Id::new(8),
            },
        );
        assert!(matches!(result, Err(Error::ValidationFailure(_))));
    }

    #[test]
    fn missing_reference_is_a_validation_failure() {
        let mut catalog = catalog();
        let year = catalog.create::<Year>(&YearFields { year: 2022 }).unwrap();
        let result = catalog.create::<Semester>(&SemesterFields {
            year,
            period: Id::new(42),
        });

        match result {
            Err(Error::ValidationFailure(error)) => {
                assert_eq!(error.field(), "period");
                assert_eq!(error.message(), "period instance with id 42 does not exist.");
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test_case(""; "blank")]
    #[test_case("   "; "whitespace")]
    #[test_case("ABCDEFGHIJK"; "too long")]
    fn invalid_section_name_is_rejected(name: &str) {
        let mut catalog = catalog();
        let graph = seed_section(&mut catalog).unwrap();
        let result = catalog.create::<Section>(&SectionFields {
            name: name.to_string(),
            semester: graph.semester,
            course: graph.course,
            instructor: graph.instructor,
        });
        assert!(matches!(result, Err(Error::ValidationFailure(e)) if e.field() == "name"));
        assert_eq!(catalog.count(EntityKind::Section).unwrap(), 1);
    }

    #[test]
    fn get_missing_record_is_not_found() {
        let catalog = catalog();
        let error = catalog.get::<Course>(Id::new(1)).unwrap_err();
        assert!(matches!(
            error,
            Error::NotFound {
                kind: EntityKind::Course,
                id: 1
            }
        ));
        assert_eq!(error.to_string(), "course 1 not found");
    }

    #[test]
    fn deleted_ids_are_not_reused() {
        let mut catalog = catalog();
        let first = catalog
            .create::<Course>(&CourseFields::new("IS439", "Web Development"))
            .unwrap();
        catalog.delete(first).unwrap();
        let second = catalog
            .create::<Course>(&CourseFields::new("IS439", "Web Development"))
            .unwrap();

        assert_ne!(first, second);
        assert!(catalog.get(first).unwrap_err().is_not_found());
        assert!(catalog.delete(first).unwrap_err().is_not_found());
    }

    #[test]
    fn deleting_a_year_cascades_through_the_graph() {
        let mut catalog = catalog();
        let graph = seed_registration(&mut catalog).unwrap();

        let dependants = catalog.dependants(graph.section.year.reference()).unwrap();
        assert_eq!(
            dependants,
            [
                graph.section.semester.reference(),
                graph.section.section.reference(),
                graph.registration.reference(),
            ]
        );

        catalog.delete(graph.section.year).unwrap();

        assert!(catalog.get(graph.section.semester).unwrap_err().is_not_found());
        assert!(catalog.get(graph.section.section).unwrap_err().is_not_found());
        assert!(catalog.get(graph.registration).unwrap_err().is_not_found());
        catalog.get(graph.section.course).unwrap();
        catalog.get(graph.student).unwrap();
    }

    #[test]
    fn delete_all_empties_one_kind_and_its_dependants() {
        let mut catalog = catalog();
        seed_registration(&mut catalog).unwrap();

        assert_eq!(catalog.delete_all::<Student>().unwrap(), 1);
        assert_eq!(catalog.count(EntityKind::Student).unwrap(), 0);
        assert_eq!(catalog.count(EntityKind::Registration).unwrap(), 0);
        assert_eq!(catalog.count(EntityKind::Section).unwrap(), 1);
    }

    #[test]
    fn update_may_keep_its_own_key() {
        let mut catalog = catalog();
        let [spring, summer, _] = seed_periods(&mut catalog).unwrap();

        catalog
            .update(spring, &PeriodFields::new(5, "Spring"))
            .unwrap();
        assert_eq!(catalog.get(spring).unwrap().sequence, 5);

        assert_duplicate(
            catalog.update(summer, &PeriodFields::new(2, "Spring")),
            "Period with this Period name already exists.",
        );
        assert_eq!(catalog.get(summer).unwrap().name, "Summer");
    }

    #[test]
    fn update_validates_and_requires_existing_record() {
        let mut catalog = catalog();
        let [student, _] = seed_students(&mut catalog).unwrap();

        let blank = PersonName::new("", "Saoji", "UIUC");
        assert!(matches!(
            catalog.update(student, &blank),
            Err(Error::ValidationFailure(e)) if e.field() == "first_name"
        ));

        let name = PersonName::new("Saurabh", "Saoji", "");
        assert!(catalog.update(Id::<Student>::new(99), &name).unwrap_err().is_not_found());

        catalog.update(student, &name).unwrap();
        assert_eq!(catalog.get(student).unwrap().to_string(), "Saoji, Saurabh");
    }

    #[test]
    fn catalog_persists_between_opens() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.set_database("records.sqlite3".into());
        config.save(&dir.path().join(crate::domain::CONFIG_FILE_NAME)).unwrap();

        {
            let mut catalog = Catalog::open(dir.path()).unwrap();
            seed_courses(&mut catalog).unwrap();
        }

        assert!(dir.path().join("records.sqlite3").exists());
        let catalog = Catalog::open(dir.path()).unwrap();
        assert_eq!(catalog.count(EntityKind::Course).unwrap(), 2);
    }

    #[test]
    fn invalid_config_is_not_replaced_by_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(crate::domain::CONFIG_FILE_NAME),
            "_version = \"1\"\ndatabase = \"records.sqlite3\"\nbusy_timeout_ms = \"5s\"\n",
        )
        .unwrap();

        let error = Catalog::open(dir.path()).unwrap_err();

        assert!(matches!(error, Error::Config(_)), "{error:?}");
        assert!(!Config::default().database_path(dir.path()).exists());
        assert!(!dir.path().join("records.sqlite3").exists());
    }
}
