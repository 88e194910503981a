//! Mapping between record types and the relational schema.
//!
//! Each record type is read with one query that joins every record it
//! references, so a [`Section`] arrives with its semester, course and
//! instructor already resolved. Columns are aliased with a per-table prefix
//! (`crs_number`, `ins_last_name`) so that nested records can be decoded
//! from the same row by name.

use rusqlite::{
    Row, ToSql,
    types::{FromSql, FromSqlResult, ToSqlOutput, Value, ValueRef},
};

use crate::domain::{
    Course, CourseFields, Entity, EntityKind, Id, Instructor, Period, PeriodFields, PersonName,
    Registration, RegistrationFields, Section, SectionFields, Semester, SemesterFields, Student,
    ValidationError, Year, YearFields, person,
};

impl<T> ToSql for Id<T> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.get()))
    }
}

impl<T> FromSql for Id<T> {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Self::new)
    }
}

/// A record type that can be read from the catalog.
pub trait Record: Entity {
    /// The table holding records of this type.
    const TABLE: &'static str = Self::KIND.as_str();

    /// The alias of [`Self::TABLE`] in queries, also used as column prefix.
    const ALIAS: &'static str;

    /// The aliased columns needed to decode this record, including those of
    /// the records it references.
    fn columns() -> String;

    /// The joins that bring referenced records into scope.
    fn joins() -> String {
        String::new()
    }

    /// The default ordering, without the final identifier tie-break.
    fn order_by() -> String;

    /// Decodes the record from a row selected with [`Self::columns`].
    ///
    /// # Errors
    ///
    /// Returns an error if a column is missing or has the wrong type.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

/// `SELECT ... FROM ... JOIN ...` for `R`, without filter or ordering.
pub(crate) fn select<R: Record>() -> String {
    format!(
        "SELECT {} FROM {} {} {}",
        R::columns(),
        R::TABLE,
        R::ALIAS,
        R::joins()
    )
}

/// The complete `ORDER BY` clause for `R`, ending with the identifier.
pub(crate) fn order_clause<R: Record>() -> String {
    format!("ORDER BY {}, {}.id", R::order_by(), R::ALIAS)
}

/// Text is stored without surrounding whitespace, so `" Spring"` and
/// `"Spring"` are the same unique key.
fn text(value: &str) -> Value {
    Value::Text(value.trim().to_string())
}

/// A reference from a field set to another record.
#[derive(Debug, Clone, Copy)]
pub struct ForeignKey {
    /// The field holding the reference.
    pub field: &'static str,
    /// The kind of the referenced record.
    pub kind: EntityKind,
    /// The raw identifier of the referenced record.
    pub id: i64,
}

impl ForeignKey {
    fn to<T: Entity>(field: &'static str, id: Id<T>) -> Self {
        Self {
            field,
            kind: T::KIND,
            id: id.get(),
        }
    }
}

/// A record type that can be created and updated.
pub trait Writable: Record {
    /// The writable fields.
    type Fields;

    /// Human-readable labels of the unique key, for [`DuplicateRecord`].
    ///
    /// [`DuplicateRecord`]: crate::domain::DuplicateRecord
    const UNIQUE_KEY: &'static [&'static str];

    /// The columns written, in the order returned by [`Self::values`].
    const COLUMNS: &'static [&'static str];

    /// The columns of the unique constraint; a subset of [`Self::COLUMNS`].
    const KEY_COLUMNS: &'static [&'static str];

    /// Checks the fields that can be checked without the store.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the offending field.
    fn validate(fields: &Self::Fields) -> Result<(), ValidationError>;

    /// The column values, in the order of [`Self::COLUMNS`].
    fn values(fields: &Self::Fields) -> Vec<Value>;

    /// The records referenced by the fields.
    fn references(_fields: &Self::Fields) -> Vec<ForeignKey> {
        Vec::new()
    }
}

impl Record for Year {
    const ALIAS: &'static str = "yr";

    fn columns() -> String {
        "yr.id AS yr_id, yr.year AS yr_year".to_string()
    }

    fn order_by() -> String {
        "yr.year".to_string()
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("yr_id")?,
            year: row.get("yr_year")?,
        })
    }
}

impl Writable for Year {
    type Fields = YearFields;

    const UNIQUE_KEY: &'static [&'static str] = YearFields::UNIQUE_KEY;
    const COLUMNS: &'static [&'static str] = &["year"];
    const KEY_COLUMNS: &'static [&'static str] = &["year"];

    fn validate(fields: &YearFields) -> Result<(), ValidationError> {
        fields.validate()
    }

    fn values(fields: &YearFields) -> Vec<Value> {
        vec![Value::Integer(fields.year.into())]
    }
}

impl Record for Period {
    const ALIAS: &'static str = "pd";

    fn columns() -> String {
        "pd.id AS pd_id, pd.sequence AS pd_sequence, pd.name AS pd_name".to_string()
    }

    fn order_by() -> String {
        "pd.sequence".to_string()
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("pd_id")?,
            sequence: row.get("pd_sequence")?,
            name: row.get("pd_name")?,
        })
    }
}

impl Writable for Period {
    type Fields = PeriodFields;

    const UNIQUE_KEY: &'static [&'static str] = PeriodFields::UNIQUE_KEY;
    const COLUMNS: &'static [&'static str] = &["sequence", "name"];
    const KEY_COLUMNS: &'static [&'static str] = &["name"];

    fn validate(fields: &PeriodFields) -> Result<(), ValidationError> {
        fields.validate()
    }

    fn values(fields: &PeriodFields) -> Vec<Value> {
        vec![
            Value::Integer(fields.sequence.into()),
            text(&fields.name),
        ]
    }
}

impl Record for Course {
    const ALIAS: &'static str = "crs";

    fn columns() -> String {
        "crs.id AS crs_id, crs.number AS crs_number, crs.name AS crs_name".to_string()
    }

    fn order_by() -> String {
        "crs.number".to_string()
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("crs_id")?,
            number: row.get("crs_number")?,
            name: row.get("crs_name")?,
        })
    }
}

impl Writable for Course {
    type Fields = CourseFields;

    const UNIQUE_KEY: &'static [&'static str] = CourseFields::UNIQUE_KEY;
    const COLUMNS: &'static [&'static str] = &["number", "name"];
    const KEY_COLUMNS: &'static [&'static str] = &["number", "name"];

    fn validate(fields: &CourseFields) -> Result<(), ValidationError> {
        fields.validate()
    }

    fn values(fields: &CourseFields) -> Vec<Value> {
        vec![
            text(&fields.number),
            text(&fields.name),
        ]
    }
}

/// Columns, ordering and decoding shared by instructors and students.
fn person_columns(alias: &str) -> String {
    format!(
        "{alias}.id AS {alias}_id, {alias}.first_name AS {alias}_first_name, \
         {alias}.last_name AS {alias}_last_name, {alias}.disambiguator AS {alias}_disambiguator"
    )
}

fn person_order_by(alias: &str) -> String {
    format!("{alias}.last_name, {alias}.first_name, {alias}.disambiguator")
}

fn person_from_row(row: &Row<'_>, alias: &str) -> rusqlite::Result<PersonName> {
    Ok(PersonName {
        first_name: row.get(format!("{alias}_first_name").as_str())?,
        last_name: row.get(format!("{alias}_last_name").as_str())?,
        disambiguator: row.get(format!("{alias}_disambiguator").as_str())?,
    })
}

const PERSON_COLUMNS: &[&str] = &["first_name", "last_name", "disambiguator"];
const PERSON_KEY_COLUMNS: &[&str] = &["last_name", "first_name", "disambiguator"];

fn person_values(name: &PersonName) -> Vec<Value> {
    vec![
        text(&name.first_name),
        text(&name.last_name),
        text(&name.disambiguator),
    ]
}

impl Record for Instructor {
    const ALIAS: &'static str = "ins";

    fn columns() -> String {
        person_columns(Self::ALIAS)
    }

    fn order_by() -> String {
        person_order_by(Self::ALIAS)
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("ins_id")?,
            name: person_from_row(row, Self::ALIAS)?,
        })
    }
}

impl Writable for Instructor {
    type Fields = PersonName;

    const UNIQUE_KEY: &'static [&'static str] = person::UNIQUE_KEY;
    const COLUMNS: &'static [&'static str] = PERSON_COLUMNS;
    const KEY_COLUMNS: &'static [&'static str] = PERSON_KEY_COLUMNS;

    fn validate(fields: &PersonName) -> Result<(), ValidationError> {
        fields.validate()
    }

    fn values(fields: &PersonName) -> Vec<Value> {
        person_values(fields)
    }
}

impl Record for Student {
    const ALIAS: &'static str = "stu";

    fn columns() -> String {
        person_columns(Self::ALIAS)
    }

    fn order_by() -> String {
        person_order_by(Self::ALIAS)
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("stu_id")?,
            name: person_from_row(row, Self::ALIAS)?,
        })
    }
}

impl Writable for Student {
    type Fields = PersonName;

    const UNIQUE_KEY: &'static [&'static str] = person::UNIQUE_KEY;
    const COLUMNS: &'static [&'static str] = PERSON_COLUMNS;
    const KEY_COLUMNS: &'static [&'static str] = PERSON_KEY_COLUMNS;

    fn validate(fields: &PersonName) -> Result<(), ValidationError> {
        fields.validate()
    }

    fn values(fields: &PersonName) -> Vec<Value> {
        person_values(fields)
    }
}

impl Record for Semester {
    const ALIAS: &'static str = "sem";

    fn columns() -> String {
        format!(
            "sem.id AS sem_id, {}, {}",
            Year::columns(),
            Period::columns()
        )
    }

    fn joins() -> String {
        "JOIN year yr ON yr.id = sem.year_id JOIN period pd ON pd.id = sem.period_id".to_string()
    }

    fn order_by() -> String {
        format!("{}, {}", Year::order_by(), Period::order_by())
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("sem_id")?,
            year: Year::from_row(row)?,
            period: Period::from_row(row)?,
        })
    }
}

impl Writable for Semester {
    type Fields = SemesterFields;

    const UNIQUE_KEY: &'static [&'static str] = SemesterFields::UNIQUE_KEY;
    const COLUMNS: &'static [&'static str] = &["year_id", "period_id"];
    const KEY_COLUMNS: &'static [&'static str] = &["year_id", "period_id"];

    fn validate(fields: &SemesterFields) -> Result<(), ValidationError> {
        fields.validate()
    }

    fn values(fields: &SemesterFields) -> Vec<Value> {
        vec![
            Value::Integer(fields.year.get()),
            Value::Integer(fields.period.get()),
        ]
    }

    fn references(fields: &SemesterFields) -> Vec<ForeignKey> {
        vec![
            ForeignKey::to("year", fields.year),
            ForeignKey::to("period", fields.period),
        ]
    }
}

impl Record for Section {
    const ALIAS: &'static str = "sec";

    fn columns() -> String {
        format!(
            "sec.id AS sec_id, sec.name AS sec_name, {}, {}, {}",
            Semester::columns(),
            Course::columns(),
            Instructor::columns()
        )
    }

    fn joins() -> String {
        format!(
            "JOIN semester sem ON sem.id = sec.semester_id {} \
             JOIN course crs ON crs.id = sec.course_id \
             JOIN instructor ins ON ins.id = sec.instructor_id",
            Semester::joins()
        )
    }

    fn order_by() -> String {
        format!(
            "{}, {}, sec.name",
            Course::order_by(),
            Semester::order_by()
        )
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("sec_id")?,
            name: row.get("sec_name")?,
            semester: Semester::from_row(row)?,
            course: Course::from_row(row)?,
            instructor: Instructor::from_row(row)?,
        })
    }
}

impl Writable for Section {
    type Fields = SectionFields;

    const UNIQUE_KEY: &'static [&'static str] = SectionFields::UNIQUE_KEY;
    const COLUMNS: &'static [&'static str] =
        &["name", "semester_id", "course_id", "instructor_id"];
    const KEY_COLUMNS: &'static [&'static str] = &["semester_id", "course_id", "name"];

    fn validate(fields: &SectionFields) -> Result<(), ValidationError> {
        fields.validate()
    }

    fn values(fields: &SectionFields) -> Vec<Value> {
        vec![
            text(&fields.name),
            Value::Integer(fields.semester.get()),
            Value::Integer(fields.course.get()),
            Value::Integer(fields.instructor.get()),
        ]
    }

    fn references(fields: &SectionFields) -> Vec<ForeignKey> {
        vec![
            ForeignKey::to("semester", fields.semester),
            ForeignKey::to("course", fields.course),
            ForeignKey::to("instructor", fields.instructor),
        ]
    }
}

impl Record for Registration {
    const ALIAS: &'static str = "reg";

    fn columns() -> String {
        format!("reg.id AS reg_id, {}, {}", Section::columns(), Student::columns())
    }

    fn joins() -> String {
        format!(
            "JOIN section sec ON sec.id = reg.section_id {} \
             JOIN student stu ON stu.id = reg.student_id",
            Section::joins()
        )
    }

    fn order_by() -> String {
        format!("{}, {}", Student::order_by(), Section::order_by())
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("reg_id")?,
            section: Section::from_row(row)?,
            student: Student::from_row(row)?,
        })
    }
}

impl Writable for Registration {
    type Fields = RegistrationFields;

    const UNIQUE_KEY: &'static [&'static str] = RegistrationFields::UNIQUE_KEY;
    const COLUMNS: &'static [&'static str] = &["section_id", "student_id"];
    const KEY_COLUMNS: &'static [&'static str] = &["section_id", "student_id"];

    fn validate(fields: &RegistrationFields) -> Result<(), ValidationError> {
        fields.validate()
    }

    fn values(fields: &RegistrationFields) -> Vec<Value> {
        vec![
            Value::Integer(fields.section.get()),
            Value::Integer(fields.student.get()),
        ]
    }

    fn references(fields: &RegistrationFields) -> Vec<ForeignKey> {
        vec![
            ForeignKey::to("section", fields.section),
            ForeignKey::to("student", fields.student),
        ]
    }
}
