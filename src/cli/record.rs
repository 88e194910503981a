use clap::Subcommand;
use courseinfo::{
    Catalog, Id, Reference,
    domain::{
        Course, CourseFields, Instructor, Period, PeriodFields, PersonName, Registration,
        RegistrationFields, Section, SectionFields, Semester, SemesterFields, Student, Year,
        YearFields,
    },
    storage::{self, Writable},
};

/// The fields of one record, by kind.
///
/// References to other records are given by identifier.
#[derive(Debug, Clone, Subcommand)]
pub enum RecordArgs {
    /// A calendar year
    Year {
        /// The year, e.g. 2022
        year: i32,
    },

    /// A grading period
    Period {
        /// Position of the period within the year
        sequence: i32,
        /// The period name, e.g. Spring
        name: String,
    },

    /// A course
    Course {
        /// The course number, e.g. IS439
        number: String,
        /// The course name
        name: String,
    },

    /// An instructor
    Instructor {
        #[command(flatten)]
        name: NameArgs,
    },

    /// A student
    Student {
        #[command(flatten)]
        name: NameArgs,
    },

    /// A year and period pairing
    Semester {
        /// Identifier of the year
        #[arg(long)]
        year: i64,
        /// Identifier of the period
        #[arg(long)]
        period: i64,
    },

    /// An offering of a course in a semester
    Section {
        /// The section name, e.g. OAG
        name: String,
        /// Identifier of the semester
        #[arg(long)]
        semester: i64,
        /// Identifier of the course
        #[arg(long)]
        course: i64,
        /// Identifier of the instructor
        #[arg(long)]
        instructor: i64,
    },

    /// A student's enrollment in a section
    Registration {
        /// Identifier of the section
        #[arg(long)]
        section: i64,
        /// Identifier of the student
        #[arg(long)]
        student: i64,
    },
}

#[derive(Debug, Clone, clap::Args)]
pub struct NameArgs {
    /// Given name
    first_name: String,

    /// Family name
    last_name: String,

    /// Distinguishes people who share a name
    #[arg(long, default_value = "")]
    disambiguator: String,
}

impl From<NameArgs> for PersonName {
    fn from(args: NameArgs) -> Self {
        Self::new(args.first_name, args.last_name, args.disambiguator)
    }
}

/// Whether to write a new record or overwrite an existing one.
#[derive(Debug, Clone, Copy)]
enum Mode {
    Create,
    Update(i64),
}

impl RecordArgs {
    /// Store the fields as a new record.
    pub fn create(self, catalog: &mut Catalog) -> Result<Reference, storage::Error> {
        self.write(catalog, Mode::Create)
    }

    /// Overwrite the record with the identifier `id`.
    pub fn update(self, catalog: &mut Catalog, id: i64) -> Result<Reference, storage::Error> {
        self.write(catalog, Mode::Update(id))
    }

    fn write(self, catalog: &mut Catalog, mode: Mode) -> Result<Reference, storage::Error> {
        match self {
            Self::Year { year } => write::<Year>(catalog, mode, &YearFields { year }),
            Self::Period { sequence, name } => {
                write::<Period>(catalog, mode, &PeriodFields::new(sequence, name))
            }
            Self::Course { number, name } => {
                write::<Course>(catalog, mode, &CourseFields::new(number, name))
            }
            Self::Instructor { name } => {
                write::<Instructor>(catalog, mode, &PersonName::from(name))
            }
            Self::Student { name } => write::<Student>(catalog, mode, &PersonName::from(name)),
            Self::Semester { year, period } => write::<Semester>(
                catalog,
                mode,
                &SemesterFields {
                    year: Id::new(year),
                    period: Id::new(period),
                },
            ),
            Self::Section {
                name,
                semester,
                course,
                instructor,
            } => write::<Section>(
                catalog,
                mode,
                &SectionFields {
                    name,
                    semester: Id::new(semester),
                    course: Id::new(course),
                    instructor: Id::new(instructor),
                },
            ),
            Self::Registration { section, student } => write::<Registration>(
                catalog,
                mode,
                &RegistrationFields {
                    section: Id::new(section),
                    student: Id::new(student),
                },
            ),
        }
    }
}

fn write<R: Writable>(
    catalog: &mut Catalog,
    mode: Mode,
    fields: &R::Fields,
) -> Result<Reference, storage::Error> {
    let id = match mode {
        Mode::Create => catalog.create::<R>(fields)?,
        Mode::Update(raw) => {
            let id = Id::new(raw);
            catalog.update::<R>(id, fields)?;
            id
        }
    };
    Ok(id.reference())
}
