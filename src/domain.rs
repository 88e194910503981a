//! Domain models for the course catalog.
//!
//! This module contains the record types, their writable field sets and
//! validation rules, typed identifiers, and the detail views returned by
//! the storage layer.

mod config;
pub use config::{Config, FILE_NAME as CONFIG_FILE_NAME};

mod course;
pub use course::{Course, CourseFields};

pub mod detail;
pub use detail::{
    CourseDetail, InstructorDetail, PeriodDetail, RecordDetail, RegistrationDetail,
    SectionDetail, SemesterDetail, StudentDetail, YearDetail,
};

mod id;
pub use id::{Entity, Id, Reference, ReferenceError};

mod kind;
pub use kind::{EntityKind, UnknownKindError};

pub mod person;
pub use person::{Instructor, PersonName, Student};

mod period;
pub use period::{Period, PeriodFields};

mod registration;
pub use registration::{Registration, RegistrationFields};

mod section;
pub use section::{Section, SectionFields};

mod semester;
pub use semester::{Semester, SemesterFields};

mod validation;
pub use validation::{DuplicateRecord, ValidationError};

mod year;
pub use year::{Year, YearFields};
