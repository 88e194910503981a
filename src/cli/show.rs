use std::{fmt::Display, path::Path};

use clap::Parser;
use courseinfo::{
    Catalog, EntityKind, RecordDetail, Reference,
    domain::{Entity, ReferenceError},
};
use tracing::instrument;

use super::{OutputFormat, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Display a record together with its related records")]
pub struct Show {
    /// A reference such as `/section/1/`, or a record kind followed by an
    /// identifier
    target: String,

    /// The identifier, when the target is a record kind
    id: Option<i64>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Show {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let reference = self.reference()?;
        let catalog = Catalog::open(root)?;
        let detail = catalog.resolve(reference)?;

        match self.output {
            OutputFormat::Pretty => print!("{}", pretty(&detail)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&detail)?),
        }
        Ok(())
    }

    fn reference(&self) -> Result<Reference, ReferenceError> {
        match self.id {
            Some(id) => {
                let kind: EntityKind = self.target.parse()?;
                Ok(Reference::new(kind, id))
            }
            None => self.target.parse(),
        }
    }
}

fn pretty(detail: &RecordDetail) -> String {
    let mut out = format!("# {}\n{detail}\n", detail.reference());

    match detail {
        RecordDetail::Year(detail) => {
            related(&mut out, "Semesters", &detail.semesters);
        }
        RecordDetail::Period(detail) => {
            field(&mut out, "Sequence", &detail.period.sequence);
            related(&mut out, "Semesters", &detail.semesters);
        }
        RecordDetail::Course(detail) => {
            field(&mut out, "Number", &detail.course.number);
            field(&mut out, "Name", &detail.course.name);
            related(&mut out, "Sections", &detail.sections);
        }
        RecordDetail::Instructor(detail) => {
            related(&mut out, "Sections", &detail.sections);
        }
        RecordDetail::Student(detail) => {
            related(&mut out, "Registrations", &detail.registrations);
        }
        RecordDetail::Semester(detail) => {
            link(&mut out, "Year", &detail.semester.year);
            link(&mut out, "Period", &detail.semester.period);
            related(&mut out, "Sections", &detail.sections);
        }
        RecordDetail::Section(detail) => {
            link(&mut out, "Course", &detail.section.course);
            link(&mut out, "Semester", &detail.section.semester);
            link(&mut out, "Instructor", &detail.section.instructor);
            related(&mut out, "Registrations", &detail.registrations);
        }
        RecordDetail::Registration(detail) => {
            link(&mut out, "Section", &detail.registration.section);
            link(&mut out, "Student", &detail.registration.student);
        }
    }
    out
}

fn field(out: &mut String, label: &str, value: &dyn Display) {
    out.push_str(&format!("  {:<11} {value}\n", format!("{label}:")));
}

fn link<R: Entity + Display>(out: &mut String, label: &str, record: &R) {
    let reference = record.reference().to_string().info();
    out.push_str(&format!("  {:<11} {record} {reference}\n", format!("{label}:")));
}

fn related<R: Entity + Display>(out: &mut String, heading: &str, records: &[R]) {
    out.push_str(&format!("\n{}\n", heading.dim()));
    if records.is_empty() {
        out.push_str(&format!(
            "  There are no {} available.\n",
            R::KIND.plural()
        ));
    }
    for record in records {
        let reference = record.reference().to_string().info();
        out.push_str(&format!("  • {record} {reference}\n"));
    }
}
