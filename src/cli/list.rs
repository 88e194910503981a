use std::{fmt::Display, path::Path};

use clap::Parser;
use courseinfo::{
    Catalog, EntityKind, Reference,
    domain::{Course, Entity, Instructor, Period, Registration, Section, Semester, Student, Year},
    storage::Record,
};
use serde::Serialize;
use tracing::instrument;

use super::{OutputFormat, terminal::Colorize};

/// Command arguments for `courseinfo list`.
#[derive(Debug, Parser)]
#[command(about = "List the records of one kind in their default order")]
pub struct List {
    /// The kind of record to list, e.g. `course` or `sections`
    kind: EntityKind,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

/// One listed record, tagged with its reference.
#[derive(Debug, Serialize)]
struct Row<'a, R> {
    reference: Reference,
    #[serde(flatten)]
    record: &'a R,
}

impl List {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let catalog = Catalog::open(root)?;
        let output = self.output;
        match self.kind {
            EntityKind::Year => render::<Year>(&catalog, output),
            EntityKind::Period => render::<Period>(&catalog, output),
            EntityKind::Course => render::<Course>(&catalog, output),
            EntityKind::Instructor => render::<Instructor>(&catalog, output),
            EntityKind::Student => render::<Student>(&catalog, output),
            EntityKind::Semester => render::<Semester>(&catalog, output),
            EntityKind::Section => render::<Section>(&catalog, output),
            EntityKind::Registration => render::<Registration>(&catalog, output),
        }
    }
}

fn render<R>(catalog: &Catalog, output: OutputFormat) -> anyhow::Result<()>
where
    R: Record + Serialize + Display,
{
    let records = catalog.list::<R>()?;
    match output {
        OutputFormat::Pretty => print!("{}", pretty(&records)),
        OutputFormat::Json => {
            let rows: Vec<_> = records
                .iter()
                .map(|record| Row {
                    reference: record.reference(),
                    record,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }
    Ok(())
}

/// One line per record, or a notice if there are none.
fn pretty<R: Entity + Display>(records: &[R]) -> String {
    if records.is_empty() {
        return format!("There are no {} available.\n", R::KIND.plural());
    }

    let width = records
        .iter()
        .map(|record| record.reference().to_string().len())
        .max()
        .unwrap_or_default();

    records
        .iter()
        .map(|record| {
            let reference = format!("{:<width$}", record.reference().to_string());
            format!("{}  {record}\n", reference.info())
        })
        .collect()
}
