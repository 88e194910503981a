use std::path::Path;

use clap::Parser;
use courseinfo::{
    Catalog, EntityKind, Id, Reference,
    domain::{Course, Instructor, Period, Registration, Section, Semester, Student, Year},
    storage,
};
use dialoguer::Confirm;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Delete a record and the records that depend on it")]
pub struct Delete {
    /// The kind of record to delete
    kind: EntityKind,

    /// The identifier of the record
    id: i64,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    yes: bool,

    /// Show what would be deleted without deleting anything
    #[arg(long)]
    dry_run: bool,
}

impl Delete {
    #[instrument(skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut catalog = Catalog::open(root)?;
        let reference = Reference::new(self.kind, self.id);

        let target = catalog.resolve(reference)?;
        let dependants = catalog.dependants(reference)?;

        println!("{} {target}", reference.to_string().warning());
        if !dependants.is_empty() {
            println!(
                "{}",
                format!("The following {} records will also be deleted:", dependants.len()).dim()
            );
            for dependant in &dependants {
                let record = catalog.resolve(*dependant)?;
                println!("  • {record} {}", dependant.to_string().info());
            }
        }

        if self.dry_run {
            println!("{}", "Dry run, nothing deleted.".dim());
            return Ok(());
        }

        if !self.yes {
            let confirmed = Confirm::new()
                .with_prompt(format!("Delete {reference}?"))
                .default(false)
                .interact()?;
            if !confirmed {
                println!("Cancelled");
                return Ok(());
            }
        }

        delete(&mut catalog, reference)?;
        println!("{} {reference}", "Deleted".success());
        Ok(())
    }
}

fn delete(catalog: &mut Catalog, reference: Reference) -> Result<(), storage::Error> {
    let id = reference.id();
    match reference.kind() {
        EntityKind::Year => catalog.delete::<Year>(Id::new(id)),
        EntityKind::Period => catalog.delete::<Period>(Id::new(id)),
        EntityKind::Course => catalog.delete::<Course>(Id::new(id)),
        EntityKind::Instructor => catalog.delete::<Instructor>(Id::new(id)),
        EntityKind::Student => catalog.delete::<Student>(Id::new(id)),
        EntityKind::Semester => catalog.delete::<Semester>(Id::new(id)),
        EntityKind::Section => catalog.delete::<Section>(Id::new(id)),
        EntityKind::Registration => catalog.delete::<Registration>(Id::new(id)),
    }
}

#[cfg(test)]
mod tests {
    use courseinfo::bootstrap::seed_registration;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn dry_run_keeps_records() {
        let tmp = tempdir().unwrap();
        let mut catalog = Catalog::open(tmp.path()).unwrap();
        seed_registration(&mut catalog).unwrap();
        drop(catalog);

        Delete {
            kind: EntityKind::Course,
            id: 1,
            yes: false,
            dry_run: true,
        }
        .run(tmp.path())
        .expect("dry run should succeed");

        let catalog = Catalog::open(tmp.path()).unwrap();
        assert_eq!(catalog.count(EntityKind::Course).unwrap(), 1);
        assert_eq!(catalog.count(EntityKind::Registration).unwrap(), 1);
    }

    #[test]
    fn confirmed_delete_cascades() {
        let tmp = tempdir().unwrap();
        let mut catalog = Catalog::open(tmp.path()).unwrap();
        seed_registration(&mut catalog).unwrap();
        drop(catalog);

        Delete {
            kind: EntityKind::Course,
            id: 1,
            yes: true,
            dry_run: false,
        }
        .run(tmp.path())
        .expect("delete should succeed");

        let catalog = Catalog::open(tmp.path()).unwrap();
        assert_eq!(catalog.count(EntityKind::Course).unwrap(), 0);
        assert_eq!(catalog.count(EntityKind::Section).unwrap(), 0);
        assert_eq!(catalog.count(EntityKind::Registration).unwrap(), 0);
        assert_eq!(catalog.count(EntityKind::Semester).unwrap(), 1);
    }

    #[test]
    fn missing_record_is_not_found() {
        let tmp = tempdir().unwrap();
        let error = Delete {
            kind: EntityKind::Student,
            id: 4,
            yes: true,
            dry_run: false,
        }
        .run(tmp.path())
        .unwrap_err();

        assert!(matches!(
            error.downcast_ref::<storage::Error>(),
            Some(storage::Error::NotFound { .. })
        ));
    }
}
