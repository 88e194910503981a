use std::{
    path::{Path, PathBuf},
    process,
};

mod delete;
mod list;
mod record;
mod show;
mod status;
mod terminal;

use clap::ArgAction;
use courseinfo::{Catalog, Config, domain::CONFIG_FILE_NAME, storage};
use delete::Delete;
use list::List;
use record::RecordArgs;
use show::Show;
use status::Status;
use terminal::Colorize;
use tracing::instrument;

/// Exit status for a record that does not exist.
const EXIT_NOT_FOUND: i32 = 4;

/// Exit status for a rejected write.
const EXIT_INVALID: i32 = 2;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The directory holding the catalog
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let result = self
            .command
            .unwrap_or_else(|| Command::Status(Status::default()))
            .run(self.root);

        match result {
            Err(error) => match error.downcast_ref::<storage::Error>() {
                Some(storage::Error::NotFound { .. }) => {
                    eprintln!("{}", error.to_string().warning());
                    process::exit(EXIT_NOT_FOUND);
                }
                Some(
                    storage::Error::ValidationFailure(_)
                    | storage::Error::DuplicateRecord(_)
                    | storage::Error::NotEmpty,
                ) => {
                    eprintln!("{}", error.to_string().warning());
                    process::exit(EXIT_INVALID);
                }
                _ => Err(error),
            },
            Ok(()) => Ok(()),
        }
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show record counts (default)
    Status(Status),

    /// Initialize a new catalog
    Init,

    /// List the records of one kind
    List(List),

    /// Show one record and its related records
    Show(Show),

    /// Add a record
    #[command(subcommand)]
    Add(RecordArgs),

    /// Replace the fields of a record
    Update(Update),

    /// Delete a record and everything that depends on it
    Delete(Delete),

    /// Load a demonstration catalog
    Seed,
}

impl Command {
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        match self {
            Self::Status(command) => command.run(&root)?,
            Self::Init => init(&root)?,
            Self::List(command) => command.run(&root)?,
            Self::Show(command) => command.run(&root)?,
            Self::Add(record) => add(&root, record)?,
            Self::Update(command) => command.run(&root)?,
            Self::Delete(command) => command.run(&root)?,
            Self::Seed => seed(&root)?,
        }
        Ok(())
    }
}

#[instrument]
fn init(root: &Path) -> anyhow::Result<()> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!("Catalog already initialized (found existing {CONFIG_FILE_NAME})");
    }

    std::fs::create_dir_all(root)
        .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", root.display()))?;

    let config = Config::default();
    config
        .save(&config_path)
        .map_err(|e| anyhow::anyhow!("Failed to create {CONFIG_FILE_NAME}: {e}"))?;
    Catalog::open_with_config(root, &config)?;

    println!("Initialized course catalog in {}", root.display());
    println!("  Created: {CONFIG_FILE_NAME}");
    println!("  Created: {}", config.database_path(root).display());
    println!();
    println!("Next steps:");
    println!("  courseinfo add course IS439 \"Web Development\"");
    println!("  courseinfo seed");

    Ok(())
}

#[instrument(skip(record))]
fn add(root: &Path, record: RecordArgs) -> anyhow::Result<()> {
    let mut catalog = Catalog::open(root)?;
    let reference = record.create(&mut catalog)?;
    println!("{} {reference}", "Created".success());
    Ok(())
}

#[derive(Debug, clap::Parser)]
pub struct Update {
    /// The identifier of the record to update
    id: i64,

    #[command(subcommand)]
    record: RecordArgs,
}

impl Update {
    #[instrument(skip(self))]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut catalog = Catalog::open(root)?;
        let reference = self.record.update(&mut catalog, self.id)?;
        println!("{} {reference}", "Updated".success());
        Ok(())
    }
}

#[instrument]
fn seed(root: &Path) -> anyhow::Result<()> {
    let mut catalog = Catalog::open(root)?;
    courseinfo::bootstrap::seed_demo(&mut catalog)?;
    println!("{}", "Loaded demonstration catalog".success());
    println!("{}", "Run 'courseinfo list sections' to browse it.".dim());
    Ok(())
}

/// Output formats for record listings and detail views.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
}
