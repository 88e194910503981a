use std::path::Path;

use clap::Parser;
use courseinfo::{Catalog, EntityKind};
use serde::Serialize;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser, Default)]
#[command(about = "Show record counts per kind")]
pub struct Status {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress headers and format for scripting
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Serialize)]
struct Count {
    kind: EntityKind,
    count: usize,
}

#[derive(Debug, Serialize)]
struct Summary {
    kinds: Vec<Count>,
    total: usize,
}

impl Summary {
    fn load(catalog: &Catalog) -> anyhow::Result<Self> {
        let kinds = EntityKind::ALL
            .into_iter()
            .map(|kind| -> anyhow::Result<Count> {
                Ok(Count {
                    kind,
                    count: catalog.count(kind)?,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        let total = kinds.iter().map(|count| count.count).sum();
        Ok(Self { kinds, total })
    }
}

impl Status {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let catalog = Catalog::open(root)?;
        let summary = Summary::load(&catalog)?;

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
            OutputFormat::Table if self.quiet => Self::output_quiet(&summary),
            OutputFormat::Table if summary.total == 0 => {
                println!(
                    "No records found yet. Load a demonstration catalog with 'courseinfo seed'."
                );
            }
            OutputFormat::Table => Self::output_table(&summary),
        }

        Ok(())
    }

    fn output_quiet(summary: &Summary) {
        let counts: Vec<String> = summary
            .kinds
            .iter()
            .map(|count| format!("{}={}", count.kind.plural(), count.count))
            .collect();
        println!("{} total={}", counts.join(" "), summary.total);
    }

    fn output_table(summary: &Summary) {
        println!("Record counts");
        println!("{}", "─────────────".dim());
        println!("{:<14} Count", "Kind");
        for count in &summary.kinds {
            let number = count.count.to_string();
            let number = if count.count == 0 {
                number.dim()
            } else {
                number.success()
            };
            println!("{:<14} {number}", count.kind.plural());
        }
        println!("{:<14} {}", "Total", summary.total);
    }
}
