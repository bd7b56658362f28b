mod logging;
mod summary;
mod tui;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use revcal_core::{CsvTransactionSource, HeatmapConfig, HeatmapController, HeatmapSession};

#[derive(Parser)]
#[command(name = "revcal")]
#[command(about = "Calendar heatmap of daily revenue", long_about = None)]
struct Cli {
    /// Transaction log with InvoiceDate, Quantity, UnitPrice and Discount columns
    #[arg(short, long, global = true, default_value = "data.csv")]
    file: PathBuf,

    /// JSON config file (default: ~/.revcal/config.json if it exists)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Year to show first
    #[arg(short, long, global = true)]
    year: Option<i32>,

    /// Earliest year reachable with prev
    #[arg(long, global = true)]
    min_year: Option<i32>,

    /// Latest year reachable with next
    #[arg(long, global = true)]
    max_year: Option<i32>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the interactive heatmap
    Tui,
    /// Print the days of a year as a table
    Summary,
    /// Write the year view as JSON
    Export {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    fn resolve_config(&self) -> Result<HeatmapConfig> {
        let mut config = HeatmapConfig::load(self.config.as_deref())?;
        if let Some(min) = self.min_year {
            config.min_year = min;
        }
        if let Some(max) = self.max_year {
            config.max_year = max;
        }
        if let Some(year) = self.year {
            config.default_year = year;
        }
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

fn load_session(cli: &Cli) -> Result<HeatmapSession> {
    let config = cli.resolve_config()?;
    let source = CsvTransactionSource::new(Some(cli.file.clone()));

    let mut controller = HeatmapController::new(config);
    if controller.load(&source).is_err() {
        if let Some(err) = controller.failure() {
            anyhow::bail!("Could not load {}: {}", cli.file.display(), err);
        }
    }
    Ok(controller.into_session()?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Summary) => {
            logging::setup_stderr_logging();
            let session = load_session(&cli)?;
            summary::show_summary(&session);
        }
        Some(Commands::Export { output }) => {
            logging::setup_stderr_logging();
            let session = load_session(&cli)?;
            let json = serde_json::to_string_pretty(&session.year_view())?;
            match output {
                Some(path) => {
                    fs::write(path, json)
                        .with_context(|| format!("Could not write {}", path.display()))?;
                    tracing::info!(path = %path.display(), "exported year view");
                }
                None => println!("{}", json),
            }
        }
        Some(Commands::Tui) | None => {
            // The TUI takes over stdout, so logs go to a file
            if let Err(err) = logging::setup_file_logging() {
                eprintln!("Warning: file logging disabled: {}", err);
            }
            // Loading finishes before the terminal is touched
            let session = load_session(&cli)?;
            tui::run(session)?;
        }
    }
    Ok(())
}
