use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use race_grid::config::{Config, DEFAULT_GRID_PATH, OutputFormat};
use race_grid::grid::CourseGrid;
use race_grid::report::GridReport;

#[derive(Parser)]
#[command(
    name = "race-grid",
    about = "Validate a race pacing grid and report the pace needed to finish"
)]
struct Cli {
    /// Path to the JSON file holding the course and its race segments
    #[arg(long, default_value = DEFAULT_GRID_PATH)]
    grid: PathBuf,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config::new(cli.grid)
            .with_format(cli.format)
            .with_verbose(cli.verbose)
    }
}

fn main() -> Result<()> {
    let config = Config::from(Cli::parse());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let grid = CourseGrid::load(&config.grid_path).with_context(|| {
        format!("Invalid pace grid file {}", config.grid_path.display())
    })?;
    let report = GridReport::from_grid(&grid).context("Failed to finish a race")?;

    match config.format {
        OutputFormat::Text => report.log(),
        OutputFormat::Json => println!("{}", report.to_json_pretty()?),
    }

    Ok(())
}
