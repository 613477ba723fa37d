//! Runtime configuration for the grid reporter.

use std::path::PathBuf;

/// Grid file read when no path is given.
pub const DEFAULT_GRID_PATH: &str = "grid.json";

/// How the report is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One log line per segment, on stderr.
    #[default]
    Text,
    /// A pretty-printed JSON report, on stdout.
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the grid JSON file.
    pub grid_path: PathBuf,

    pub format: OutputFormat,

    /// Log segment resolution and race totals as well as the report.
    pub verbose: bool,
}

impl Config {
    pub fn new(grid_path: impl Into<PathBuf>) -> Self {
        Self {
            grid_path: grid_path.into(),
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Log filter directive used when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_path: PathBuf::from(DEFAULT_GRID_PATH),
            format: OutputFormat::Text,
            verbose: false,
        }
    }
}
