//! These structs provide the CLI interface for the revenue CLI.

use crate::output::OutputFormat;
use crate::pipeline::Selection;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

/// revenue: derive team totals, rankings and date series from a revenue sheet.
///
/// The revenue sheet is a CSV file with one row per team record. It must have a TEAMS column and
/// a TOTAL column; every other column is treated as a date, e.g. 27/05/2024, holding the amount
/// collected on that day.
///
/// Name the file with --data, or run `revenue init` once to write a config file that remembers
/// it.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Write a config file that names the revenue CSV.
    Init(InitArgs),
    /// Print record, team and date counts and the grand total.
    Summary,
    /// List the distinct team names in the order they appear.
    Teams,
    /// Print the total revenue of each team.
    Totals,
    /// Rank the teams by total revenue, highest first, with stars.
    Rank,
    /// Print one (team, date, amount) row per record and date column.
    Melt,
    /// Print the total revenue collected on each date.
    Dates,
    /// Print the records of selected teams.
    Filter(FilterArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The config file to use. Defaults to team-revenue/config.json in your config directory, if
    /// it exists.
    #[arg(long, env = "REVENUE_CONFIG")]
    config: Option<PathBuf>,

    /// The revenue CSV to load. Overrides the data_path in the config file.
    #[arg(long, env = "REVENUE_DATA")]
    data: Option<PathBuf>,

    /// How to print the result.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl Common {
    pub fn new(
        log_level: LevelFilter,
        config: Option<PathBuf>,
        data: Option<PathBuf>,
        format: OutputFormat,
    ) -> Self {
        Self {
            log_level,
            config,
            data,
            format,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn config(&self) -> Option<&Path> {
        self.config.as_deref()
    }

    pub fn data(&self) -> Option<&Path> {
        self.data.as_deref()
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// Args for the `revenue init` command.
#[derive(Debug, ClapArgs, Clone)]
pub struct InitArgs {
    /// The revenue CSV. A relative path is resolved against the config file's directory.
    #[arg(long)]
    data_path: PathBuf,

    /// Where to write the config file. Defaults to the --config location, then to
    /// team-revenue/config.json in your config directory.
    #[arg(long)]
    output: Option<PathBuf>,
}

impl InitArgs {
    pub fn new(data_path: impl Into<PathBuf>, output: Option<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            output,
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}

/// Args for the `revenue filter` command.
#[derive(Debug, ClapArgs, Clone)]
pub struct FilterArgs {
    /// Include every team.
    #[arg(long, conflicts_with = "team")]
    all: bool,

    /// A team to include. Repeat for more teams. Giving no team and no --all selects nothing.
    #[arg(long = "team", short = 't')]
    team: Vec<String>,
}

impl FilterArgs {
    pub fn new(all: bool, team: Vec<String>) -> Self {
        Self { all, team }
    }

    /// The selection these arguments describe.
    pub fn selection(&self) -> Selection {
        if self.all {
            Selection::All
        } else {
            Selection::teams(self.team.iter().cloned())
        }
    }
}
