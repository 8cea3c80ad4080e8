//! Loads per-team revenue sheets and derives the views a revenue dashboard draws: team totals,
//! a ranking with stars, a long-format date series, and team-filtered tables.

pub mod args;
pub mod commands;
mod config;
mod error;
pub mod loader;
pub mod model;
pub mod output;
pub mod pipeline;
#[cfg(test)]
mod test;
mod utils;

pub use config::{default_path, Config};
pub use error::{Error, ErrorType, Result};
pub use loader::{load, load_from_reader};
