//! Command handlers for the revenue CLI.
//!
//! This module contains implementations for all CLI subcommands. Each handler returns an `Out`
//! so that the binary can print a message and the requested view in a uniform way.

mod init;
mod report;

use crate::error::{ErrorType, IntoResult};
use crate::output::{render, OutputFormat, Tabular};
use crate::Result;
use serde::Serialize;
use std::fmt::Debug;
use tracing::info;

pub use init::init;
pub use report::{dates, filter, melt, rank, summary, teams, totals};

/// The output type for a command: a message for the user and, optionally, the view that was
/// computed.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug + Tabular,
{
    /// Logs the message at `info!` and writes the structured data, if any, to stdout in `format`.
    pub fn print(&self, format: OutputFormat) -> Result<()> {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            let text = render(structure, format).pub_result(ErrorType::Output)?;
            print!("{text}");
            if !text.ends_with('\n') {
                println!();
            }
        }
        Ok(())
    }
}

/// Commands that produce no view still need to be printable.
impl Tabular for () {
    fn headers(&self) -> Vec<String> {
        Vec::new()
    }

    fn rows(&self, _pretty: bool) -> Vec<Vec<String>> {
        Vec::new()
    }
}
