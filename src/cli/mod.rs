//! CLI support for staffql
//!
//! Provides programmatic access to the staffql commands, so the binary stays
//! a thin argument parser and everything here can be tested directly.

mod check;
mod docs;
mod interactive;
mod scripts;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use docs::{DocTopic, get_doc_topic, get_docs_overview};
pub use interactive::{Repl, ReplStep, run_interactive};
pub use scripts::{BatchSummary, extract_scripts, list_scripts, run_all, script_file_name, write_extracted};

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Execution error: {0}")]
    Exec(#[from] crate::StatementError),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No script provided. Pass a file or pipe a script to stdin.")]
    NoInput,

    #[error("Unknown topic: '{0}'\nRun 'staffql docs' to see available topics.")]
    UnknownTopic(String),
}

impl CliError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> CliError {
        let path = path.into();
        move |source| CliError::Io { path, source }
    }
}
