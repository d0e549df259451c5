//! Line-oriented command shell over the mutation pipeline.
//!
//! Commands are read from stdin one per line, so the shell works both
//! interactively and as a script target.

pub mod help;
pub mod output;
pub mod shell;
pub mod shell_context;

use thiserror::Error;

use crate::core::errors::LedgerError;

pub use shell::run_cli;
pub use shell_context::ShellContext;

/// Fatal shell failures: the session cannot start or its input broke.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a single command; reported and the session continues.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("{0}")]
    Usage(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}
