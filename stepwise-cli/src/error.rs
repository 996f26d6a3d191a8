use crate::{config::ConfigError, render::RenderError};
use ariadne::{Color, Fmt};
use std::{io, path::PathBuf, process::ExitCode};
use thiserror::Error;

/// Utility enum to package errors that stop the program.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The input file does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The input file contains no inputs.
    #[error("no equations found in: {}", .0.display())]
    NoInputs(PathBuf),

    /// The animation could not be rendered.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Reading input or writing results failed.
    #[error("{0}")]
    Io(#[from] io::Error),

    /// The interactive prompt failed.
    #[error("{0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

impl Error {
    /// The exit code to terminate with.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Config(_) => ExitCode::from(2),
            _ => ExitCode::FAILURE,
        }
    }

    /// Report this error to stderr.
    pub fn report_to_stderr(&self) {
        eprintln!("{}: {}", "error".fg(Color::Red), self);
    }
}
