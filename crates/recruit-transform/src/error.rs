//! Error types for the extract and export stages.
//!
//! Row-level problems are not errors; they surface as
//! [`Rejection`](crate::transform::Rejection)s. Everything here aborts the run.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("source file not found: {0}")]
  SourceNotFound(PathBuf),

  #[error("i/o error on {path}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  #[error("expected {expected} columns, found {found}")]
  ColumnCount { expected: usize, found: usize },

  #[error("missing required column {0:?}")]
  MissingColumn(&'static str),

  #[error("line {line}: expected {expected} fields, found {found}")]
  RowWidth { line: usize, expected: usize, found: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
