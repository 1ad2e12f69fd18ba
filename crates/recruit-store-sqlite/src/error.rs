//! Error type for `recruit-store-sqlite`.

use recruit_core::dimension::Dimension;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A member of one dimension was passed to another dimension's upsert.
  #[error("cannot upsert a {found} member into {expected}")]
  DimensionMismatch { expected: Dimension, found: Dimension },

  #[error("value out of range for {column}: {value}")]
  OutOfRange { column: &'static str, value: i64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
