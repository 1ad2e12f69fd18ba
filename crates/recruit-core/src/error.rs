//! Error types for `recruit-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid calendar date: {0:?}")]
  InvalidDate(String),

  #[error("seniority matrix has no rules")]
  EmptyMatrix,

  #[error("seniority bucket [{min}, {max}) is empty")]
  EmptyBucket { min: u32, max: u32 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
