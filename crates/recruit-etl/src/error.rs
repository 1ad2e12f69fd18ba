//! Error type for the orchestration layer.
//!
//! Every variant aborts the run. Row-level problems never reach this type;
//! they are reported as rejections by the transform stage.

use recruit_core::dimension::Dimension;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("configuration error: {0}")]
  Config(#[from] config::ConfigError),

  #[error("invalid delimiter {0:?}: expected a single ASCII character")]
  Delimiter(String),

  #[error("extract/export error: {0}")]
  Extract(#[from] recruit_transform::Error),

  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),

  #[error("warehouse error: {0}")]
  Warehouse(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// A cleaned application refers to a natural key its dimension does not
  /// hold. Raised before any fact row is written.
  #[error("{dimension} has no surrogate key for {natural_key:?}")]
  UnresolvedKey { dimension: Dimension, natural_key: String },

  #[error("{0} fact references point at missing dimension rows")]
  DanglingReferences(usize),
}

impl Error {
  pub fn warehouse(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Warehouse(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
