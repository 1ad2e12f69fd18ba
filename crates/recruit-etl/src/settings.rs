//! Pipeline configuration.
//!
//! Read from an optional TOML file layered under `RECRUIT_*` environment
//! variables (nested keys use `__`, e.g. `RECRUIT_WAREHOUSE__PATH`). Every
//! field has a default, so an empty configuration is valid.

use std::path::{Path, PathBuf};

use recruit_core::seniority::SeniorityMatrix;
use serde::Deserialize;

use crate::{Error, Result};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Location of the warehouse database.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WarehouseConfig {
  pub path: PathBuf,
}

impl Default for WarehouseConfig {
  fn default() -> Self { Self { path: PathBuf::from("data/warehouse.sqlite3") } }
}

/// Runtime pipeline configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
  /// Raw candidate feed.
  pub source_path:      PathBuf,
  /// Where the cleaned dataset is written for audit.
  pub processed_path:   PathBuf,
  /// Field separator of the raw feed.
  pub delimiter:        String,
  pub warehouse:        WarehouseConfig,
  /// Replaces the built-in seniority matrix when set.
  pub seniority_matrix: Option<SeniorityMatrix>,
}

impl Default for PipelineConfig {
  fn default() -> Self {
    Self {
      source_path:      PathBuf::from("data/raw/candidates.csv"),
      processed_path:   PathBuf::from("data/processed/candidates_clean.csv"),
      delimiter:        ";".to_owned(),
      warehouse:        WarehouseConfig::default(),
      seniority_matrix: None,
    }
  }
}

impl PipelineConfig {
  /// Load from `path` (if it exists) and the environment.
  pub fn load(path: &Path) -> Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("RECRUIT")
          .prefix_separator("_")
          .separator("__"),
      )
      .build()?;
    let cfg: Self = settings.try_deserialize()?;
    cfg.delimiter_byte()?;
    Ok(cfg)
  }

  /// The delimiter as the single byte the CSV reader expects.
  pub fn delimiter_byte(&self) -> Result<u8> {
    match self.delimiter.as_bytes() {
      [b] if b.is_ascii() => Ok(*b),
      _ => Err(Error::Delimiter(self.delimiter.clone())),
    }
  }

  /// The matrix the transform stage classifies seniority with.
  pub fn matrix(&self) -> SeniorityMatrix {
    self.seniority_matrix.clone().unwrap_or_default()
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;

  #[test]
  fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = PipelineConfig::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(cfg.source_path, PathBuf::from("data/raw/candidates.csv"));
    assert_eq!(cfg.delimiter_byte().unwrap(), b';');
    assert_eq!(cfg.matrix(), SeniorityMatrix::standard());
  }

  #[test]
  fn reads_toml_with_matrix_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recruit-etl.toml");
    fs::write(
      &path,
      r#"
source_path = "in/feed.csv"
delimiter = ","

[warehouse]
path = "out/dw.sqlite3"

[[seniority_matrix]]
yoe = { min = 0 }
score = { min = 0, max = 8 }
label = "Contributor"

[[seniority_matrix]]
yoe = { min = 0 }
score = { min = 8 }
label = "expert"
"#,
    )
    .unwrap();

    let cfg = PipelineConfig::load(&path).unwrap();
    assert_eq!(cfg.source_path, PathBuf::from("in/feed.csv"));
    assert_eq!(cfg.processed_path, PathBuf::from("data/processed/candidates_clean.csv"));
    assert_eq!(cfg.warehouse.path, PathBuf::from("out/dw.sqlite3"));
    assert_eq!(cfg.delimiter_byte().unwrap(), b',');

    let m = cfg.matrix();
    assert_eq!(m.classify(30, 7), Some("contributor"));
    assert_eq!(m.classify(0, 9), Some("expert"));
  }

  #[test]
  fn rejects_multi_character_delimiter() {
    let cfg = PipelineConfig { delimiter: "||".into(), ..Default::default() };
    assert!(matches!(cfg.delimiter_byte(), Err(Error::Delimiter(_))));
  }
}
