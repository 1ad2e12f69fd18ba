//! The `Warehouse` trait.
//!
//! Implemented by storage backends (e.g. `recruit-store-sqlite`). The loader
//! in `recruit-etl` depends on this abstraction, not on any concrete engine.

use std::future::Future;

use crate::dimension::{Dimension, DimensionMember, FactApplication, KeyMap};

/// A star-schema warehouse.
///
/// Dimensions grow insert-only: a natural key already present is never
/// updated. Facts are append-only.
///
/// Callers must finish every `upsert_dimension` before calling
/// `resolve_surrogate_keys`, and must use the same instance for both so that
/// keys written in this run are visible.
pub trait Warehouse: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Create every table and index that does not exist yet. Safe to call on
  /// every run.
  fn ensure_schema(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Insert the members of `dimension` whose natural key is not stored yet.
  ///
  /// Duplicate natural keys within `members` collapse to the first
  /// occurrence. Returns the number of rows inserted.
  fn upsert_dimension(
    &self,
    dimension: Dimension,
    members: Vec<DimensionMember>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Read the full natural-key → surrogate-key mapping of `dimension`.
  fn resolve_surrogate_keys(
    &self,
    dimension: Dimension,
  ) -> impl Future<Output = Result<KeyMap, Self::Error>> + Send + '_;

  /// Append fact rows whose surrogate keys are already resolved. Returns the
  /// number of rows inserted.
  fn load_fact(
    &self,
    facts: Vec<FactApplication>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;
}
