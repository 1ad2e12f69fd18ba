//! Load: materialise cleaned applications into the star schema.
//!
//! Ordering is the correctness property here. Every dimension upsert
//! completes before any surrogate key is read, so keys minted in this run are
//! visible to the fact join; and every fact is resolved before the first one
//! is written, so an unresolved key aborts the run with nothing inserted.

use recruit_core::{
  application::Application,
  dimension::{Dimension, DimensionMember, FactApplication, KeyMap},
  warehouse::Warehouse,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::{Error, Result};

// ─── Report ──────────────────────────────────────────────────────────────────

/// Rows added to one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionLoad {
  pub dimension: Dimension,
  pub inserted:  usize,
}

/// What a single [`load`] wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
  pub dimensions:     Vec<DimensionLoad>,
  pub facts_inserted: usize,
}

impl LoadReport {
  pub fn inserted(&self, dimension: Dimension) -> usize {
    self
      .dimensions
      .iter()
      .find(|d| d.dimension == dimension)
      .map_or(0, |d| d.inserted)
  }
}

// ─── Key resolution ──────────────────────────────────────────────────────────

/// The key maps of all five dimensions, read after every upsert.
#[derive(Debug, Default)]
pub struct SurrogateKeys {
  candidate:  KeyMap,
  date:       KeyMap,
  location:   KeyMap,
  technology: KeyMap,
  seniority:  KeyMap,
}

impl SurrogateKeys {
  pub async fn resolve<W: Warehouse>(warehouse: &W) -> Result<Self> {
    let mut keys = Self::default();
    for dimension in Dimension::ALL {
      let map = warehouse
        .resolve_surrogate_keys(dimension)
        .await
        .map_err(Error::warehouse)?;
      debug!(%dimension, keys = map.len(), "resolved surrogate keys");
      *keys.map_mut(dimension) = map;
    }
    Ok(keys)
  }

  fn map_mut(&mut self, dimension: Dimension) -> &mut KeyMap {
    match dimension {
      Dimension::Candidate => &mut self.candidate,
      Dimension::Date => &mut self.date,
      Dimension::Location => &mut self.location,
      Dimension::Technology => &mut self.technology,
      Dimension::Seniority => &mut self.seniority,
    }
  }

  fn map(&self, dimension: Dimension) -> &KeyMap {
    match dimension {
      Dimension::Candidate => &self.candidate,
      Dimension::Date => &self.date,
      Dimension::Location => &self.location,
      Dimension::Technology => &self.technology,
      Dimension::Seniority => &self.seniority,
    }
  }

  /// Surrogate key of the `dimension` member `app` refers to.
  pub fn lookup(&self, dimension: Dimension, app: &Application) -> Result<i64> {
    let natural_key = DimensionMember::of(dimension, app).natural_key();
    self
      .map(dimension)
      .get(&natural_key)
      .copied()
      .ok_or(Error::UnresolvedKey { dimension, natural_key })
  }

  /// The fact row for `app`, or an error naming the first unresolved key.
  pub fn fact_for(&self, app: &Application) -> Result<FactApplication> {
    Ok(FactApplication {
      candidate_sk:              self.lookup(Dimension::Candidate, app)?,
      seniority_sk:              self.lookup(Dimension::Seniority, app)?,
      technology_sk:             self.lookup(Dimension::Technology, app)?,
      location_sk:               self.lookup(Dimension::Location, app)?,
      date_sk:                   self.lookup(Dimension::Date, app)?,
      yoe:                       app.yoe,
      code_challenge_score:      app.code_challenge_score,
      technical_interview_score: app.technical_interview_score,
      is_hired:                  app.is_hired,
    })
  }
}

// ─── Load ────────────────────────────────────────────────────────────────────

/// Ensure the schema, grow every dimension, resolve keys, append facts.
///
/// Dimension growth is idempotent; fact loading is not. Loading the same
/// applications twice leaves the dimensions unchanged and appends a second
/// copy of every fact.
pub async fn load<W: Warehouse>(warehouse: &W, applications: &[Application]) -> Result<LoadReport> {
  info!(applications = applications.len(), "starting load phase");

  warehouse.ensure_schema().await.map_err(Error::warehouse)?;

  let mut report = LoadReport::default();
  for dimension in Dimension::ALL {
    let members = applications
      .iter()
      .map(|app| DimensionMember::of(dimension, app))
      .collect();
    let inserted = warehouse
      .upsert_dimension(dimension, members)
      .await
      .map_err(Error::warehouse)?;
    info!(%dimension, inserted, "dimension upserted");
    report.dimensions.push(DimensionLoad { dimension, inserted });
  }

  let keys = SurrogateKeys::resolve(warehouse).await?;
  let facts = applications
    .iter()
    .map(|app| keys.fact_for(app))
    .collect::<Result<Vec<_>>>()?;

  report.facts_inserted = warehouse.load_fact(facts).await.map_err(Error::warehouse)?;
  info!(facts = report.facts_inserted, "load phase complete");

  Ok(report)
}
