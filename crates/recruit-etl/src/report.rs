//! Summary of a pipeline run.

use std::fmt;

use recruit_transform::transform::{Rejection, TransformOutput};
use serde::Serialize;

use crate::load::LoadReport;

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
  pub raw_rows:         usize,
  pub duplicate_rows:   usize,
  pub duplicate_emails: usize,
  pub rejections:       Vec<Rejection>,
  pub applications:     usize,
  /// `None` when the run stopped after the transform stage.
  pub load:             Option<LoadReport>,
}

impl RunReport {
  pub fn from_transform(raw_rows: usize, out: &TransformOutput) -> Self {
    Self {
      raw_rows,
      duplicate_rows: out.duplicate_rows,
      duplicate_emails: out.duplicate_emails,
      rejections: out.rejections.clone(),
      applications: out.applications.len(),
      load: None,
    }
  }
}

impl fmt::Display for RunReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "raw rows:          {}", self.raw_rows)?;
    writeln!(
      f,
      "duplicate purge:   {} rows ({} emails)",
      self.duplicate_rows, self.duplicate_emails
    )?;
    writeln!(f, "rejected rows:     {}", self.rejections.len())?;
    writeln!(f, "applications:      {}", self.applications)?;
    if let Some(load) = &self.load {
      for d in &load.dimensions {
        writeln!(f, "new {:<15} {}", format!("{}:", d.dimension), d.inserted)?;
      }
      writeln!(f, "facts inserted:    {}", load.facts_inserted)?;
    }
    Ok(())
  }
}
