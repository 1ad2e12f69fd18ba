//! Star-schema dimensions and the fact row that references them.

use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{application::Application, date::CalendarDate};

// ─── Dimension ───────────────────────────────────────────────────────────────

/// The five dimensions of the warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
  Candidate,
  Date,
  Location,
  Technology,
  Seniority,
}

impl Dimension {
  /// Upsert order used by the loader.
  pub const ALL: [Dimension; 5] = [
    Dimension::Location,
    Dimension::Technology,
    Dimension::Seniority,
    Dimension::Candidate,
    Dimension::Date,
  ];

  pub fn table(self) -> &'static str {
    match self {
      Self::Candidate => "dim_candidate",
      Self::Date => "dim_date",
      Self::Location => "dim_location",
      Self::Technology => "dim_technology",
      Self::Seniority => "dim_seniority",
    }
  }

  pub fn surrogate_key_column(self) -> &'static str {
    match self {
      Self::Candidate => "candidate_sk",
      Self::Date => "date_sk",
      Self::Location => "location_sk",
      Self::Technology => "technology_sk",
      Self::Seniority => "seniority_sk",
    }
  }

  pub fn natural_key_column(self) -> &'static str {
    match self {
      Self::Candidate => "email",
      Self::Date => "full_date",
      Self::Location => "country",
      Self::Technology => "technology_name",
      Self::Seniority => "seniority_name",
    }
  }
}

impl fmt::Display for Dimension {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.table()) }
}

// ─── Members ─────────────────────────────────────────────────────────────────

/// One row destined for a dimension table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "dimension", rename_all = "snake_case")]
pub enum DimensionMember {
  Candidate { email: String, first_name: String, last_name: String },
  Date(CalendarDate),
  Location { country: String },
  Technology { name: String },
  Seniority { name: String },
}

impl DimensionMember {
  pub fn dimension(&self) -> Dimension {
    match self {
      Self::Candidate { .. } => Dimension::Candidate,
      Self::Date(_) => Dimension::Date,
      Self::Location { .. } => Dimension::Location,
      Self::Technology { .. } => Dimension::Technology,
      Self::Seniority { .. } => Dimension::Seniority,
    }
  }

  /// The business key that identifies this member within its dimension.
  pub fn natural_key(&self) -> String {
    match self {
      Self::Candidate { email, .. } => email.clone(),
      Self::Date(d) => d.iso(),
      Self::Location { country } => country.clone(),
      Self::Technology { name } | Self::Seniority { name } => name.clone(),
    }
  }

  /// The member of `dimension` that `app` refers to.
  pub fn of(dimension: Dimension, app: &Application) -> Self {
    match dimension {
      Dimension::Candidate => Self::Candidate {
        email:      app.email.clone(),
        first_name: app.first_name.clone(),
        last_name:  app.last_name.clone(),
      },
      Dimension::Date => Self::Date(app.application_date),
      Dimension::Location => Self::Location { country: app.country.clone() },
      Dimension::Technology => Self::Technology { name: app.technology.clone() },
      Dimension::Seniority => Self::Seniority { name: app.seniority.clone() },
    }
  }
}

/// Natural key → surrogate key for one dimension.
pub type KeyMap = HashMap<String, i64>;

// ─── Fact ────────────────────────────────────────────────────────────────────

/// A `fact_application` row with every foreign key resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactApplication {
  pub candidate_sk:              i64,
  pub seniority_sk:              i64,
  pub technology_sk:             i64,
  pub location_sk:               i64,
  pub date_sk:                   i64,
  pub yoe:                       u32,
  pub code_challenge_score:      u32,
  pub technical_interview_score: u32,
  pub is_hired:                  bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn app() -> Application {
    Application {
      email:                     "ada@example.com".into(),
      first_name:                "ada".into(),
      last_name:                 "lovelace".into(),
      application_date:          CalendarDate::from_ymd(2023, 2, 15).unwrap(),
      country:                   "united kingdom".into(),
      yoe:                       12,
      seniority:                 "lead".into(),
      technology:                "data engineer".into(),
      code_challenge_score:      9,
      technical_interview_score: 8,
      is_hired:                  true,
    }
  }

  #[test]
  fn members_carry_their_dimension_and_key() {
    let a = app();
    for dim in Dimension::ALL {
      assert_eq!(DimensionMember::of(dim, &a).dimension(), dim);
    }
    assert_eq!(DimensionMember::of(Dimension::Candidate, &a).natural_key(), "ada@example.com");
    assert_eq!(DimensionMember::of(Dimension::Date, &a).natural_key(), "2023-02-15");
    assert_eq!(DimensionMember::of(Dimension::Seniority, &a).natural_key(), "lead");
  }

  #[test]
  fn every_dimension_is_loaded_once() {
    let mut seen = std::collections::HashSet::new();
    assert!(Dimension::ALL.iter().all(|d| seen.insert(d.table())));
  }
}
