//! Mapping between domain types and SQLite column values.
//!
//! Text keys are stored as-is; the transform stage has already normalised
//! them. Booleans are stored as `0`/`1`.

use recruit_core::dimension::{Dimension, DimensionMember, FactApplication};
use rusqlite::types::Value;

// ─── Dimensions ──────────────────────────────────────────────────────────────

/// `INSERT` statement for one member of `dimension`. Parameter order matches
/// [`member_values`].
pub fn insert_member_sql(dimension: Dimension) -> &'static str {
  match dimension {
    Dimension::Candidate => {
      "INSERT INTO dim_candidate (email, first_name, last_name) VALUES (?1, ?2, ?3)"
    }
    Dimension::Date => {
      "INSERT INTO dim_date (date_sk, full_date, year, month, day, quarter)
       VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
    }
    Dimension::Location => "INSERT INTO dim_location (country) VALUES (?1)",
    Dimension::Technology => "INSERT INTO dim_technology (technology_name) VALUES (?1)",
    Dimension::Seniority => "INSERT INTO dim_seniority (seniority_name) VALUES (?1)",
  }
}

pub fn member_values(member: &DimensionMember) -> Vec<Value> {
  match member {
    DimensionMember::Candidate { email, first_name, last_name } => vec![
      Value::Text(email.clone()),
      Value::Text(first_name.clone()),
      Value::Text(last_name.clone()),
    ],
    DimensionMember::Date(d) => vec![
      Value::Integer(d.date_sk()),
      Value::Text(d.iso()),
      Value::Integer(i64::from(d.year())),
      Value::Integer(i64::from(d.month())),
      Value::Integer(i64::from(d.day())),
      Value::Integer(i64::from(d.quarter())),
    ],
    DimensionMember::Location { country } => vec![Value::Text(country.clone())],
    DimensionMember::Technology { name } | DimensionMember::Seniority { name } => {
      vec![Value::Text(name.clone())]
    }
  }
}

pub fn select_natural_keys_sql(dimension: Dimension) -> String {
  format!("SELECT {} FROM {}", dimension.natural_key_column(), dimension.table())
}

pub fn select_key_map_sql(dimension: Dimension) -> String {
  format!(
    "SELECT {}, {} FROM {}",
    dimension.natural_key_column(),
    dimension.surrogate_key_column(),
    dimension.table()
  )
}

pub fn count_sql(dimension: Dimension) -> String {
  format!("SELECT COUNT(*) FROM {}", dimension.table())
}

// ─── Facts ───────────────────────────────────────────────────────────────────

pub const INSERT_FACT_SQL: &str = "INSERT INTO fact_application (
     candidate_sk, seniority_sk, technology_sk, location_sk, date_sk,
     yoe, code_challenge_score, technical_interview_score, is_hired
   ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

pub fn fact_values(f: &FactApplication) -> [i64; 9] {
  [
    f.candidate_sk,
    f.seniority_sk,
    f.technology_sk,
    f.location_sk,
    f.date_sk,
    i64::from(f.yoe),
    i64::from(f.code_challenge_score),
    i64::from(f.technical_interview_score),
    i64::from(f.is_hired),
  ]
}

/// Fact rows whose foreign keys do not resolve. Counted per missing
/// reference, so a row with two dangling keys counts twice.
pub const ORPHAN_FACTS_SQL: &str = "SELECT
     (SELECT COUNT(*) FROM fact_application f
        LEFT JOIN dim_candidate c ON c.candidate_sk = f.candidate_sk
        WHERE c.candidate_sk IS NULL)
   + (SELECT COUNT(*) FROM fact_application f
        LEFT JOIN dim_seniority s ON s.seniority_sk = f.seniority_sk
        WHERE s.seniority_sk IS NULL)
   + (SELECT COUNT(*) FROM fact_application f
        LEFT JOIN dim_technology t ON t.technology_sk = f.technology_sk
        WHERE t.technology_sk IS NULL)
   + (SELECT COUNT(*) FROM fact_application f
        LEFT JOIN dim_location l ON l.location_sk = f.location_sk
        WHERE l.location_sk IS NULL)
   + (SELECT COUNT(*) FROM fact_application f
        LEFT JOIN dim_date d ON d.date_sk = f.date_sk
        WHERE d.date_sk IS NULL)";
