//! Transform: clean the raw feed and derive business attributes.
//!
//! Steps run in a fixed order over the whole table:
//!
//! 1. trim and lowercase every text field;
//! 2. purge every row whose email occurs more than once;
//! 3. derive `is_hired` from the two scores;
//! 4. re-derive seniority from the [`SeniorityMatrix`];
//! 5. parse the application date.
//!
//! A row that cannot complete steps 3–5 is rejected and logged; the batch
//! carries on without it.

use std::{collections::HashMap, fmt};

use recruit_core::{
  application::{Application, RawApplication, is_hired},
  date::CalendarDate,
  seniority::SeniorityMatrix,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::extract::RawTable;

// ─── Output types ────────────────────────────────────────────────────────────

/// Why a row was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectReason {
  MissingField { field: &'static str },
  InvalidNumber { field: &'static str, value: String },
  InvalidDate { value: String },
  Unclassified { yoe: u32, score: u32 },
}

impl fmt::Display for RejectReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::MissingField { field } => write!(f, "missing required field {field}"),
      Self::InvalidNumber { field, value } => write!(f, "{field} is not a number: {value:?}"),
      Self::InvalidDate { value } => write!(f, "unparseable application date {value:?}"),
      Self::Unclassified { yoe, score } => {
        write!(f, "no seniority rule for yoe={yoe} score={score}")
      }
    }
  }
}

/// A dropped row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
  pub line:   usize,
  pub email:  Option<String>,
  pub reason: RejectReason,
}

/// Result of [`transform`].
#[derive(Debug, Clone, Default)]
pub struct TransformOutput {
  /// Surviving applications, in input order.
  pub applications:      Vec<Application>,
  pub rejections:        Vec<Rejection>,
  /// Rows removed by the duplicate-email purge.
  pub duplicate_rows:    usize,
  /// Distinct emails that were purged.
  pub duplicate_emails:  usize,
}

// ─── Steps ───────────────────────────────────────────────────────────────────

/// Trim and lowercase. Idempotent.
pub fn normalize_text(s: &str) -> String { s.trim().to_lowercase() }

/// Run every step over `table`.
pub fn transform(mut table: RawTable, matrix: &SeniorityMatrix) -> TransformOutput {
  info!(rows = table.len(), "starting transformation");

  for row in &mut table.rows {
    row.map_fields(normalize_text);
  }

  let (rows, duplicate_rows, duplicate_emails) = purge_duplicate_emails(table.rows);
  if duplicate_rows > 0 {
    warn!(duplicate_rows, duplicate_emails, "purged rows sharing an email");
  }

  let mut out = TransformOutput { duplicate_rows, duplicate_emails, ..Default::default() };
  for raw in rows {
    match clean_row(&raw, matrix) {
      Ok(app) => out.applications.push(app),
      Err(reason) => {
        warn!(line = raw.line, email = raw.email.as_deref(), %reason, "rejected row");
        out.rejections.push(Rejection { line: raw.line, email: raw.email, reason });
      }
    }
  }

  info!(
    kept = out.applications.len(),
    rejected = out.rejections.len(),
    "transformation complete"
  );
  out
}

/// Remove every row whose email appears more than once. Rows without an email
/// are kept here and rejected later as incomplete.
///
/// Returns the surviving rows, the number of rows removed, and the number of
/// distinct emails involved.
pub fn purge_duplicate_emails(rows: Vec<RawApplication>) -> (Vec<RawApplication>, usize, usize) {
  let mut counts: HashMap<String, usize> = HashMap::new();
  for email in rows.iter().filter_map(|r| r.email.as_ref()) {
    *counts.entry(email.clone()).or_default() += 1;
  }

  let duplicate_emails = counts.values().filter(|&&n| n > 1).count();
  let before = rows.len();
  let kept: Vec<_> = rows
    .into_iter()
    .filter(|r| r.email.as_ref().is_none_or(|e| counts[e] == 1))
    .collect();

  let removed = before - kept.len();
  (kept, removed, duplicate_emails)
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, RejectReason> {
  value.as_deref().ok_or(RejectReason::MissingField { field })
}

/// A non-negative whole number. Integral decimals such as `7.0` are accepted,
/// as spreadsheet exports often write them that way.
fn number(value: &Option<String>, field: &'static str) -> Result<u32, RejectReason> {
  let text = required(value, field)?;
  let invalid = || RejectReason::InvalidNumber { field, value: text.to_owned() };
  if let Ok(n) = text.parse::<u32>() {
    return Ok(n);
  }
  let (whole, fraction) = text.split_once('.').ok_or_else(invalid)?;
  if fraction.is_empty() || !fraction.bytes().all(|b| b == b'0') {
    return Err(invalid());
  }
  whole.parse::<u32>().map_err(|_| invalid())
}

/// Steps 3–5 for a single, already normalised row.
fn clean_row(raw: &RawApplication, matrix: &SeniorityMatrix) -> Result<Application, RejectReason> {
  let email = required(&raw.email, "email")?;
  let first_name = required(&raw.first_name, "first_name")?;
  let last_name = required(&raw.last_name, "last_name")?;
  let country = required(&raw.country, "country")?;
  let technology = required(&raw.technology, "technology")?;
  let yoe = number(&raw.yoe, "yoe")?;
  let code_challenge_score = number(&raw.code_challenge_score, "code_challenge_score")?;
  let technical_interview_score =
    number(&raw.technical_interview_score, "technical_interview_score")?;

  let hired = is_hired(code_challenge_score, technical_interview_score);

  // The source label is ignored entirely.
  let seniority = matrix
    .classify(yoe, technical_interview_score)
    .ok_or(RejectReason::Unclassified { yoe, score: technical_interview_score })?
    .to_owned();

  let date_text = required(&raw.application_date, "application_date")?;
  let application_date = CalendarDate::parse(date_text)
    .map_err(|_| RejectReason::InvalidDate { value: date_text.to_owned() })?;

  Ok(Application {
    email: email.to_owned(),
    first_name: first_name.to_owned(),
    last_name: last_name.to_owned(),
    application_date,
    country: country.to_owned(),
    yoe,
    seniority,
    technology: technology.to_owned(),
    code_challenge_score,
    technical_interview_score,
    is_hired: hired,
  })
}
