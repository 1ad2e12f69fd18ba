//! Candidate applications — raw as read from the feed, and cleaned.

use serde::{Deserialize, Serialize};

use crate::date::CalendarDate;

/// The passing mark for both the code challenge and the technical interview.
pub const HIRING_THRESHOLD: u32 = 7;

// ─── Raw ─────────────────────────────────────────────────────────────────────

/// One source row with every field still as text.
///
/// Empty cells are `None`. `line` is the 1-based line number in the source
/// file (the header is line 1), kept for rejection diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawApplication {
  pub line:                      usize,
  pub first_name:                Option<String>,
  pub last_name:                 Option<String>,
  pub email:                     Option<String>,
  pub application_date:          Option<String>,
  pub country:                   Option<String>,
  pub yoe:                       Option<String>,
  pub seniority:                 Option<String>,
  pub technology:                Option<String>,
  pub code_challenge_score:      Option<String>,
  pub technical_interview_score: Option<String>,
}

impl RawApplication {
  /// Apply `f` to every text field in place.
  pub fn map_fields(&mut self, mut f: impl FnMut(&str) -> String) {
    for field in [
      &mut self.first_name,
      &mut self.last_name,
      &mut self.email,
      &mut self.application_date,
      &mut self.country,
      &mut self.yoe,
      &mut self.seniority,
      &mut self.technology,
      &mut self.code_challenge_score,
      &mut self.technical_interview_score,
    ] {
      *field = field.take().map(|v| f(&v)).filter(|v| !v.is_empty());
    }
  }
}

// ─── Cleaned ─────────────────────────────────────────────────────────────────

/// A cleaned application: one row per surviving application event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
  pub email:                     String,
  pub first_name:                String,
  pub last_name:                 String,
  pub application_date:          CalendarDate,
  pub country:                   String,
  pub yoe:                       u32,
  /// Re-derived from the seniority matrix; never the source label.
  pub seniority:                 String,
  pub technology:                String,
  pub code_challenge_score:      u32,
  pub technical_interview_score: u32,
  pub is_hired:                  bool,
}

/// Hired iff both scores reach [`HIRING_THRESHOLD`].
pub fn is_hired(code_challenge_score: u32, technical_interview_score: u32) -> bool {
  code_challenge_score >= HIRING_THRESHOLD && technical_interview_score >= HIRING_THRESHOLD
}
