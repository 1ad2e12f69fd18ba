//! The seniority matrix.
//!
//! Source seniority labels are not trusted. The label stored in the warehouse
//! is recomputed from years of experience and the technical interview score
//! by walking an ordered rule table; the first matching rule wins.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Bucket ──────────────────────────────────────────────────────────────────

/// A half-open range `[min, max)`. A missing `max` leaves the bucket open
/// above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
  pub min: u32,
  #[serde(default)]
  pub max: Option<u32>,
}

impl Bucket {
  pub const fn between(min: u32, max: u32) -> Self { Self { min, max: Some(max) } }

  pub const fn at_least(min: u32) -> Self { Self { min, max: None } }

  pub fn contains(&self, value: u32) -> bool {
    value >= self.min && self.max.is_none_or(|max| value < max)
  }
}

// ─── Rules ───────────────────────────────────────────────────────────────────

/// One cell of the matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeniorityRule {
  pub yoe:   Bucket,
  pub score: Bucket,
  pub label: String,
}

/// An ordered, immutable `(yoe, score) → label` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SeniorityRule>", into = "Vec<SeniorityRule>")]
pub struct SeniorityMatrix {
  rules: Vec<SeniorityRule>,
}

impl SeniorityMatrix {
  /// Build a matrix, rejecting an empty rule list or empty buckets. Labels
  /// are lowercased to match normalised source text.
  pub fn new(rules: Vec<SeniorityRule>) -> Result<Self> {
    if rules.is_empty() {
      return Err(Error::EmptyMatrix);
    }
    for bucket in rules.iter().flat_map(|r| [r.yoe, r.score]) {
      if let Some(max) = bucket.max
        && max <= bucket.min
      {
        return Err(Error::EmptyBucket { min: bucket.min, max });
      }
    }
    let rules = rules
      .into_iter()
      .map(|r| SeniorityRule { label: r.label.trim().to_lowercase(), ..r })
      .collect();
    Ok(Self { rules })
  }

  /// The built-in matrix. Covers every `(yoe, score)` pair.
  pub fn standard() -> Self {
    const LOW: Bucket = Bucket::between(0, 5);
    const MID: Bucket = Bucket::between(5, 8);
    const HIGH: Bucket = Bucket::at_least(8);

    let rows: [(Bucket, [&str; 3]); 6] = [
      (Bucket::between(0, 1),   ["intern",  "trainee",   "trainee"]),
      (Bucket::between(1, 3),   ["trainee", "junior",    "junior"]),
      (Bucket::between(3, 7),   ["junior",  "mid-level", "mid-level"]),
      (Bucket::between(7, 12),  ["junior",  "mid-level", "senior"]),
      (Bucket::between(12, 20), ["junior",  "senior",    "lead"]),
      (Bucket::at_least(20),    ["junior",  "senior",    "architect"]),
    ];

    let rules = rows
      .into_iter()
      .flat_map(|(yoe, labels)| {
        [LOW, MID, HIGH]
          .into_iter()
          .zip(labels)
          .map(move |(score, label)| SeniorityRule { yoe, score, label: label.to_owned() })
      })
      .collect();

    Self { rules }
  }

  /// The label of the first rule matching `(yoe, score)`, if any.
  pub fn classify(&self, yoe: u32, score: u32) -> Option<&str> {
    self
      .rules
      .iter()
      .find(|r| r.yoe.contains(yoe) && r.score.contains(score))
      .map(|r| r.label.as_str())
  }

  pub fn rules(&self) -> &[SeniorityRule] { &self.rules }
}

impl Default for SeniorityMatrix {
  fn default() -> Self { Self::standard() }
}

impl TryFrom<Vec<SeniorityRule>> for SeniorityMatrix {
  type Error = Error;

  fn try_from(rules: Vec<SeniorityRule>) -> Result<Self> { Self::new(rules) }
}

impl From<SeniorityMatrix> for Vec<SeniorityRule> {
  fn from(m: SeniorityMatrix) -> Self { m.rules }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn standard_matrix_examples() {
    let m = SeniorityMatrix::standard();
    assert_eq!(m.classify(0, 2), Some("intern"));
    assert_eq!(m.classify(2, 9), Some("junior"));
    assert_eq!(m.classify(5, 6), Some("mid-level"));
    assert_eq!(m.classify(8, 8), Some("senior"));
    assert_eq!(m.classify(8, 7), Some("mid-level"));
    assert_eq!(m.classify(15, 10), Some("lead"));
    assert_eq!(m.classify(25, 9), Some("architect"));
    assert_eq!(m.classify(30, 3), Some("junior"));
  }

  #[test]
  fn standard_matrix_is_total() {
    let m = SeniorityMatrix::standard();
    for yoe in 0..=40 {
      for score in 0..=12 {
        assert!(m.classify(yoe, score).is_some(), "no rule for yoe={yoe} score={score}");
      }
    }
  }

  #[test]
  fn low_experience_or_low_score_is_never_senior() {
    let m = SeniorityMatrix::standard();
    let senior = ["senior", "lead", "architect"];
    for yoe in 0..=40 {
      for score in 0..=10 {
        let label = m.classify(yoe, score).unwrap();
        if yoe < 3 || score < 5 {
          assert!(!senior.contains(&label), "yoe={yoe} score={score} -> {label}");
        }
      }
    }
  }

  #[test]
  fn first_matching_rule_wins() {
    let m = SeniorityMatrix::new(vec![
      SeniorityRule { yoe: Bucket::at_least(0), score: Bucket::at_least(9), label: "Star".into() },
      SeniorityRule { yoe: Bucket::at_least(0), score: Bucket::at_least(0), label: "everyone".into() },
    ])
    .unwrap();
    assert_eq!(m.classify(1, 10), Some("star"));
    assert_eq!(m.classify(1, 3), Some("everyone"));
  }

  #[test]
  fn rejects_empty_matrix_and_empty_buckets() {
    assert!(matches!(SeniorityMatrix::new(vec![]), Err(Error::EmptyMatrix)));
    let bad = SeniorityRule { yoe: Bucket::between(5, 5), score: Bucket::at_least(0), label: "x".into() };
    assert!(matches!(SeniorityMatrix::new(vec![bad]), Err(Error::EmptyBucket { .. })));
  }

  #[test]
  fn deserializes_from_rule_list() {
    let json = r#"[
      { "yoe": { "min": 0 }, "score": { "min": 0, "max": 7 }, "label": "Junior" },
      { "yoe": { "min": 0 }, "score": { "min": 7 }, "label": "senior" }
    ]"#;
    let m: SeniorityMatrix = serde_json::from_str(json).unwrap();
    assert_eq!(m.classify(3, 6), Some("junior"));
    assert_eq!(m.classify(3, 7), Some("senior"));
    assert!(serde_json::from_str::<SeniorityMatrix>("[]").is_err());
  }
}
