//! Calendar dates and their decomposition for the date dimension.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Formats accepted for the source `application_date` column, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// A calendar day, the grain of `dim_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
  pub fn new(date: NaiveDate) -> Self { Self(date) }

  /// Build from year/month/day, rejecting impossible dates.
  pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
    NaiveDate::from_ymd_opt(year, month, day)
      .map(Self)
      .ok_or_else(|| Error::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
  }

  /// Parse a source date string. A trailing time component is accepted and
  /// discarded.
  pub fn parse(input: &str) -> Result<Self> {
    let input = input.trim();
    DATE_FORMATS
      .iter()
      .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
      .or_else(|| {
        DATETIME_FORMATS
          .iter()
          .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
          .map(|dt| dt.date())
      })
      .map(Self)
      .ok_or_else(|| Error::InvalidDate(input.to_owned()))
  }

  pub fn naive(&self) -> NaiveDate { self.0 }

  pub fn year(&self) -> i32 { self.0.year() }

  pub fn month(&self) -> u32 { self.0.month() }

  pub fn day(&self) -> u32 { self.0.day() }

  /// Calendar quarter, 1 through 4.
  pub fn quarter(&self) -> u32 { (self.month() - 1) / 3 + 1 }

  /// Deterministic integer key, e.g. `20230215` for 2023-02-15.
  pub fn date_sk(&self) -> i64 {
    i64::from(self.year()) * 10_000 + i64::from(self.month()) * 100 + i64::from(self.day())
  }

  /// ISO 8601 representation, used as the natural key of `dim_date`.
  pub fn iso(&self) -> String { self.0.format("%Y-%m-%d").to_string() }
}

impl fmt::Display for CalendarDate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.format("%Y-%m-%d"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decomposes_mid_february() {
    let d = CalendarDate::parse("2023-02-15").unwrap();
    assert_eq!(d.year(), 2023);
    assert_eq!(d.month(), 2);
    assert_eq!(d.day(), 15);
    assert_eq!(d.quarter(), 1);
    assert_eq!(d.date_sk(), 20230215);
    assert_eq!(d.iso(), "2023-02-15");
  }

  #[test]
  fn quarter_boundaries() {
    let q = |m| CalendarDate::from_ymd(2021, m, 1).unwrap().quarter();
    assert_eq!([q(1), q(3), q(4), q(6), q(7), q(9), q(10), q(12)], [1, 1, 2, 2, 3, 3, 4, 4]);
  }

  #[test]
  fn accepts_slashes_and_trailing_time() {
    assert_eq!(
      CalendarDate::parse("2021/02/26").unwrap(),
      CalendarDate::from_ymd(2021, 2, 26).unwrap()
    );
    assert_eq!(
      CalendarDate::parse("2021-02-26 13:45:00").unwrap(),
      CalendarDate::from_ymd(2021, 2, 26).unwrap()
    );
  }

  #[test]
  fn rejects_garbage_and_impossible_dates() {
    assert!(CalendarDate::parse("not a date").is_err());
    assert!(CalendarDate::parse("2021-02-30").is_err());
    assert!(CalendarDate::parse("").is_err());
    assert!(CalendarDate::from_ymd(2021, 13, 1).is_err());
  }
}
