//! Audit export of the cleaned dataset.

use std::{fs, path::Path};

use recruit_core::application::Application;
use serde::Serialize;
use tracing::info;

use crate::{Error, Result};

/// One line of the processed file: the source columns with the re-derived
/// seniority, followed by the derived columns.
#[derive(Debug, Serialize)]
struct CleanRow<'a> {
  email:                     &'a str,
  first_name:                &'a str,
  last_name:                 &'a str,
  application_date:          String,
  country:                   &'a str,
  yoe:                       u32,
  seniority:                 &'a str,
  technology:                &'a str,
  code_challenge_score:      u32,
  technical_interview_score: u32,
  is_hired:                  u8,
  year:                      i32,
  month:                     u32,
  day:                       u32,
  quarter:                   u32,
  date_sk:                   i64,
}

impl<'a> From<&'a Application> for CleanRow<'a> {
  fn from(a: &'a Application) -> Self {
    let d = a.application_date;
    Self {
      email:                     &a.email,
      first_name:                &a.first_name,
      last_name:                 &a.last_name,
      application_date:          d.iso(),
      country:                   &a.country,
      yoe:                       a.yoe,
      seniority:                 &a.seniority,
      technology:                &a.technology,
      code_challenge_score:      a.code_challenge_score,
      technical_interview_score: a.technical_interview_score,
      is_hired:                  u8::from(a.is_hired),
      year:                      d.year(),
      month:                     d.month(),
      day:                       d.day(),
      quarter:                   d.quarter(),
      date_sk:                   d.date_sk(),
    }
  }
}

/// Write `applications` as comma-separated CSV with a header row, creating
/// parent directories as needed. An existing file is replaced.
pub fn write_clean(path: impl AsRef<Path>, applications: &[Application]) -> Result<()> {
  let path = path.as_ref();
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent).map_err(|source| Error::Io { path: parent.to_path_buf(), source })?;
  }

  let mut wtr = csv::Writer::from_path(path)?;
  if applications.is_empty() {
    wtr.write_record(HEADER)?;
  }
  for app in applications {
    wtr.serialize(CleanRow::from(app))?;
  }
  wtr.flush().map_err(|source| Error::Io { path: path.to_path_buf(), source })?;

  info!(path = %path.display(), rows = applications.len(), "wrote cleaned dataset");
  Ok(())
}

/// Column names of the processed file.
pub const HEADER: [&str; 16] = [
  "email",
  "first_name",
  "last_name",
  "application_date",
  "country",
  "yoe",
  "seniority",
  "technology",
  "code_challenge_score",
  "technical_interview_score",
  "is_hired",
  "year",
  "month",
  "day",
  "quarter",
  "date_sk",
];

#[cfg(test)]
mod tests {
  use recruit_core::date::CalendarDate;

  use super::*;

  fn app(email: &str, hired: bool) -> Application {
    Application {
      email:                     email.into(),
      first_name:                "ada".into(),
      last_name:                 "lovelace".into(),
      application_date:          CalendarDate::from_ymd(2023, 2, 15).unwrap(),
      country:                   "norway".into(),
      yoe:                       4,
      seniority:                 "mid-level".into(),
      technology:                "data engineer".into(),
      code_challenge_score:      8,
      technical_interview_score: 7,
      is_hired:                  hired,
    }
  }

  #[test]
  fn writes_header_and_derived_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("processed").join("clean.csv");

    write_clean(&path, &[app("a@x.io", true), app("b@x.io", false)]).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], HEADER.join(","));
    assert_eq!(
      lines[1],
      "a@x.io,ada,lovelace,2023-02-15,norway,4,mid-level,data engineer,8,7,1,2023,2,15,1,20230215"
    );
    assert!(lines[2].starts_with("b@x.io,") && lines[2].contains(",7,0,2023,"));
    assert_eq!(lines.len(), 3);
  }

  #[test]
  fn empty_dataset_still_gets_a_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clean.csv");
    write_clean(&path, &[]).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap().trim_end(), HEADER.join(","));
  }
}
