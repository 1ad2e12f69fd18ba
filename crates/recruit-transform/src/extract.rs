//! Extract: read the delimited candidate feed into [`RawApplication`]s.
//!
//! Structural problems (missing file, wrong column count, unknown header,
//! ragged rows) are fatal. Cell contents are not inspected here.

use std::{fs::File, io::Read, path::Path};

use recruit_core::application::RawApplication;
use tracing::{debug, info};

use crate::{Error, Result};

/// Columns the feed must carry, by normalised header name.
pub const COLUMNS: [&str; 10] = [
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
];

/// The extracted feed: normalised headers in file order plus one raw record
/// per data row.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
  pub headers: Vec<String>,
  pub rows:    Vec<RawApplication>,
}

impl RawTable {
  pub fn len(&self) -> usize { self.rows.len() }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}

/// Normalise a header cell: trim, lowercase, and replace inner whitespace
/// with `_` so that `"Code Challenge Score"` matches `code_challenge_score`.
pub fn normalize_header(h: &str) -> String {
  h.split_whitespace()
    .map(str::to_lowercase)
    .collect::<Vec<_>>()
    .join("_")
}

/// Read the feed at `path`.
pub fn read_applications(path: impl AsRef<Path>, delimiter: u8) -> Result<RawTable> {
  let path = path.as_ref();
  info!(path = %path.display(), "starting extraction");

  if !path.exists() {
    return Err(Error::SourceNotFound(path.to_path_buf()));
  }
  let file = File::open(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;

  let table = read_from(file, delimiter)?;
  info!(rows = table.len(), "extraction complete");
  Ok(table)
}

/// Read the feed from any reader. The first record is the header.
pub fn read_from(mut reader: impl Read, delimiter: u8) -> Result<RawTable> {
  let mut input = Vec::new();
  reader.read_to_end(&mut input).map_err(csv::Error::from)?;
  let mut lines = LineCounter::new(&input);

  let mut rdr = csv::ReaderBuilder::new()
    .delimiter(delimiter)
    .has_headers(true)
    // Ragged rows are reported with their line number below.
    .flexible(true)
    .from_reader(input.as_slice());

  let headers: Vec<String> = rdr.headers()?.iter().map(normalize_header).collect();
  if headers.len() != COLUMNS.len() {
    return Err(Error::ColumnCount { expected: COLUMNS.len(), found: headers.len() });
  }

  let mut index = [0usize; 10];
  for (slot, name) in index.iter_mut().zip(COLUMNS) {
    *slot = headers
      .iter()
      .position(|h| h == name)
      .ok_or(Error::MissingColumn(name))?;
  }
  debug!(?headers, "header validated");

  let mut rows = Vec::new();
  for record in rdr.records() {
    let record = record?;
    let line = record.position().map_or(0, |p| lines.line_at(p.byte() as usize));
    if record.len() != COLUMNS.len() {
      return Err(Error::RowWidth { line, expected: COLUMNS.len(), found: record.len() });
    }

    let cell = |i: usize| {
      record
        .get(index[i])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
    };

    rows.push(RawApplication {
      line,
      email: cell(0),
      first_name: cell(1),
      last_name: cell(2),
      application_date: cell(3),
      country: cell(4),
      yoe: cell(5),
      seniority: cell(6),
      technology: cell(7),
      code_challenge_score: cell(8),
      technical_interview_score: cell(9),
    });
  }

  Ok(RawTable { headers, rows })
}

/// 1-based line of the record starting at a byte offset, counted by `\n` so
/// that `\r\n` input numbers the same as `\n` input. The reader may report an
/// offset that still sits on the previous terminator, so terminator bytes at
/// the offset are skipped first. Offsets must be queried in increasing order.
struct LineCounter<'a> {
  input:  &'a [u8],
  offset: usize,
  line:   usize,
}

impl<'a> LineCounter<'a> {
  fn new(input: &'a [u8]) -> Self { Self { input, offset: 0, line: 1 } }

  fn line_at(&mut self, offset: usize) -> usize {
    let mut end = offset.min(self.input.len());
    while matches!(self.input.get(end), Some(b'\r' | b'\n')) {
      end += 1;
    }
    if end > self.offset {
      self.line += self.input[self.offset..end].iter().filter(|&&b| b == b'\n').count();
      self.offset = end;
    }
    self.line
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const HEADER: &str = "First Name;Last Name;Email;Application Date;Country;YOE;Seniority;Technology;Code Challenge Score;Technical Interview Score\n";

  #[test]
  fn reads_feed_in_source_column_order() {
    let input = format!(
      "{HEADER}Bob;Smith;Bob@Example.com;2021-02-26;Norway;2;Intern;Data Engineer;3;3\n"
    );
    let table = read_from(input.as_bytes(), b';').unwrap();

    assert_eq!(table.headers[0], "first_name");
    assert_eq!(table.headers[9], "technical_interview_score");
    assert_eq!(table.len(), 1);

    let row = &table.rows[0];
    assert_eq!(row.line, 2);
    assert_eq!(row.email.as_deref(), Some("Bob@Example.com"));
    assert_eq!(row.first_name.as_deref(), Some("Bob"));
    assert_eq!(row.application_date.as_deref(), Some("2021-02-26"));
    assert_eq!(row.technical_interview_score.as_deref(), Some("3"));
  }

  #[test]
  fn empty_cells_become_none() {
    let input = format!("{HEADER}Bob;;bob@example.com;2021-02-26; ;2;;Go;3;3\n");
    let row = &read_from(input.as_bytes(), b';').unwrap().rows[0];
    assert_eq!(row.last_name, None);
    assert_eq!(row.country, None);
    assert_eq!(row.seniority, None);
  }

  #[test]
  fn wrong_column_count_is_fatal() {
    let input = "email;first_name\na@b.c;x\n";
    let err = read_from(input.as_bytes(), b';').unwrap_err();
    assert!(matches!(err, Error::ColumnCount { expected: 10, found: 2 }));
  }

  #[test]
  fn unknown_header_is_fatal() {
    let input = "email;first_name;last_name;application_date;country;yoe;seniority;technology;code_challenge_score;bogus\n";
    let err = read_from(input.as_bytes(), b';').unwrap_err();
    assert!(matches!(err, Error::MissingColumn("technical_interview_score")));
  }

  #[test]
  fn ragged_row_reports_its_line() {
    let input = format!("{HEADER}a;b;c@d.e;2021-01-01;x;1;y;z;1;1\nshort;row\n");
    let err = read_from(input.as_bytes(), b';').unwrap_err();
    assert!(matches!(err, Error::RowWidth { line: 3, expected: 10, found: 2 }));
  }

  #[test]
  fn crlf_input_numbers_lines_like_lf() {
    let row = "a;b;c@d.e;2021-01-01;x;1;y;z;1;1";
    let lf = format!("{HEADER}{row}\n{row}\n{row}\n");
    let crlf = lf.replace('\n', "\r\n");

    let lines = |input: &str| -> Vec<usize> {
      read_from(input.as_bytes(), b';').unwrap().rows.iter().map(|r| r.line).collect()
    };
    assert_eq!(lines(&lf), [2, 3, 4]);
    assert_eq!(lines(&crlf), [2, 3, 4]);
  }

  #[test]
  fn crlf_ragged_row_reports_its_line() {
    let input = format!("{HEADER}a;b;c@d.e;2021-01-01;x;1;y;z;1;1\nshort;row\n").replace('\n', "\r\n");
    let err = read_from(input.as_bytes(), b';').unwrap_err();
    assert!(matches!(err, Error::RowWidth { line: 3, expected: 10, found: 2 }));
  }

  #[test]
  fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_applications(dir.path().join("nope.csv"), b';').unwrap_err();
    assert!(matches!(err, Error::SourceNotFound(_)));
  }

  #[test]
  fn header_normalisation() {
    assert_eq!(normalize_header("  Code Challenge   Score "), "code_challenge_score");
    assert_eq!(normalize_header("YOE"), "yoe");
  }
}
