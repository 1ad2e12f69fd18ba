//! End-to-end runs: Extract → Transform → export → Load.

use std::fs;

use recruit_core::{application::Application, warehouse::Warehouse};
use recruit_store_sqlite::SqliteWarehouse;
use recruit_transform::{export, extract, transform};
use tracing::{Instrument as _, error, info, info_span};
use uuid::Uuid;

use crate::{Error, PipelineConfig, Result, load::load, report::RunReport};

/// Extract and transform the feed, then write the audit export.
pub fn prepare(config: &PipelineConfig) -> Result<(Vec<Application>, RunReport)> {
  let raw = extract::read_applications(&config.source_path, config.delimiter_byte()?)?;
  let raw_rows = raw.len();

  let out = transform::transform(raw, &config.matrix());
  export::write_clean(&config.processed_path, &out.applications)?;

  let report = RunReport::from_transform(raw_rows, &out);
  Ok((out.applications, report))
}

/// Open the configured warehouse, creating its directory if needed.
pub async fn open_warehouse(config: &PipelineConfig) -> Result<SqliteWarehouse> {
  let path = &config.warehouse.path;
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent)?;
  }
  info!(path = %path.display(), "opening warehouse");
  SqliteWarehouse::open(path).await.map_err(Error::warehouse)
}

/// Run the whole pipeline once.
pub async fn run(config: &PipelineConfig) -> Result<RunReport> {
  let span = info_span!("run", run_id = %Uuid::new_v4());
  run_in_span(config)
    .instrument(span)
    .await
    .inspect_err(|e| error!(error = %e, "pipeline failed"))
}

async fn run_in_span(config: &PipelineConfig) -> Result<RunReport> {
  info!("starting pipeline");
  let (applications, mut report) = prepare(config)?;

  let warehouse = open_warehouse(config).await?;
  let loaded = load(&warehouse, &applications).await?;

  let dangling = warehouse.dangling_references().await.map_err(Error::warehouse)?;
  if dangling > 0 {
    return Err(Error::DanglingReferences(dangling));
  }

  report.load = Some(loaded);
  info!("pipeline complete");
  Ok(report)
}

/// Stop after the transform stage; the warehouse is not touched.
pub fn run_transform(config: &PipelineConfig) -> Result<RunReport> {
  let _span = info_span!("transform", run_id = %Uuid::new_v4()).entered();
  prepare(config).map(|(_, report)| report)
}

/// Create the warehouse schema and nothing else.
pub async fn init_schema(config: &PipelineConfig) -> Result<()> {
  let warehouse = open_warehouse(config).await?;
  warehouse.ensure_schema().await.map_err(Error::warehouse)?;
  info!(path = %config.warehouse.path.display(), "schema ready");
  Ok(())
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use recruit_core::dimension::Dimension;

  use super::*;

  const FEED: &str = "\
First Name;Last Name;Email;Application Date;Country;YOE;Seniority;Technology;Code Challenge Score;Technical Interview Score
Bernadette;Langworth;leonard91@yahoo.com;2021-02-26;Norway;2;Intern;Data Engineer;3;3
Camryn;Reynolds;zelda56@hotmail.com;2021-09-09;Panama;10;Intern;Data Engineer;2;10
Larue;Spinka;okey_schultz41@gmail.com;2020-04-14;Belarus;4;Mid-Level;Client Success;10;9
Arch;Spinka;elvera_kulas@yahoo.com;2020-10-01;Eritrea;25;Trainee;QA Manual;7;7
Larue;Again;OKEY_SCHULTZ41@gmail.com;2020-05-01;Belarus;4;Mid-Level;Client Success;8;8
Bad;Date;bad@date.io;2020-99-01;Chile;1;Junior;QA Manual;8;8
";

  fn config(dir: &Path) -> PipelineConfig {
    let source = dir.join("raw").join("candidates.csv");
    fs::create_dir_all(source.parent().unwrap()).unwrap();
    fs::write(&source, FEED).unwrap();
    PipelineConfig {
      source_path: source,
      processed_path: dir.join("processed").join("clean.csv"),
      warehouse: crate::WarehouseConfig { path: dir.join("dw").join("warehouse.sqlite3") },
      ..Default::default()
    }
  }

  #[tokio::test]
  async fn full_run_loads_the_surviving_rows() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());

    let report = run(&cfg).await.unwrap();

    assert_eq!(report.raw_rows, 6);
    assert_eq!(report.duplicate_rows, 2);
    assert_eq!(report.duplicate_emails, 1);
    assert_eq!(report.rejections.len(), 1);
    assert_eq!(report.rejections[0].line, 7);
    assert_eq!(report.applications, 3);
    let load = report.load.as_ref().unwrap();
    assert_eq!(load.facts_inserted, 3);
    assert_eq!(load.inserted(Dimension::Candidate), 3);

    let export = fs::read_to_string(&cfg.processed_path).unwrap();
    assert_eq!(export.lines().count(), 4);
    assert!(!export.contains("okey_schultz41"));
    // yoe 25 with score 7 is classified from the matrix, not "trainee".
    assert!(export.contains("elvera_kulas@yahoo.com,arch,spinka,2020-10-01,eritrea,25,senior,"));
  }

  #[tokio::test]
  async fn rerun_does_not_grow_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());

    run(&cfg).await.unwrap();
    let second = run(&cfg).await.unwrap();

    let load = second.load.unwrap();
    assert!(load.dimensions.iter().all(|d| d.inserted == 0));
    assert_eq!(load.facts_inserted, 3);

    let w = SqliteWarehouse::open(&cfg.warehouse.path).await.unwrap();
    assert_eq!(w.count_members(Dimension::Candidate).await.unwrap(), 3);
    assert_eq!(w.count_facts().await.unwrap(), 6);
  }

  #[tokio::test]
  async fn missing_source_aborts_without_touching_the_warehouse() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = PipelineConfig {
      source_path: dir.path().join("absent.csv"),
      warehouse: crate::WarehouseConfig { path: dir.path().join("dw.sqlite3") },
      ..Default::default()
    };

    let err = run(&cfg).await.unwrap_err();
    assert!(matches!(err, Error::Extract(recruit_transform::Error::SourceNotFound(_))));
    assert!(!cfg.warehouse.path.exists());
  }

  #[test]
  fn transform_only_writes_the_export() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());

    let report = run_transform(&cfg).unwrap();

    assert!(report.load.is_none());
    assert!(cfg.processed_path.exists());
    assert!(!cfg.warehouse.path.exists());
  }

  #[tokio::test]
  async fn init_schema_creates_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());

    init_schema(&cfg).await.unwrap();
    init_schema(&cfg).await.unwrap();

    let w = SqliteWarehouse::open(&cfg.warehouse.path).await.unwrap();
    assert_eq!(w.count_facts().await.unwrap(), 0);
  }
}
