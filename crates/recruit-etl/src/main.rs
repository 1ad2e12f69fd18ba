//! recruit-etl binary.
//!
//! Reads `recruit-etl.toml` (or the path given with `--config`) plus
//! `RECRUIT_*` environment variables, then runs the pipeline.
//!
//! ```text
//! recruit-etl run --json
//! recruit-etl --config etc/etl.toml transform
//! RECRUIT_WAREHOUSE__PATH=/tmp/dw.sqlite3 recruit-etl init-schema
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use recruit_etl::{PipelineConfig, pipeline, report::RunReport};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Load the candidate feed into the recruiting warehouse")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "recruit-etl.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Extract, transform, export and load (the default).
  Run {
    /// Print the run report as JSON.
    #[arg(long)]
    json: bool,
  },
  /// Extract, transform and export only; the warehouse is not opened.
  Transform {
    #[arg(long)]
    json: bool,
  },
  /// Create the warehouse schema and exit.
  InitSchema,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let cfg = PipelineConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  match cli.command.unwrap_or(Command::Run { json: false }) {
    Command::Run { json } => {
      let report = pipeline::run(&cfg).await.context("pipeline run failed")?;
      print_report(&report, json)?;
    }
    Command::Transform { json } => {
      let report = pipeline::run_transform(&cfg).context("transform failed")?;
      print_report(&report, json)?;
    }
    Command::InitSchema => {
      pipeline::init_schema(&cfg)
        .await
        .with_context(|| format!("failed to initialise {:?}", cfg.warehouse.path))?;
    }
  }

  Ok(())
}

fn print_report(report: &RunReport, json: bool) -> anyhow::Result<()> {
  if json {
    println!("{}", serde_json::to_string_pretty(report)?);
  } else {
    print!("{report}");
  }
  Ok(())
}
