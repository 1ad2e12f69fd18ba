//! Batch ETL from the raw candidate feed into the recruiting warehouse.
//!
//! Extract → Transform → Load, strictly in sequence. The loader is generic
//! over any [`Warehouse`](recruit_core::warehouse::Warehouse); the binary
//! wires it to [`SqliteWarehouse`](recruit_store_sqlite::SqliteWarehouse).

pub mod error;
pub mod load;
pub mod pipeline;
pub mod report;
pub mod settings;

pub use error::{Error, Result};
pub use settings::{PipelineConfig, WarehouseConfig};
