//! Extract and Transform stages of the recruiting ETL.
//!
//! Pure synchronous code over the local filesystem; no database
//! dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! use recruit_core::seniority::SeniorityMatrix;
//! use recruit_transform::{export, extract, transform};
//!
//! let raw = extract::read_applications("data/raw/candidates.csv", b';').unwrap();
//! let out = transform::transform(raw, &SeniorityMatrix::standard());
//! export::write_clean("data/processed/candidates_clean.csv", &out.applications).unwrap();
//! ```

pub mod error;
pub mod export;
pub mod extract;
pub mod transform;

pub use error::{Error, Result};
