//! Core types and trait definitions for the recruiting warehouse.
//!
//! This crate is deliberately free of file and database dependencies. The
//! transform, store and orchestration crates all depend on it.

pub mod application;
pub mod date;
pub mod dimension;
pub mod error;
pub mod seniority;
pub mod warehouse;

pub use error::{Error, Result};
