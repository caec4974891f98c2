//! Silo Core - Domain types shared across the ingestion pipeline.

mod types;

pub use types::*;
