//! Silo Store - Supabase vector-table client.
//!
//! Append-only bulk inserts of knowledge records over PostgREST. Query and
//! retrieval are served elsewhere; ingestion only writes.

mod client;
mod error;

pub use client::SupabaseStore;
pub use error::{StoreError, StoreResult};
