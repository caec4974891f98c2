//! Supabase PostgREST client.

use crate::error::{StoreError, StoreResult};
use reqwest::Client;
use silo_config::StoreConfig;
use silo_core::KnowledgeRecord;
use std::time::Duration;
use tracing::debug;

/// Client for bulk-inserting knowledge records into a Supabase table.
#[derive(Clone)]
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    service_key: String,
    table: String,
    timeout: Duration,
}

impl SupabaseStore {
    /// Create a new store client from configuration and credentials.
    ///
    /// `service_key` must be a service-role key; ingestion writes bypass
    /// row-level security.
    pub fn from_config(
        config: &StoreConfig,
        base_url: impl Into<String>,
        service_key: impl Into<String>,
    ) -> StoreResult<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds);

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(StoreError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
            table: config.table.clone(),
            timeout,
        })
    }

    /// Bulk-insert one document's batch of records.
    ///
    /// PostgREST runs the insert as a single transaction, so a success status
    /// means the whole batch was accepted. An empty batch is a no-op.
    pub async fn insert_records(&self, records: &[KnowledgeRecord]) -> StoreResult<()> {
        if records.is_empty() {
            return Ok(());
        }

        let url = format!("{}/rest/v1/{}", self.base_url, self.table);
        debug!("Inserting {} records into {}", records.len(), self.table);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("Prefer", "return=minimal")
            .json(records)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    StoreError::Unreachable {
                        url: self.base_url.clone(),
                    }
                } else if e.is_timeout() {
                    StoreError::Timeout {
                        seconds: self.timeout.as_secs(),
                    }
                } else {
                    StoreError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!("Stored {} records", records.len());
        Ok(())
    }
}
