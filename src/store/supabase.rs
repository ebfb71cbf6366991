use super::GenerationLog;
use crate::config::SupabaseConfig;
use crate::models::GenerationLogEntry;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Inserts rows through Supabase's PostgREST endpoint.
pub struct SupabaseLog {
    client: Client,
    url: String,
    key: String,
    table: String,
}

impl SupabaseLog {
    pub fn new(config: SupabaseConfig) -> Self {
        Self::new_with_client(config, Client::new())
    }

    pub fn new_with_client(config: SupabaseConfig, client: Client) -> Self {
        Self {
            client,
            url: config.url,
            key: config.key,
            table: config.table,
        }
    }

    fn insert_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url, self.table)
    }
}

#[async_trait]
impl GenerationLog for SupabaseLog {
    async fn record(&self, entry: &GenerationLogEntry) -> Result<()> {
        let response = self
            .client
            .post(self.insert_url())
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("Prefer", "return=minimal")
            .json(entry)
            .send()
            .await
            .map_err(|e| Error::Store(format!("Failed to reach Supabase: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Store(format!(
                "Insert into {} failed (status {}): {}",
                self.table, status, error_text
            )));
        }

        Ok(())
    }
}
