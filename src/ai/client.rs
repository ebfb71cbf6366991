use super::{Extraction, IdeaExtractor};
use crate::ai::extraction::parse_reply;
use crate::{encoding, prompts, Error, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

/// Pollinations text API client.
///
/// The rendered instruction travels in the URL path and the API key as the
/// `key` query parameter.
pub struct TextClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TextClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self::new_with_client(api_key, base_url, Client::new())
    }

    pub fn new_with_client(api_key: String, base_url: String, client: Client) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }

    /// Fetch the raw reply. A non-200 status is reported as [`Error::TextApi`].
    async fn fetch_reply(&self, text: &str) -> Result<String> {
        let instruction = prompts::render(prompts::EXTRACT_IDEAS, &[("text", text)]);
        let url = format!("{}/{}", self.base_url, encoding::quote(&instruction));

        tracing::debug!("Sending idea extraction request to text API");

        let response = self
            .client
            .get(&url)
            .query(&[("key", &self.api_key)])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::TextApi(format!("unexpected status {}", status)));
        }

        Ok(response.text().await?)
    }

    /// Fetch and parse the reply. `Ok(None)` means valid JSON without a prompt list.
    async fn fetch_prompts(&self, text: &str) -> Result<Option<Extraction>> {
        let body = self.fetch_reply(text).await?;
        Ok(parse_reply(&body)?)
    }
}

#[async_trait]
impl IdeaExtractor for TextClient {
    async fn extract(&self, text: &str) -> Extraction {
        match self.fetch_prompts(text).await {
            Ok(Some(extraction)) => extraction,
            Ok(None) => {
                tracing::warn!("Text API reply had no prompt list; using whole text");
                Extraction::raw_text(text)
            }
            Err(Error::TextApi(reason)) => {
                tracing::warn!("Text API declined extraction ({}); using whole text", reason);
                Extraction::raw_text(text)
            }
            Err(e) => {
                tracing::error!("Extraction error: {}", e);
                Extraction::sentence_split(text)
            }
        }
    }
}
