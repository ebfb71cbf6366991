use super::{ImageSource, UpstreamImage, CHUNK_SIZE};
use crate::models::ImageProxyParams;
use crate::{encoding, Result};
use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use reqwest::Client;
use tokio_util::io::{ReaderStream, StreamReader};

/// Pollinations image API client authenticated with a bearer key.
pub struct ImageClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ImageClient {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self::new_with_client(api_key, base_url, model, Client::new())
    }

    pub fn new_with_client(api_key: String, base_url: String, model: String, client: Client) -> Self {
        Self {
            client,
            api_key,
            base_url,
            model,
        }
    }

    /// Size, seed and logo flags are passed through as given.
    pub fn target_url(&self, params: &ImageProxyParams) -> String {
        format!(
            "{}/image/{}?width={}&height={}&seed={}&nologo={}&model={}",
            self.base_url,
            encoding::quote(&params.prompt),
            params.width,
            params.height,
            params.seed,
            params.nologo,
            self.model
        )
    }
}

#[async_trait]
impl ImageSource for ImageClient {
    async fn fetch(&self, params: &ImageProxyParams) -> Result<UpstreamImage> {
        let url = self.target_url(params);
        tracing::debug!("Requesting image from image API");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach image API: {}", e);
                e
            })?;

        let status = response.status();
        let headers = response.headers().clone();
        if !status.is_success() {
            tracing::warn!("Image API returned status {}; relaying it", status);
        }

        let reader = StreamReader::new(response.bytes_stream().map_err(std::io::Error::other));
        let body = ReaderStream::with_capacity(reader, CHUNK_SIZE).boxed();

        Ok(UpstreamImage {
            status,
            headers,
            body,
        })
    }
}
