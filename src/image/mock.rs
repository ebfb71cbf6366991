use super::{ImageSource, UpstreamImage, CHUNK_SIZE};
use crate::models::ImageProxyParams;
use crate::{Error, Result};
use async_trait::async_trait;
use axum::body::Bytes;
use futures::stream::{self, StreamExt};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockImageSource {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
    should_fail: Arc<Mutex<bool>>,
    requests: Arc<Mutex<Vec<ImageProxyParams>>>,
}

impl MockImageSource {
    pub fn new() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("image/jpeg"));

        Self {
            status: StatusCode::OK,
            headers,
            body: vec![0xFF, 0xD8, 0xFF, 0xE0],
            should_fail: Arc::new(Mutex::new(false)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers.append(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
        self
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_requests(&self) -> Vec<ImageProxyParams> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockImageSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageSource for MockImageSource {
    async fn fetch(&self, params: &ImageProxyParams) -> Result<UpstreamImage> {
        self.requests.lock().unwrap().push(params.clone());

        if *self.should_fail.lock().unwrap() {
            return Err(Error::ImageApi("Mock connection failure".to_string()));
        }

        let chunks: Vec<std::io::Result<Bytes>> = self
            .body
            .chunks(CHUNK_SIZE)
            .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
            .collect();

        Ok(UpstreamImage {
            status: self.status,
            headers: self.headers.clone(),
            body: stream::iter(chunks).boxed(),
        })
    }
}
