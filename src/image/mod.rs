//! Upstream image generation
//!
//! Fetches generated images from the Pollinations image API with the
//! server-held key and hands back the response as a chunked byte stream,
//! so the proxy route never buffers a whole image.

pub mod client;
pub mod mock;

pub use client::ImageClient;
pub use mock::MockImageSource;

use crate::models::ImageProxyParams;
use crate::Result;
use async_trait::async_trait;
use axum::body::Bytes;
use futures::stream::BoxStream;
use reqwest::header::{HeaderMap, HeaderName};
use reqwest::StatusCode;

/// Size of the chunks relayed to the caller.
pub const CHUNK_SIZE: usize = 1024;

/// Headers that only describe the upstream hop and must be recomputed locally.
pub const HOP_BY_HOP_HEADERS: [&str; 4] = [
    "content-encoding",
    "content-length",
    "transfer-encoding",
    "connection",
];

pub fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP_HEADERS.contains(&name.as_str())
}

/// An upstream response whose body has not been read yet.
pub struct UpstreamImage {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: BoxStream<'static, std::io::Result<Bytes>>,
}

impl UpstreamImage {
    /// Upstream headers minus the hop-by-hop ones.
    pub fn forwarded_headers(&self) -> HeaderMap {
        let mut forwarded = HeaderMap::new();
        for (name, value) in self.headers.iter() {
            if !is_hop_by_hop(name) {
                forwarded.append(name.clone(), value.clone());
            }
        }
        forwarded
    }
}

#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Issue exactly one upstream request. Errors mean the request could not be made.
    async fn fetch(&self, params: &ImageProxyParams) -> Result<UpstreamImage>;
}
