//! AI service integration for idea extraction
//!
//! Splits free text into short image prompts using the Pollinations text API,
//! degrading to local heuristics when the API misbehaves.

pub mod client;
pub mod extraction;
pub mod mock;

pub use client::TextClient;
pub use extraction::Extraction;
pub use mock::MockIdeaExtractor;

use async_trait::async_trait;

/// Produces an ordered list of visual prompts from free text.
///
/// Implementations never fail: every problem is absorbed into one of the
/// fallback [`Extraction`] outcomes.
#[async_trait]
pub trait IdeaExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Extraction;
}
