//! Generation orchestration: text in, proxy-routed prompt records out.

use crate::ai::IdeaExtractor;
use crate::models::{GenerationLogEntry, PromptRecord};
use crate::store::GenerationLog;
use crate::{encoding, Error, Result};
use rand::Rng;
use tracing::{info, warn};

/// Seeds are drawn uniformly from `0..SEED_LIMIT`.
pub const SEED_LIMIT: u32 = 1_000_000_000;

/// Size requested for every generated image, whatever the caller prefers.
pub const IMAGE_SIZE: u32 = 768;

pub struct Generator {
    extractor: Box<dyn IdeaExtractor>,
    log: Box<dyn GenerationLog>,
}

impl Generator {
    pub fn new(extractor: Box<dyn IdeaExtractor>, log: Box<dyn GenerationLog>) -> Self {
        Self { extractor, log }
    }

    /// Extract prompts from `text` and give each a seed and a proxy URL.
    ///
    /// Log failures are reported and skipped; they never fail the call.
    pub async fn generate(&self, text: &str) -> Result<Vec<PromptRecord>> {
        if text.is_empty() {
            return Err(Error::InvalidInput("No text provided".to_string()));
        }

        let extraction = self.extractor.extract(text).await;
        info!(
            "Extracted {} prompt(s) via {}",
            extraction.prompts().len(),
            extraction.kind()
        );

        let prompts = extraction.into_prompts();
        if prompts.is_empty() {
            return Err(Error::NoIdeas);
        }

        let mut records = Vec::with_capacity(prompts.len());
        for prompt in prompts {
            let seed = rand::thread_rng().gen_range(0..SEED_LIMIT);
            let record = PromptRecord {
                url: proxy_url(&prompt, seed),
                prompt,
                seed,
            };

            if let Err(e) = self.log.record(&GenerationLogEntry::from(&record)).await {
                warn!("Generation log error: {}", e);
            }

            records.push(record);
        }

        Ok(records)
    }
}

/// Locally-routed URL that `/image_proxy` resolves to the generated image.
pub fn proxy_url(prompt: &str, seed: u32) -> String {
    format!(
        "/image_proxy?prompt={}&width={size}&height={size}&seed={}&nologo=true",
        encoding::quote(prompt),
        seed,
        size = IMAGE_SIZE
    )
}
