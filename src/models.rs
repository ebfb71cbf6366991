//! Data models and structures
//!
//! Defines the request/response payloads of the HTTP surface and the rows
//! written to the generation log.

use serde::{Deserialize, Serialize};

/// Body of `POST /generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    #[serde(default)]
    pub text: String,
}

/// One extracted prompt with its seed and locally-routed proxy URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptRecord {
    pub prompt: String,
    pub url: String,
    pub seed: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub images: Vec<PromptRecord>,
}

/// Query parameters of `GET /image_proxy`.
///
/// Values are forwarded upstream untouched; only `prompt` is checked.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageProxyParams {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub seed: String,
    #[serde(default = "default_dimension")]
    pub width: String,
    #[serde(default = "default_dimension")]
    pub height: String,
    #[serde(default = "default_nologo")]
    pub nologo: String,
}

fn default_dimension() -> String {
    "768".to_string()
}

fn default_nologo() -> String {
    "true".to_string()
}

impl ImageProxyParams {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            seed: String::new(),
            width: default_dimension(),
            height: default_dimension(),
            nologo: default_nologo(),
        }
    }

    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = seed.into();
        self
    }

    /// Build from raw query pairs. The first value of a repeated key wins;
    /// unknown keys are ignored.
    pub fn from_query_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::new(String::new());
        let mut seen: Vec<String> = Vec::new();

        for (key, value) in pairs {
            if seen.contains(&key) {
                continue;
            }
            let field = match key.as_str() {
                "prompt" => &mut params.prompt,
                "seed" => &mut params.seed,
                "width" => &mut params.width,
                "height" => &mut params.height,
                "nologo" => &mut params.nologo,
                _ => continue,
            };
            *field = value;
            seen.push(key);
        }

        params
    }
}

/// Row inserted into the generation log. The seed is stored as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationLogEntry {
    pub prompt: String,
    pub image_url: String,
    pub seed: String,
}

impl From<&PromptRecord> for GenerationLogEntry {
    fn from(record: &PromptRecord) -> Self {
        Self {
            prompt: record.prompt.clone(),
            image_url: record.url.clone(),
            seed: record.seed.to_string(),
        }
    }
}
