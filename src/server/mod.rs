//! HTTP surface: landing page, image proxy and generation endpoint.

pub mod error;
pub mod handlers;

use crate::ai::TextClient;
use crate::config::Config;
use crate::generator::Generator;
use crate::image::{ImageClient, ImageSource};
use crate::store::{GenerationLog, NoopLog, SupabaseLog};
use crate::Result;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<Generator>,
    pub images: Arc<dyn ImageSource>,
}

impl AppState {
    pub fn new(generator: Generator, images: Arc<dyn ImageSource>) -> Self {
        Self {
            generator: Arc::new(generator),
            images,
        }
    }

    /// Wire the production collaborators from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        // One connection pool for every outbound collaborator.
        let http_client = config.http_client()?;

        let extractor = TextClient::new_with_client(
            config.api_key.clone(),
            config.text_api_url.clone(),
            http_client.clone(),
        );
        info!("Text API: {}", config.text_api_url);

        let images = ImageClient::new_with_client(
            config.api_key.clone(),
            config.image_api_url.clone(),
            config.image_model.clone(),
            http_client.clone(),
        );
        info!(
            "Image API: {} (model: {})",
            config.image_api_url, config.image_model
        );

        let log: Box<dyn GenerationLog> = match &config.supabase {
            Some(supabase) => {
                info!("Generation logging enabled (table: {})", supabase.table);
                Box::new(SupabaseLog::new_with_client(supabase.clone(), http_client))
            }
            None => {
                info!("Supabase credentials not set; generation logging disabled");
                Box::new(NoopLog)
            }
        };

        Ok(Self::new(
            Generator::new(Box::new(extractor), log),
            Arc::new(images),
        ))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/image_proxy", get(handlers::image_proxy))
        .route("/generate", post(handlers::generate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
