//! Prompt gallery backend
//!
//! Turns free text into distinct image prompts with a hosted text model, hands
//! back locally-routed image URLs, and proxies the image bytes from the hosted
//! image model so the API key never leaves the server.

pub mod ai;
pub mod config;
pub mod encoding;
pub mod error;
pub mod generator;
pub mod image;
pub mod models;
pub mod prompts;
pub mod server;
pub mod store;

pub use error::{Error, Result};
