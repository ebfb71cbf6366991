//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Text API error: {0}")]
    TextApi(String),

    #[error("Image API error: {0}")]
    ImageApi(String),

    #[error("Generation log error: {0}")]
    Store(String),

    #[error("Could not extract ideas from text")]
    NoIdeas,
}

pub type Result<T> = std::result::Result<T, Error>;
