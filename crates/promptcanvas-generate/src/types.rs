//! Request/response types, errors and the generator seams.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future used by the object-safe async traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The HTTP request failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The service returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// An input image could not be fetched.
    #[error("image fetch failed: {0}")]
    Fetch(String),

    /// An input image could not be decoded or encoded.
    #[error("image encode failed: {0}")]
    Encode(String),
}

/// Encoded image bytes with their media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub media_type: String,
}

impl EncodedImage {
    pub fn new(data: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self {
            data,
            media_type: media_type.into(),
        }
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }
}

/// One generation call: ordered input images plus the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub images: Vec<EncodedImage>,
}

/// What the service sent back. Either part may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResponse {
    pub image: Option<EncodedImage>,
    pub text: Option<String>,
}

/// An external image generator.
pub trait ImageGenerator {
    fn generate<'a>(&'a self, request: &'a GenerationRequest) -> BoxFuture<'a, Result<GenerationResponse, GenerateError>>;
}

/// Fetches the raw bytes behind an external image URL.
pub trait ImageFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, GenerateError>>;
}
