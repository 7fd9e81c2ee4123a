//! PromptCanvas image generation
//!
//! Encodes selected images, submits them with a prompt to an external
//! image model, and turns the response into an editor outcome.

pub mod config;
pub mod encode;
pub mod gemini;
pub mod session;
pub mod types;

pub use config::{GeneratorConfig, GeneratorTimeouts};
pub use encode::{BLANK_IMAGE_SIZE, blank_input, encode_input, prepare_request};
pub use gemini::{GeminiClient, HttpFetcher};
pub use session::{generate_into, run_ticket};
pub use types::{
    BoxFuture, EncodedImage, GenerateError, GenerationRequest, GenerationResponse, ImageFetcher, ImageGenerator,
};
