//! Generative API access: wire types, the outbound client, and extraction
//! of text or image payloads from response envelopes.

mod client;
mod extract;
pub mod types;

pub use client::{ContentGenerator, GeminiClient, ProviderError, model_path};
pub use extract::{extract_inline_base64, extract_text};
pub use types::{
    Blob, Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    ImageGenerationConfig, Part,
};
