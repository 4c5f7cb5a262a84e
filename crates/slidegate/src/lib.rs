//! Slidegate - local gateway between a slide-deck builder and Gemini
//!
//! Translates five client intents (deck outline, single slide, slide image,
//! themed background, speaker notes) into `generateContent` calls and
//! reduces the provider's response envelopes to simple text or JSON.

pub mod api;
pub mod config;
pub mod error;
pub mod prompts;
pub mod provider;
pub mod requests;
pub mod server;

pub use error::SlidegateError;
