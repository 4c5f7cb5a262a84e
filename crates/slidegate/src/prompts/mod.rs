//! Prompt builders: one pure function per client intent
//!
//! Each builder turns a decoded request into the model to call and the
//! `generateContent` body to send. Builders never fail; missing input just
//! makes for a thinner prompt.

mod deck;
mod image;
mod notes;
pub mod templates;

pub use deck::{outline_context, outline_prompt, single_slide_prompt};
pub use image::{slide_image_prompt, themed_background_prompt};
pub use notes::enhance_notes_prompt;

use crate::provider::GenerateContentRequest;
use crate::requests::ClientRequest;

/// Model for all text endpoints
pub const TEXT_MODEL: &str = "gemini-2.5-pro";

/// Default model for the image endpoints
pub const IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// A ready-to-send provider call
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltPrompt {
    pub model: String,
    pub request: GenerateContentRequest,
}

/// Build the provider call for any client request
pub fn build(request: &ClientRequest) -> BuiltPrompt {
    match request {
        ClientRequest::Outline(r) => outline_prompt(r),
        ClientRequest::SingleSlide(r) => single_slide_prompt(r),
        ClientRequest::SlideImage(r) => slide_image_prompt(r),
        ClientRequest::ThemedBackground(r) => themed_background_prompt(r),
        ClientRequest::EnhanceNotes(r) => enhance_notes_prompt(r),
    }
}

/// Substitute `{key}` placeholders in a single pass
///
/// Substituted values are never rescanned, so user text containing
/// `{placeholder}` stays literal. Unknown placeholders are left as-is.
pub(crate) fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let matched = values.iter().find(|(key, _)| {
            tail[1..].starts_with(key) && tail[1 + key.len()..].starts_with('}')
        });
        match matched {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 2..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
