//! Pull model output out of a `generateContent` response envelope
//!
//! Only the first candidate is consulted. Missing candidates, content or
//! parts yield an empty string rather than an error.

use super::types::{GenerateContentResponse, Part};

/// Concatenate every text part of the first candidate, in order
pub fn extract_text(response: &GenerateContentResponse) -> String {
    response
        .first_candidate_parts()
        .iter()
        .filter_map(|part| match part {
            Part::Text { text } if !text.is_empty() => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

/// Base64 payload of the first inline-data part of the first candidate
pub fn extract_inline_base64(response: &GenerateContentResponse) -> String {
    response
        .first_candidate_parts()
        .iter()
        .find_map(|part| match part {
            Part::InlineData { inline_data } if !inline_data.data.is_empty() => {
                Some(inline_data.data.clone())
            }
            _ => None,
        })
        .unwrap_or_default()
}
