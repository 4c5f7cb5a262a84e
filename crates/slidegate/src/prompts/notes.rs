//! Speaker-notes coaching prompt

use super::templates::NOTES_PROMPT;
use super::{BuiltPrompt, TEXT_MODEL, fill};
use crate::provider::{GenerateContentRequest, Part};
use crate::requests::{EnhanceNotesRequest, NotesMode};

pub fn enhance_notes_prompt(request: &EnhanceNotesRequest) -> BuiltPrompt {
    let language_line = match (&request.mode, &request.target_language) {
        (NotesMode::Translate, Some(language)) => format!("Target Language: {language}\n"),
        _ => String::new(),
    };

    let text = fill(
        NOTES_PROMPT,
        &[
            ("notes", request.notes.as_str()),
            ("mode", request.mode.as_str()),
            ("language_line", language_line.as_str()),
        ],
    );

    BuiltPrompt {
        model: TEXT_MODEL.to_string(),
        request: GenerateContentRequest::user(vec![Part::text(text)]),
    }
}
