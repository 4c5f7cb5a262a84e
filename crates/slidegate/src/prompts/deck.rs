//! Deck outline and single-slide prompts

use super::templates::{
    DECK_SYSTEM_INSTRUCTION, INSERT_MARKER, OUTLINE_CONTEXT_HEADER, OUTLINE_PROMPT,
    OUTLINE_TOPIC_FALLBACK, SINGLE_SLIDE_PROMPT,
};
use super::{BuiltPrompt, TEXT_MODEL, fill};
use crate::provider::{GenerateContentRequest, GenerationConfig, Part};
use crate::requests::{OutlineRequest, SingleSlideRequest, SlideSummary};

/// Characters of slide content shown per outline line
const SUMMARY_CHARS: usize = 120;

/// Attachments first, in order, then the instruction text
pub fn outline_prompt(request: &OutlineRequest) -> BuiltPrompt {
    let topic = request.topic.trim();
    let topic = if topic.is_empty() {
        OUTLINE_TOPIC_FALLBACK
    } else {
        topic
    };

    let mut parts: Vec<Part> = request
        .attachments
        .iter()
        .map(|a| Part::inline_data(a.mime_type.as_str(), a.data.as_str()))
        .collect();
    parts.push(Part::text(fill(OUTLINE_PROMPT, &[("topic", topic)])));

    BuiltPrompt {
        model: TEXT_MODEL.to_string(),
        request: deck_request(parts),
    }
}

pub fn single_slide_prompt(request: &SingleSlideRequest) -> BuiltPrompt {
    let outline = outline_context(&request.existing_slides, request.insert_index);
    let text = fill(
        SINGLE_SLIDE_PROMPT,
        &[
            ("topic", request.presentation_topic.as_str()),
            ("outline", outline.as_str()),
            ("description", request.slide_description.as_str()),
        ],
    );

    BuiltPrompt {
        model: TEXT_MODEL.to_string(),
        request: deck_request(vec![Part::text(text)]),
    }
}

/// Render the current deck with an optional insertion marker
///
/// Empty when there are no slides. Positions run from 0 to `slides.len()`
/// inclusive: the marker is emitted at `insert_index` before that
/// position's slide line, so an index equal to the slide count puts it last
/// and an index outside that range emits no marker.
pub fn outline_context(slides: &[SlideSummary], insert_index: i64) -> String {
    if slides.is_empty() {
        return String::new();
    }

    let mut out = String::from(OUTLINE_CONTEXT_HEADER);
    for i in 0..=slides.len() {
        if i64::try_from(i).is_ok_and(|i| i == insert_index) {
            out.push_str(INSERT_MARKER);
            out.push('\n');
        }
        if let Some(slide) = slides.get(i) {
            out.push_str(&summary_line(i, slide));
            out.push('\n');
        }
    }
    out
}

fn summary_line(index: usize, slide: &SlideSummary) -> String {
    let content: String = slide
        .content
        .replace('\n', "; ")
        .chars()
        .take(SUMMARY_CHARS)
        .collect();
    format!("Slide {}: {} ({}...)", index + 1, slide.title, content)
}

fn deck_request(parts: Vec<Part>) -> GenerateContentRequest {
    GenerateContentRequest::user(parts)
        .with_system_instruction(DECK_SYSTEM_INSTRUCTION)
        .with_generation_config(GenerationConfig::json_response())
}
