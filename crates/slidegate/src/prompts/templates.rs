//! Fixed prompt text shared by the builders
//!
//! Placeholders use `{name}` and are filled with `str::replace`.

/// System instruction for both deck-authoring endpoints
pub const DECK_SYSTEM_INSTRUCTION: &str = r#"You are an elite presentation architect and visual storytelling expert.

Each slide must have: 'title', 'content', 'visualDescription', and 'layout'.

Layout options:
- "center", "left", "right", "top", "bottom", "split-left", "split-right", "diagonal", "scattered"

Rules:
- NEVER use the same layout for consecutive slides.
- Separate each content point with a newline character (\n). Do not use markdown bullets.
- Titles: max 8 words.
- Visual descriptions must be text-free (no words/letters/logos/watermarks)."#;

/// Placeholder: {topic}
pub const OUTLINE_PROMPT: &str = "Create a world-class, award-winning presentation deck for: {topic}.\n\
Return ONLY valid JSON (no markdown) as an array of slides with title, content, visualDescription, layout.";

/// Used when the outline request carries no topic
pub const OUTLINE_TOPIC_FALLBACK: &str = "the provided content";

/// Placeholders: {topic}, {outline}, {description}
pub const SINGLE_SLIDE_PROMPT: &str = "Presentation Topic: {topic}\n\
{outline}\n\
New Slide Request: {description}\n\n\
Create a single, award-winning slide that fits naturally.\n\
Return ONLY valid JSON (no markdown) with keys: title, content, visualDescription, layout.";

pub const OUTLINE_CONTEXT_HEADER: &str = "\nCurrent Presentation Outline:\n";

pub const INSERT_MARKER: &str = ">>> [INSERT NEW SLIDE HERE] <<<";

/// Placeholders: {visual}, {title}
pub const SLIDE_IMAGE_PROMPT: &str = "Ultra-premium, award-winning presentation background image.\n\n\
Visual Concept: {visual}\n\
Thematic Context: {title}\n\n\
ABSOLUTE REQUIREMENTS:\n\
- ZERO text, words, letters, numbers, or characters\n\
- No watermarks, logos, or overlays\n\
- Suitable as a backdrop for text overlay\n";

/// Placeholders: {theme}, {snippet}, {context}
pub const THEMED_BACKGROUND_PROMPT: &str = "Premium presentation background with consistent, cohesive visual theme.\n\n\
THEME: {theme}\n\
{snippet}\n\n\
PRESENTATION CONTEXT:\n\
{context}\n\n\
ABSOLUTE REQUIREMENTS:\n\
- ZERO text, words, letters, numbers, or characters\n\
- No watermarks, logos, or overlays\n\
- Must work across many slides\n";

/// Used when the themed background request carries no context
pub const PRESENTATION_CONTEXT_FALLBACK: &str = "Professional presentation";

/// Placeholders: {notes}, {mode}, {language_line}
pub const NOTES_PROMPT: &str = "Act as a professional presentation coach and speechwriter.\n\
Improve the following speaker notes based on the requested mode.\n\n\
Original Notes: \"{notes}\"\n\n\
Mode: {mode}\n\
{language_line}\n\
Return ONLY the improved notes text. Do not include explanations.";
