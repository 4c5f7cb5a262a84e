//! Request decoding and prompt building, from raw client bodies to the
//! JSON sent upstream

use serde_json::{Value, json};

use slidegate::prompts::{self, IMAGE_MODEL, TEXT_MODEL};
use slidegate::requests::{ClientRequest, Endpoint};

/// Decode a client body and return the model plus the serialized provider body
fn build_wire(endpoint: Endpoint, body: Value) -> (String, Value) {
    let request = ClientRequest::parse(endpoint, body.to_string().as_bytes())
        .expect("body should decode");
    let built = prompts::build(&request);
    let wire = serde_json::to_value(&built.request).expect("request should serialize");
    (built.model, wire)
}

fn prompt_text(wire: &Value) -> &str {
    let parts = wire["contents"][0]["parts"].as_array().unwrap();
    parts
        .last()
        .and_then(|p| p["text"].as_str())
        .expect("last part should be text")
}

#[test]
fn test_every_endpoint_accepts_empty_body() {
    for endpoint in Endpoint::ALL {
        let request = ClientRequest::parse(endpoint, b"").unwrap();
        assert_eq!(request.endpoint(), endpoint);

        let built = prompts::build(&request);
        assert_eq!(built.request.contents.len(), 1);
        assert_eq!(built.request.contents[0].role, "user");
        assert!(!built.request.contents[0].parts.is_empty());
    }
}

#[test]
fn test_deck_endpoints_share_system_instruction() {
    let (_, outline) = build_wire(Endpoint::Outline, json!({"topic": "Rust"}));
    let (_, single) = build_wire(Endpoint::SingleSlide, json!({"slideDescription": "Ownership"}));

    assert_eq!(outline["systemInstruction"], single["systemInstruction"]);
    assert_eq!(
        outline["generationConfig"],
        json!({"responseMimeType": "application/json"})
    );
    assert_eq!(single["generationConfig"], outline["generationConfig"]);
}

#[test]
fn test_outline_attachments_precede_text() {
    let (model, wire) = build_wire(
        Endpoint::Outline,
        json!({
            "topic": "Quarterly review",
            "attachments": [
                {"mimeType": "application/pdf", "data": "JVBERi0="},
                {"mimeType": "image/jpeg", "data": "/9j/"}
            ]
        }),
    );

    assert_eq!(model, TEXT_MODEL);
    let parts = wire["contents"][0]["parts"].as_array().unwrap();
    assert_eq!(parts.len(), 3);
    assert_eq!(
        parts[0],
        json!({"inlineData": {"mimeType": "application/pdf", "data": "JVBERi0="}})
    );
    assert_eq!(parts[1]["inlineData"]["mimeType"], "image/jpeg");
    assert!(prompt_text(&wire).contains("deck for: Quarterly review."));
}

#[test]
fn test_single_slide_marker_position() {
    let (_, wire) = build_wire(
        Endpoint::SingleSlide,
        json!({
            "presentationTopic": "Solar",
            "slideDescription": "Costs",
            "existingSlides": [
                {"title": "Intro", "content": "Why solar"},
                {"title": "Tech", "content": "Panels"}
            ],
            "insertIndex": "0"
        }),
    );

    let text = prompt_text(&wire);
    let marker = text.find(">>> [INSERT NEW SLIDE HERE] <<<").unwrap();
    let first = text.find("Slide 1: Intro (Why solar...)").unwrap();
    let second = text.find("Slide 2: Tech (Panels...)").unwrap();
    assert!(marker < first && first < second);
    assert!(text.starts_with("Presentation Topic: Solar\n"));
    assert!(text.contains("New Slide Request: Costs"));
}

#[test]
fn test_single_slide_without_slides_has_no_outline() {
    let (_, wire) = build_wire(
        Endpoint::SingleSlide,
        json!({"presentationTopic": "Solar", "slideDescription": "Costs", "insertIndex": 0}),
    );

    let text = prompt_text(&wire);
    assert!(!text.contains("Current Presentation Outline"));
    assert!(!text.contains("INSERT NEW SLIDE HERE"));
}

#[test]
fn test_slide_image_defaults() {
    let (model, wire) = build_wire(
        Endpoint::SlideImage,
        json!({"slide": {"visualDescription": "misty valley", "title": "Origins"}}),
    );

    assert_eq!(model, IMAGE_MODEL);
    assert_eq!(
        wire["generationConfig"],
        json!({"imageConfig": {"aspectRatio": "16:9"}})
    );
    assert!(wire.get("systemInstruction").is_none());

    let text = prompt_text(&wire);
    assert!(text.contains("Visual Concept: misty valley"));
    assert!(text.contains("Thematic Context: Origins"));
}

#[test]
fn test_themed_background_options() {
    let (model, wire) = build_wire(
        Endpoint::ThemedBackground,
        json!({
            "theme": {"name": "Aurora", "promptSnippet": "cool greens"},
            "config": {"aspectRatio": "1:1", "imageSize": "4K", "model": "models/custom-image"}
        }),
    );

    assert_eq!(model, "models/custom-image");
    assert_eq!(
        wire["generationConfig"]["imageConfig"],
        json!({"aspectRatio": "1:1", "imageSize": "4K"})
    );

    let text = prompt_text(&wire);
    assert!(text.contains("THEME: Aurora\ncool greens"));
    assert!(text.contains("Professional presentation"));
}

#[test]
fn test_notes_language_only_when_translating() {
    let (_, translate) = build_wire(
        Endpoint::EnhanceNotes,
        json!({"notes": "Hi", "mode": "translate", "targetLanguage": "German"}),
    );
    assert!(prompt_text(&translate).contains("Mode: translate\nTarget Language: German"));

    let (_, shorten) = build_wire(
        Endpoint::EnhanceNotes,
        json!({"notes": "Hi", "mode": "shorten", "targetLanguage": "German"}),
    );
    assert!(prompt_text(&shorten).contains("Mode: shorten"));
    assert!(!prompt_text(&shorten).contains("German"));

    let (_, default_mode) = build_wire(Endpoint::EnhanceNotes, json!({"notes": "Hi"}));
    assert!(prompt_text(&default_mode).contains("Mode: enhance"));
}

#[test]
fn test_user_text_with_braces_stays_literal() {
    let (_, wire) = build_wire(
        Endpoint::EnhanceNotes,
        json!({"notes": "Use {mode} and {notes} literally"}),
    );

    let text = prompt_text(&wire);
    assert!(text.contains("Original Notes: \"Use {mode} and {notes} literally\""));
    assert!(text.contains("Mode: enhance"));
}
