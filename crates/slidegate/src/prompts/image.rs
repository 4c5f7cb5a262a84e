//! Background image prompts

use super::templates::{
    PRESENTATION_CONTEXT_FALLBACK, SLIDE_IMAGE_PROMPT, THEMED_BACKGROUND_PROMPT,
};
use super::{BuiltPrompt, IMAGE_MODEL, fill};
use crate::provider::{GenerateContentRequest, GenerationConfig, ImageGenerationConfig, Part};
use crate::requests::{ImageConfig, SlideImageRequest, ThemedBackgroundRequest};

const DEFAULT_ASPECT_RATIO: &str = "16:9";

pub fn slide_image_prompt(request: &SlideImageRequest) -> BuiltPrompt {
    let text = fill(
        SLIDE_IMAGE_PROMPT,
        &[
            ("visual", request.slide.visual_description.as_str()),
            ("title", request.slide.title.as_str()),
        ],
    );
    image_prompt(text, &request.config)
}

pub fn themed_background_prompt(request: &ThemedBackgroundRequest) -> BuiltPrompt {
    let context = if request.presentation_context.is_empty() {
        PRESENTATION_CONTEXT_FALLBACK
    } else {
        request.presentation_context.as_str()
    };
    let text = fill(
        THEMED_BACKGROUND_PROMPT,
        &[
            ("theme", request.theme.name.as_str()),
            ("snippet", request.theme.prompt_snippet.as_str()),
            ("context", context),
        ],
    );
    image_prompt(text, &request.config)
}

fn image_prompt(text: String, config: &ImageConfig) -> BuiltPrompt {
    let image_config = ImageGenerationConfig {
        aspect_ratio: config
            .aspect_ratio
            .clone()
            .unwrap_or_else(|| DEFAULT_ASPECT_RATIO.to_string()),
        image_size: config.image_size.clone(),
    };

    BuiltPrompt {
        model: config.model.clone().unwrap_or_else(|| IMAGE_MODEL.to_string()),
        request: GenerateContentRequest::user(vec![Part::text(text)])
            .with_generation_config(GenerationConfig::image(image_config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requests::{SlideVisual, Theme};

    fn image_config_of(prompt: &BuiltPrompt) -> &ImageGenerationConfig {
        prompt
            .request
            .generation_config
            .as_ref()
            .and_then(|c| c.image_config.as_ref())
            .expect("image prompts carry an image config")
    }

    fn text_of(prompt: &BuiltPrompt) -> &str {
        match &prompt.request.contents[0].parts[..] {
            [Part::Text { text }] => text.as_str(),
            other => panic!("expected one text part, got {other:?}"),
        }
    }

    #[test]
    fn test_aspect_ratio_defaults_to_16_9() {
        let built = slide_image_prompt(&SlideImageRequest::default());
        assert_eq!(image_config_of(&built).aspect_ratio, "16:9");
        assert_eq!(image_config_of(&built).image_size, None);
    }

    #[test]
    fn test_aspect_ratio_is_forwarded() {
        let request = SlideImageRequest {
            config: ImageConfig {
                aspect_ratio: Some("4:3".to_string()),
                image_size: Some("1K".to_string()),
                model: None,
            },
            ..SlideImageRequest::default()
        };
        let built = slide_image_prompt(&request);
        assert_eq!(image_config_of(&built).aspect_ratio, "4:3");
        assert_eq!(image_config_of(&built).image_size.as_deref(), Some("1K"));
    }

    #[test]
    fn test_model_override() {
        let built = slide_image_prompt(&SlideImageRequest::default());
        assert_eq!(built.model, "gemini-2.5-flash-image");

        let request = ThemedBackgroundRequest {
            config: ImageConfig {
                model: Some("gemini-3-pro-image-preview".to_string()),
                ..ImageConfig::default()
            },
            ..ThemedBackgroundRequest::default()
        };
        assert_eq!(
            themed_background_prompt(&request).model,
            "gemini-3-pro-image-preview"
        );
    }

    #[test]
    fn test_slide_image_text() {
        let built = slide_image_prompt(&SlideImageRequest {
            slide: SlideVisual {
                visual_description: "Aurora over a glacier".to_string(),
                title: "Climate".to_string(),
            },
            config: ImageConfig::default(),
        });

        let text = text_of(&built);
        assert!(text.contains("Visual Concept: Aurora over a glacier\n"));
        assert!(text.contains("Thematic Context: Climate\n"));
        assert!(text.contains("- ZERO text, words, letters, numbers, or characters\n"));
        assert!(text.contains("- No watermarks, logos, or overlays\n"));
        assert!(text.ends_with("- Suitable as a backdrop for text overlay\n"));
        assert!(built.request.system_instruction.is_none());
        assert!(built.request.generation_config.as_ref().unwrap().response_mime_type.is_none());
    }

    #[test]
    fn test_themed_background_text() {
        let built = themed_background_prompt(&ThemedBackgroundRequest {
            theme: Theme {
                name: "Midnight".to_string(),
                prompt_snippet: "Deep navy gradients".to_string(),
            },
            presentation_context: String::new(),
            config: ImageConfig::default(),
        });

        let text = text_of(&built);
        assert!(text.contains("THEME: Midnight\nDeep navy gradients\n\n"));
        assert!(text.contains("PRESENTATION CONTEXT:\nProfessional presentation\n\n"));
        assert!(text.ends_with("- Must work across many slides\n"));
        assert!(built.request.system_instruction.is_none());
    }
}
