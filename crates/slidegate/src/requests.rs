//! Client request payloads, one per supported intent
//!
//! Decoding never rejects a payload for missing or oddly typed fields:
//! strings default to empty, lists to empty, the insert index to -1.
//! Defaulting happens here, once, so prompt builders work on plain values.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// The five API endpoints, keyed by their path under `/api/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Outline,
    SingleSlide,
    SlideImage,
    ThemedBackground,
    EnhanceNotes,
}

impl Endpoint {
    pub const ALL: [Endpoint; 5] = [
        Endpoint::Outline,
        Endpoint::SingleSlide,
        Endpoint::SlideImage,
        Endpoint::ThemedBackground,
        Endpoint::EnhanceNotes,
    ];

    /// Full request path, e.g. `/api/outline-stream`
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Outline => "/api/outline-stream",
            Endpoint::SingleSlide => "/api/single-slide",
            Endpoint::SlideImage => "/api/slide-image",
            Endpoint::ThemedBackground => "/api/themed-background",
            Endpoint::EnhanceNotes => "/api/enhance-notes",
        }
    }

    /// Exact-match lookup by request path
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.path() == path)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A decoded client request
#[derive(Debug, Clone, PartialEq)]
pub enum ClientRequest {
    Outline(OutlineRequest),
    SingleSlide(SingleSlideRequest),
    SlideImage(SlideImageRequest),
    ThemedBackground(ThemedBackgroundRequest),
    EnhanceNotes(EnhanceNotesRequest),
}

impl ClientRequest {
    /// Decode a raw body for the given endpoint; an empty body reads as `{}`
    pub fn parse(endpoint: Endpoint, body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = if body.iter().all(u8::is_ascii_whitespace) {
            Value::Object(Default::default())
        } else {
            serde_json::from_slice(body)?
        };
        // A non-object top level carries no usable fields
        let value = match value {
            Value::Object(_) => value,
            _ => Value::Object(Default::default()),
        };

        Ok(match endpoint {
            Endpoint::Outline => ClientRequest::Outline(serde_json::from_value(value)?),
            Endpoint::SingleSlide => ClientRequest::SingleSlide(serde_json::from_value(value)?),
            Endpoint::SlideImage => ClientRequest::SlideImage(serde_json::from_value(value)?),
            Endpoint::ThemedBackground => {
                ClientRequest::ThemedBackground(serde_json::from_value(value)?)
            }
            Endpoint::EnhanceNotes => ClientRequest::EnhanceNotes(serde_json::from_value(value)?),
        })
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            ClientRequest::Outline(_) => Endpoint::Outline,
            ClientRequest::SingleSlide(_) => Endpoint::SingleSlide,
            ClientRequest::SlideImage(_) => Endpoint::SlideImage,
            ClientRequest::ThemedBackground(_) => Endpoint::ThemedBackground,
            ClientRequest::EnhanceNotes(_) => Endpoint::EnhanceNotes,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub topic: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub attachments: Vec<Attachment>,
}

/// A user-supplied file, already base64 encoded by the client
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(default, deserialize_with = "lenient_string")]
    pub mime_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleSlideRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub presentation_topic: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub slide_description: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub existing_slides: Vec<SlideSummary>,
    /// Position of the new slide; anything outside `0..=existing_slides.len()`
    /// means no insertion marker
    #[serde(default = "no_insert_index", deserialize_with = "lenient_index")]
    pub insert_index: i64,
}

impl Default for SingleSlideRequest {
    fn default() -> Self {
        Self {
            presentation_topic: String::new(),
            slide_description: String::new(),
            existing_slides: Vec::new(),
            insert_index: no_insert_index(),
        }
    }
}

fn no_insert_index() -> i64 {
    -1
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SlideSummary {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SlideImageRequest {
    #[serde(default, deserialize_with = "lenient_object")]
    pub slide: SlideVisual,
    #[serde(default, deserialize_with = "lenient_object")]
    pub config: ImageConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideVisual {
    #[serde(default, deserialize_with = "lenient_string")]
    pub visual_description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemedBackgroundRequest {
    #[serde(default, deserialize_with = "lenient_object")]
    pub theme: Theme,
    #[serde(default, deserialize_with = "lenient_string")]
    pub presentation_context: String,
    #[serde(default, deserialize_with = "lenient_object")]
    pub config: ImageConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub prompt_snippet: String,
}

/// Image generation options shared by both image endpoints
///
/// Empty strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub aspect_ratio: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub image_size: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceNotesRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub notes: String,
    #[serde(default, deserialize_with = "lenient_mode")]
    pub mode: NotesMode,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub target_language: Option<String>,
}

/// What to do with the speaker notes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NotesMode {
    #[default]
    Enhance,
    Translate,
    /// Any other instruction, forwarded to the model verbatim
    Other(String),
}

impl NotesMode {
    pub fn as_str(&self) -> &str {
        match self {
            NotesMode::Enhance => "enhance",
            NotesMode::Translate => "translate",
            NotesMode::Other(mode) => mode,
        }
    }
}

impl From<String> for NotesMode {
    fn from(mode: String) -> Self {
        match mode.as_str() {
            "" | "enhance" => NotesMode::Enhance,
            "translate" => NotesMode::Translate,
            _ => NotesMode::Other(mode),
        }
    }
}

impl fmt::Display for NotesMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_string(Value::deserialize(deserializer)?))
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = lenient_string(deserializer)?;
    Ok(if s.is_empty() { None } else { Some(s) })
}

fn lenient_mode<'de, D>(deserializer: D) -> Result<NotesMode, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_string(deserializer).map(NotesMode::from)
}

fn lenient_index<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let index = match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(index.unwrap_or_else(no_insert_index))
}

/// An object of the wrong shape decodes as its default
fn lenient_object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(object_or_default(Value::deserialize(deserializer)?))
}

/// Only a JSON object fills a struct; derived impls would also take arrays
/// positionally
fn object_or_default<T>(value: Value) -> T
where
    T: DeserializeOwned + Default,
{
    match value {
        Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
        _ => T::default(),
    }
}

/// A non-list decodes as empty; malformed entries decode as their default
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let values = match Value::deserialize(deserializer)? {
        Value::Array(values) => values,
        _ => return Ok(Vec::new()),
    };
    Ok(values.into_iter().map(object_or_default).collect())
}
