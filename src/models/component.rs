//! Content components
//!
//! A component is one visible content unit placed at a layout slot. Its
//! content is a closed sum type: image, rich text, or an uploaded html/css
//! bundle. On the wire `type` and `metadata` sit side by side on the
//! component object, matching the persisted article format.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::layout::{LayoutTemplate, Position};
use super::serde_helpers::serialize_option_as_null;

/// Errors raised while decoding components from JSON
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ModelError {
    /// `metadata` does not fit the declared component type
    #[error("invalid {kind} metadata: {message}")]
    InvalidMetadata { kind: &'static str, message: String },
}

/// Discriminant of [`ComponentContent`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Image,
    Text,
    Html,
}

impl ComponentType {
    pub fn name(&self) -> &'static str {
        match self {
            ComponentType::Image => "image",
            ComponentType::Text => "text",
            ComponentType::Html => "html",
        }
    }

    /// Capitalized label used in option lists
    pub fn label(&self) -> &'static str {
        match self {
            ComponentType::Image => "Image",
            ComponentType::Text => "Text",
            ComponentType::Html => "Html",
        }
    }
}

/// Image component metadata
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageMetadata {
    /// Original file name of the uploaded image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Compressed preview as a data URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_base64: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size_bytes: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_display_fullscreen: Option<bool>,
}

/// Rich text component metadata
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TextMetadata {
    /// Editor output, already converted to html
    pub html_content: String,
}

/// Embedded html/css component metadata
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct HtmlMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_file_base64: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_file_base64: Option<String>,
}

/// Per-type component content
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", content = "metadata", rename_all = "lowercase")]
pub enum ComponentContent {
    Image(ImageMetadata),
    Text(TextMetadata),
    Html(HtmlMetadata),
}

impl Default for ComponentContent {
    fn default() -> Self {
        ComponentContent::Text(TextMetadata::default())
    }
}

impl ComponentContent {
    /// Empty content of the given type
    pub fn empty(kind: ComponentType) -> Self {
        match kind {
            ComponentType::Image => ComponentContent::Image(ImageMetadata::default()),
            ComponentType::Text => ComponentContent::Text(TextMetadata::default()),
            ComponentType::Html => ComponentContent::Html(HtmlMetadata::default()),
        }
    }

    pub fn kind(&self) -> ComponentType {
        match self {
            ComponentContent::Image(_) => ComponentType::Image,
            ComponentContent::Text(_) => ComponentType::Text,
            ComponentContent::Html(_) => ComponentType::Html,
        }
    }

    /// Build content from a type tag and loosely typed metadata.
    /// Missing or null metadata yields the empty content of that type.
    pub fn from_parts(
        kind: ComponentType,
        metadata: Option<serde_json::Value>,
    ) -> Result<Self, ModelError> {
        let value = match metadata {
            None | Some(serde_json::Value::Null) => return Ok(Self::empty(kind)),
            Some(value) => value,
        };

        let invalid = |e: serde_json::Error| ModelError::InvalidMetadata {
            kind: kind.name(),
            message: e.to_string(),
        };

        Ok(match kind {
            ComponentType::Image => ComponentContent::Image(serde_json::from_value(value).map_err(invalid)?),
            ComponentType::Text => ComponentContent::Text(serde_json::from_value(value).map_err(invalid)?),
            ComponentType::Html => ComponentContent::Html(serde_json::from_value(value).map_err(invalid)?),
        })
    }
}

/// One content unit placed at a layout slot
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", try_from = "RawComponent")]
pub struct Component {
    /// Index within the owning frame, as a string. Not a durable identity.
    pub id: String,

    pub position: Position,

    /// Opaque animation key; membership in the animation catalog is not checked
    #[serde(serialize_with = "serialize_option_as_null")]
    pub animation: Option<String>,

    #[serde(flatten)]
    pub content: ComponentContent,

    /// Owning page index, recomputed by the store on every page write
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_index: Option<usize>,

    /// Owning frame index, recomputed by the store on every page write
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_index: Option<usize>,
}

/// Wire form accepted when decoding a component
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawComponent {
    #[serde(default)]
    id: String,
    #[serde(rename = "type")]
    kind: ComponentType,
    #[serde(default)]
    position: Option<Position>,
    #[serde(default)]
    animation: Option<String>,
    #[serde(default)]
    metadata: Option<serde_json::Value>,
    #[serde(default)]
    page_index: Option<usize>,
    #[serde(default)]
    frame_index: Option<usize>,
}

impl TryFrom<RawComponent> for Component {
    type Error = ModelError;

    fn try_from(raw: RawComponent) -> Result<Self, Self::Error> {
        Ok(Component {
            id: raw.id,
            // A missing position is snapped by the owning page on the next write
            position: raw.position.unwrap_or(Position::Center),
            animation: raw.animation,
            content: ComponentContent::from_parts(raw.kind, raw.metadata)?,
            page_index: raw.page_index,
            frame_index: raw.frame_index,
        })
    }
}

impl Component {
    /// Content-less text component at `position`
    pub fn new(position: Position) -> Self {
        Self {
            id: "0".to_string(),
            position,
            animation: None,
            content: ComponentContent::default(),
            page_index: None,
            frame_index: None,
        }
    }

    pub fn kind(&self) -> ComponentType {
        self.content.kind()
    }

    /// Replace the component type. Metadata is never converted across
    /// types: the content is reset to the empty value of `new_type`.
    pub fn change_type(&mut self, new_type: ComponentType) {
        self.content = ComponentContent::empty(new_type);
    }

    /// Move to `position` if `template` allows it. Disallowed requests are
    /// ignored; a current position the template does not allow is snapped
    /// to the first slot. Returns whether the position was applied.
    pub fn change_position(&mut self, position: Position, template: LayoutTemplate) -> bool {
        if template.allows(position) {
            self.position = position;
            return true;
        }

        log::warn!(
            "Position {:?} is not a slot of {}, ignoring",
            position,
            template.name()
        );
        self.snap_position(template);
        false
    }

    /// Snap an out-of-range position to the template's first slot
    pub fn snap_position(&mut self, template: LayoutTemplate) {
        if !template.allows(self.position) {
            self.position = template.first_slot();
        }
    }

    /// Store an animation key (or clear it with `None`)
    pub fn set_animation(&mut self, animation: Option<String>) {
        self.animation = animation.filter(|key| !key.is_empty());
    }

    /// True when both denormalized indices are present
    pub fn location(&self) -> Option<(usize, usize)> {
        match (self.page_index, self.frame_index) {
            (Some(page), Some(frame)) => Some((page, frame)),
            _ => None,
        }
    }

    /// Turn this component into an image carrying an uploaded file.
    /// Caption and fullscreen flag survive when it already was an image.
    pub fn apply_image_upload(&mut self, file_name: &str, file_base64: String, file_size_bytes: u64) {
        let (caption, is_display_fullscreen) = match &self.content {
            ComponentContent::Image(meta) => (meta.caption.clone(), meta.is_display_fullscreen),
            _ => (None, None),
        };

        self.content = ComponentContent::Image(ImageMetadata {
            image: Some(file_name.to_string()),
            file_base64: Some(file_base64),
            file_size_bytes: Some(file_size_bytes),
            caption,
            is_display_fullscreen: Some(is_display_fullscreen.unwrap_or(false)),
        });
    }

    /// Turn this component into an html component carrying an uploaded file.
    /// `.css` files fill the stylesheet fields, anything else the html fields.
    pub fn apply_html_upload(&mut self, file_name: &str, file_base64: String) {
        let mut meta = match &self.content {
            ComponentContent::Html(meta) => meta.clone(),
            _ => HtmlMetadata::default(),
        };

        if file_name.to_ascii_lowercase().ends_with(".css") {
            meta.css = Some(file_name.to_string());
            meta.css_file_base64 = Some(file_base64);
        } else {
            meta.html = Some(file_name.to_string());
            meta.html_file_base64 = Some(file_base64);
        }

        self.content = ComponentContent::Html(meta);
    }

    /// Whether the component has enough content to be offered for reuse
    pub fn is_reusable(&self) -> bool {
        match &self.content {
            ComponentContent::Image(meta) => meta.file_base64.as_deref().is_some_and(|s| !s.is_empty()),
            ComponentContent::Text(meta) => !meta.html_content.is_empty(),
            ComponentContent::Html(_) => false,
        }
    }
}
