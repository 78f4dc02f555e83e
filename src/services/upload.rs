//! Upload allow-lists and request shapes
//!
//! Files are checked against a per-component-type extension allow-list
//! before anything is sent to the upload service. The service itself is
//! called by the host; this module only shapes the request and decodes the
//! reply.

use serde::{Deserialize, Serialize};

use super::errors::UploadError;
use crate::models::component::ComponentType;

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
pub const HTML_EXTENSIONS: &[&str] = &["html", "css"];

/// Extension allow-list for a component type. Text components take no files.
pub fn allowed_extensions(kind: ComponentType) -> &'static [&'static str] {
    match kind {
        ComponentType::Image => IMAGE_EXTENSIONS,
        ComponentType::Html => HTML_EXTENSIONS,
        ComponentType::Text => &[],
    }
}

/// Lower-cased extension after the last dot, if any
pub fn file_extension(file_name: &str) -> Option<String> {
    let (_, extension) = file_name.rsplit_once('.')?;
    if extension.is_empty() {
        return None;
    }
    Some(extension.to_ascii_lowercase())
}

/// Request sent to the upload service alongside the raw file
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub article_id: String,
    pub file_name: String,
    pub extension: String,
}

/// Reply from the upload service
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct UploadResponse {
    #[serde(default)]
    pub message: String,
    pub path: String,
}

/// Check `file_name` against the allow-list for `kind` and build the
/// upload request for the current article.
pub fn validate_upload(
    article_id: &str,
    file_name: &str,
    kind: ComponentType,
) -> Result<UploadRequest, UploadError> {
    let allowed = allowed_extensions(kind);
    if allowed.is_empty() {
        log::info!("Rejected upload '{}' for {} component", file_name, kind.name());
        return Err(UploadError::UploadsNotAccepted { kind: kind.label() });
    }

    match file_extension(file_name) {
        Some(extension) if allowed.contains(&extension.as_str()) => Ok(UploadRequest {
            article_id: article_id.to_string(),
            file_name: file_name.to_string(),
            extension,
        }),
        _ => {
            log::info!("Rejected upload '{}' for {} component", file_name, kind.name());
            Err(UploadError::DisallowedExtension {
                file_name: file_name.to_string(),
                allowed,
            })
        }
    }
}
