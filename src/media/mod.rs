//! Uploaded media handling: kind detection, upload validation, audio extraction.

mod extract;

pub use extract::extract_audio;

use crate::config::UploadSettings;
use crate::error::{Result, TeinteError};

/// Kind of an uploaded media file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

/// Extensions that carry a video track needing extraction.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "mkv", "webm", "avi"];

/// Determine the media kind from a file name.
pub fn media_kind(file_name: &str) -> MediaKind {
    match extension_of(file_name) {
        Some(ext) if VIDEO_EXTENSIONS.contains(&ext.as_str()) => MediaKind::Video,
        _ => MediaKind::Audio,
    }
}

/// MIME type reported to the content store for an upload.
pub fn content_type(file_name: &str) -> &'static str {
    match extension_of(file_name).as_deref() {
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        Some("m4a") => "audio/mp4",
        Some("wav") => "audio/wav",
        Some("flac") => "audio/flac",
        Some("mp3") => "audio/mpeg",
        _ => "application/octet-stream",
    }
}

/// Validate an upload against the configured policy.
///
/// Checks the extension allow-list and the size ceiling; both are policy
/// values from configuration, not constants baked into the pipeline.
pub fn validate_upload(
    settings: &UploadSettings,
    file_name: &str,
    size_bytes: u64,
) -> Result<MediaKind> {
    let ext = extension_of(file_name).ok_or_else(|| {
        TeinteError::Validation(format!("'{}' has no file extension", file_name))
    })?;

    if !settings.allowed_extensions.iter().any(|e| e == &ext) {
        return Err(TeinteError::Validation(format!(
            "Extension '{}' is not accepted (allowed: {})",
            ext,
            settings.allowed_extensions.join(", ")
        )));
    }

    if size_bytes > settings.max_bytes {
        return Err(TeinteError::Validation(format!(
            "File is {} bytes, exceeds the {} byte limit",
            size_bytes, settings.max_bytes
        )));
    }

    Ok(media_kind(file_name))
}

fn extension_of(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}
