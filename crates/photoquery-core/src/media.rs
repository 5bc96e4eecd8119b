use std::path::Path;

use serde::Serialize;

/// Image extensions that viewers are unlikely to render natively but that we
/// can convert to JPEG.
const NEEDS_CONVERSION_EXTENSIONS: &[&str] = &[
    "arw", "cr2", "cr3", "dng", "heic", "jp2", "nef", "psd", "rw2", "tif", "tiff",
];

/// Extensions some viewers render and others don't (JPEG 2000 works in Safari only).
const PARTIAL_SUPPORT_EXTENSIONS: &[&str] = &["jp2"];

const HEIC_EXTENSIONS: &[&str] = &["heic", "heif"];

/// How a file should be routed for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    NeedsConversion,
    /// Try native rendering first, convert if that fails
    PartiallySupported,
    NativelySupported,
}

/// Lowercase, without a leading dot.
pub fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_lowercase()
}

/// Normalized extension of a file path, if it has one.
pub fn extension_of(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(normalize_extension)
        .filter(|e| !e.is_empty())
}

pub fn needs_conversion(extension: &str) -> bool {
    NEEDS_CONVERSION_EXTENSIONS.contains(&normalize_extension(extension).as_str())
}

pub fn has_partial_support(extension: &str) -> bool {
    PARTIAL_SUPPORT_EXTENSIONS.contains(&normalize_extension(extension).as_str())
}

pub fn is_heic_family(extension: &str) -> bool {
    HEIC_EXTENSIONS.contains(&normalize_extension(extension).as_str())
}

/// Single routing decision; partial support wins over conversion so the
/// native renderer gets the first chance.
pub fn classify(extension: &str) -> MediaKind {
    if has_partial_support(extension) {
        MediaKind::PartiallySupported
    } else if needs_conversion(extension) {
        MediaKind::NeedsConversion
    } else {
        MediaKind::NativelySupported
    }
}

/// Whether `path` looks like an image, by MIME type or by a known raw/convertible extension.
pub fn is_image(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    let by_mime = mime_guess::from_path(path)
        .iter()
        .any(|mime| mime.type_() == mime_guess::mime::IMAGE);
    by_mime
        || extension_of(path).map_or(false, |ext| needs_conversion(&ext) || is_heic_family(&ext))
}
