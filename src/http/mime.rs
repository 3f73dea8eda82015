use std::path::Path;

/// Supported file extensions and the `Content-Type` sent for each.
pub const FILE_TYPES: &[(&str, &str)] = &[
    ("gif", "image/gif"),
    ("jpg", "image/jpg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("htm", "text/htm"),
    ("html", "text/html"),
    ("css", "text/css"),
    ("js", "text/js"),
];

/// Looks up the content type for a file extension (no dot, any case).
pub fn content_type(extension: &str) -> Option<&'static str> {
    let extension = extension.to_ascii_lowercase();
    FILE_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

/// Content type for the file at `path`, `None` when its extension is missing
/// or not in [`FILE_TYPES`].
pub fn content_type_for(path: &Path) -> Option<&'static str> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(content_type)
}
