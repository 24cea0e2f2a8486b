//! # MIME type lookup
//! src/files/mime.rs
//!
//! Extension-based content type table. No content sniffing: an unknown or
//! missing extension is `application/octet-stream`.

const DEFAULT: &str = "application/octet-stream";

/// Content type for a file name, from its extension.
///
/// # Example
/// ```
/// use webserver::files::mime;
///
/// assert_eq!(mime::from_file_name("index.html"), "text/html");
/// assert_eq!(mime::from_file_name("archive.bin"), "application/octet-stream");
/// assert_eq!(mime::from_file_name("Makefile"), "application/octet-stream");
/// ```
pub fn from_file_name(name: &str) -> &'static str {
    let extension = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext,
        _ => return DEFAULT,
    };

    match extension.to_ascii_lowercase().as_str() {
        // Text
        "html" | "htm" => "text/html",
        "txt" => "text/plain",
        "css" => "text/css",
        "csv" => "text/csv",
        "js" => "text/javascript",
        "xml" => "text/xml",

        // Video
        "mp4" => "video/mp4",
        "mpeg" => "video/mpeg",
        "webm" => "video/webm",
        "avi" => "video/x-msvideo",

        // Images
        "jpeg" | "jpg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",

        // Audio
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",

        // Application
        "pdf" => "application/pdf",
        "json" => "application/json",
        "zip" => "application/zip",
        "doc" => "application/msword",

        // Fonts
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "woff" => "font/woff",
        "woff2" => "font/woff2",

        _ => DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_types() {
        assert_eq!(from_file_name("index.html"), "text/html");
        assert_eq!(from_file_name("page.htm"), "text/html");
        assert_eq!(from_file_name("style.css"), "text/css");
        assert_eq!(from_file_name("app.js"), "text/javascript");
        assert_eq!(from_file_name("logo.png"), "image/png");
        assert_eq!(from_file_name("data.json"), "application/json");
        assert_eq!(from_file_name("font.woff2"), "font/woff2");
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert_eq!(from_file_name("PHOTO.JPG"), "image/jpeg");
        assert_eq!(from_file_name("Index.HTML"), "text/html");
    }

    #[test]
    fn test_unknown_or_missing_extension_defaults() {
        assert_eq!(from_file_name("archive.bin"), DEFAULT);
        assert_eq!(from_file_name("README"), DEFAULT);
        assert_eq!(from_file_name("trailing."), DEFAULT);
        assert_eq!(from_file_name(".hidden"), DEFAULT);
        assert_eq!(from_file_name(""), DEFAULT);
    }
}
