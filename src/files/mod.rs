//! # Static file resolution
//! src/files/mod.rs
//!
//! Maps request paths to files under a single webroot directory. The
//! webroot is the security boundary for file serving, enforced in two
//! mandatory stages:
//!
//! 1. Reject any path whose string form contains `..`, `./` or `/.`.
//! 2. Resolve the remainder against the webroot's canonical absolute
//!    path, normalize it, and require the result to still be inside the
//!    webroot.
//!
//! Callers are expected to answer 404 for every failure kind so that a
//! traversal attempt is indistinguishable from an ordinary missing file.

pub mod mime;

use std::fs;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Failures while resolving a request path to a file.
///
/// All variants map to 404 at the handler boundary; the distinction only
/// exists for logging.
#[derive(Debug, Error)]
pub enum FileError {
    /// The path failed one of the traversal checks.
    #[error("path traversal rejected: {0:?}")]
    TraversalRejected(String),

    /// No file exists at the resolved location (or the webroot itself is
    /// missing or unreadable).
    #[error("file not found: {0:?}")]
    NotFound(String),

    /// The resolved location exists but is not a regular file.
    #[error("not a regular file: {0:?}")]
    NotAFile(String),
}

/// A resolved static file: its bytes and inferred content type.
#[derive(Debug)]
pub struct StaticFile {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Resolves request paths to files under a fixed webroot.
///
/// # Example
/// ```no_run
/// use webserver::files::FileResolver;
///
/// let resolver = FileResolver::new("./webroot");
/// let file = resolver.resolve("/index.html").unwrap();
/// assert_eq!(file.content_type, "text/html");
/// ```
#[derive(Debug, Clone)]
pub struct FileResolver {
    webroot: PathBuf,
}

impl FileResolver {
    /// Creates a resolver rooted at `webroot`.
    ///
    /// The directory does not have to exist yet; a missing webroot makes
    /// every resolution fail as not-found.
    pub fn new(webroot: impl Into<PathBuf>) -> Self {
        Self {
            webroot: webroot.into(),
        }
    }

    /// The configured webroot path, as given.
    pub fn webroot(&self) -> &Path {
        &self.webroot
    }

    /// Resolves `request_path` to a file under the webroot.
    ///
    /// Query strings and fragments are stripped before any other
    /// processing. An empty or trailing-slash path defaults to
    /// `index.html`.
    pub fn resolve(&self, request_path: &str) -> Result<StaticFile, FileError> {
        let path = request_path
            .split(['?', '#'])
            .next()
            .unwrap_or(request_path);

        // Stage 1: outright substring rejection, before touching the
        // filesystem.
        if path.contains("..") || path.contains("./") || path.contains("/.") {
            return Err(FileError::TraversalRejected(request_path.to_string()));
        }

        let mut relative = path.trim_start_matches('/').to_string();
        if relative.is_empty() || relative.ends_with('/') {
            relative.push_str("index.html");
        }

        // Stage 2: resolve against the canonical webroot and require the
        // normalized result to stay inside it.
        let root = fs::canonicalize(&self.webroot)
            .map_err(|_| FileError::NotFound(request_path.to_string()))?;
        let candidate = normalize(&root.join(&relative));
        if !candidate.starts_with(&root) {
            return Err(FileError::TraversalRejected(request_path.to_string()));
        }

        let metadata = fs::metadata(&candidate)
            .map_err(|_| FileError::NotFound(request_path.to_string()))?;
        if !metadata.is_file() {
            return Err(FileError::NotAFile(request_path.to_string()));
        }

        let bytes =
            fs::read(&candidate).map_err(|_| FileError::NotFound(request_path.to_string()))?;
        let file_name = candidate
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("");

        Ok(StaticFile {
            content_type: mime::from_file_name(file_name),
            bytes,
        })
    }
}

/// Lexically normalizes a path, collapsing `.` and `..` segments.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}
