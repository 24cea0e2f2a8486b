//! # HTTP requests
//! src/http/request.rs
//!
//! Immutable value type for a parsed request plus the staged builder that
//! produces it. Required fields (method, path) are checked at `build()`
//! time, not earlier, so partially filled builders can be passed around.

use thiserror::Error;

use super::Headers;

/// HTTP methods the parser recognizes.
///
/// Recognizing a method is not the same as serving it: the router only
/// dispatches GET, POST, PUT and DELETE and answers 400 for the rest
/// (see [`Method::is_supported`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Trace,
    Connect,
}

impl Method {
    /// Parses a method token from the request line.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "GET" => Some(Method::Get),
            "HEAD" => Some(Method::Head),
            "POST" => Some(Method::Post),
            "PUT" => Some(Method::Put),
            "DELETE" => Some(Method::Delete),
            "PATCH" => Some(Method::Patch),
            "OPTIONS" => Some(Method::Options),
            "TRACE" => Some(Method::Trace),
            "CONNECT" => Some(Method::Connect),
            _ => None,
        }
    }

    /// Wire spelling of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
            Method::Connect => "CONNECT",
        }
    }

    /// Whether the router dispatches this method to handlers.
    pub fn is_supported(&self) -> bool {
        matches!(
            self,
            Method::Get | Method::Post | Method::Put | Method::Delete
        )
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised when finalizing a [`RequestBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestBuildError {
    /// No method was set on the builder.
    #[error("request method is required")]
    MissingMethod,

    /// No path was set on the builder.
    #[error("request path is required")]
    MissingPath,

    /// The path does not start with `/`.
    #[error("request path must start with '/': {0}")]
    InvalidPath(String),
}

/// A parsed HTTP/1.1 request. Immutable once constructed.
///
/// # Example
/// ```
/// use webserver::http::{Method, Request};
///
/// let request = Request::builder()
///     .method(Method::Get)
///     .path("/search?q=rust")
///     .header("Host", "localhost")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.base_path(), "/search");
/// assert_eq!(request.query_param("q"), Some("rust"));
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    headers: Headers,
    body: Option<String>,
}

impl Request {
    /// Starts building a request.
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }

    /// HTTP method of the request.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Request path exactly as received, including any query suffix.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Request path with any `?query` suffix stripped.
    pub fn base_path(&self) -> &str {
        match self.path.find('?') {
            Some(pos) => &self.path[..pos],
            None => &self.path,
        }
    }

    /// Value of the named query parameter, if present.
    ///
    /// A parameter without `=` yields an empty value.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        let query = &self.path[self.path.find('?')? + 1..];
        for pair in query.split('&') {
            match pair.split_once('=') {
                Some((key, value)) if key == name => return Some(value),
                None if pair == name => return Some(""),
                _ => {}
            }
        }
        None
    }

    /// All request headers.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// First value of the named header.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Request body, if one was carried.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// Staged builder for [`Request`].
#[derive(Debug, Default)]
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    headers: Headers,
    body: Option<String>,
}

impl RequestBuilder {
    /// Sets the HTTP method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the request path (must start with `/`; checked at build time).
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Appends one header value.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Replaces the header map wholesale.
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the request body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Validates required fields and produces the immutable request.
    pub fn build(self) -> Result<Request, RequestBuildError> {
        let method = self.method.ok_or(RequestBuildError::MissingMethod)?;
        let path = self.path.ok_or(RequestBuildError::MissingPath)?;
        if !path.starts_with('/') {
            return Err(RequestBuildError::InvalidPath(path));
        }
        Ok(Request {
            method,
            path,
            headers: self.headers,
            body: self.body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_tokens_round_trip() {
        for token in ["GET", "HEAD", "POST", "PUT", "DELETE", "PATCH", "OPTIONS", "TRACE"] {
            let method = Method::from_token(token).unwrap();
            assert_eq!(method.as_str(), token);
        }
        assert_eq!(Method::from_token("get"), None);
        assert_eq!(Method::from_token("FETCH"), None);
    }

    #[test]
    fn test_supported_methods() {
        assert!(Method::Get.is_supported());
        assert!(Method::Post.is_supported());
        assert!(Method::Put.is_supported());
        assert!(Method::Delete.is_supported());
        assert!(!Method::Trace.is_supported());
        assert!(!Method::Head.is_supported());
        assert!(!Method::Options.is_supported());
    }

    #[test]
    fn test_builder_minimal() {
        let request = Request::builder()
            .method(Method::Get)
            .path("/")
            .build()
            .unwrap();

        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.path(), "/");
        assert!(request.headers().is_empty());
        assert_eq!(request.body(), None);
    }

    #[test]
    fn test_builder_requires_method() {
        let result = Request::builder().path("/").build();
        assert_eq!(result.unwrap_err(), RequestBuildError::MissingMethod);
    }

    #[test]
    fn test_builder_requires_path() {
        let result = Request::builder().method(Method::Get).build();
        assert_eq!(result.unwrap_err(), RequestBuildError::MissingPath);
    }

    #[test]
    fn test_builder_rejects_relative_path() {
        let result = Request::builder()
            .method(Method::Get)
            .path("index.html")
            .build();
        assert!(matches!(result, Err(RequestBuildError::InvalidPath(_))));
    }

    #[test]
    fn test_base_path_strips_query() {
        let request = Request::builder()
            .method(Method::Get)
            .path("/files/report.pdf?download=1")
            .build()
            .unwrap();

        assert_eq!(request.base_path(), "/files/report.pdf");
        assert_eq!(request.path(), "/files/report.pdf?download=1");
    }

    #[test]
    fn test_base_path_without_query() {
        let request = Request::builder()
            .method(Method::Get)
            .path("/plain")
            .build()
            .unwrap();
        assert_eq!(request.base_path(), "/plain");
    }

    #[test]
    fn test_query_param_lookup() {
        let request = Request::builder()
            .method(Method::Get)
            .path("/search?q=rust&page=2&debug")
            .build()
            .unwrap();

        assert_eq!(request.query_param("q"), Some("rust"));
        assert_eq!(request.query_param("page"), Some("2"));
        assert_eq!(request.query_param("debug"), Some(""));
        assert_eq!(request.query_param("missing"), None);
    }

    #[test]
    fn test_header_accessors() {
        let request = Request::builder()
            .method(Method::Get)
            .path("/")
            .header("Accept", "text/html")
            .header("Accept", "text/plain")
            .build()
            .unwrap();

        assert_eq!(request.header("accept"), Some("text/html"));
        assert_eq!(request.headers().get_all("Accept").len(), 2);
    }
}
