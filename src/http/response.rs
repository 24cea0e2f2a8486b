//! # HTTP responses
//! src/http/response.rs
//!
//! Immutable response value, its staged builder, and the wire serializer.
//!
//! ## Serialized format
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! \r\n
//! Hello
//! ```
//!
//! A header carrying N values serializes as N separate lines under the
//! same name, in insertion order. The blank separator line is only
//! written when a body follows it.
//!
//! ## Example
//!
//! ```
//! use webserver::http::Response;
//!
//! let response = Response::builder(200)
//!     .header("Content-Type", "text/plain")
//!     .body("X")
//!     .build();
//!
//! assert_eq!(
//!     response.to_bytes(),
//!     b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nX"
//! );
//! ```

use std::io::Write;

use super::{status, Headers};

/// An HTTP/1.1 response. Immutable once built.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    phrase: String,
    headers: Headers,
    body: Vec<u8>,
}

impl Response {
    /// Starts building a response with the given status code.
    ///
    /// The reason phrase is derived from the static status table at build
    /// time unless overridden; codes outside the table get an empty
    /// phrase rather than a panic.
    pub fn builder(status: u16) -> ResponseBuilder {
        ResponseBuilder {
            status,
            phrase: None,
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    /// 200 response with a `text/plain` body.
    pub fn ok(body: &str) -> Self {
        Response::builder(200)
            .header("Content-Type", "text/plain")
            .body(body)
            .build()
    }

    /// Canonical 404 response.
    pub fn not_found() -> Self {
        Response::builder(404)
            .header("Content-Type", "text/plain")
            .body("404 Not Found")
            .build()
    }

    /// 400 response carrying a short reason.
    pub fn bad_request(message: &str) -> Self {
        Response::builder(400)
            .header("Content-Type", "text/plain")
            .body(&format!("400 Bad Request: {message}"))
            .build()
    }

    /// 500 response carrying a short reason.
    pub fn server_error(message: &str) -> Self {
        Response::builder(500)
            .header("Content-Type", "text/plain")
            .body(&format!("500 Internal Server Error: {message}"))
            .build()
    }

    /// Numeric status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Reason phrase that will appear on the status line.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Response headers.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Response body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Serializes the response to wire bytes.
    ///
    /// Status line, then one line per header value in insertion order,
    /// then — only if the body is non-empty — the blank separator line
    /// and the body.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();

        let status_line = format!("HTTP/1.1 {} {}\r\n", self.status, self.phrase);
        out.extend_from_slice(status_line.as_bytes());

        for (name, values) in self.headers.iter() {
            for value in values {
                let header_line = format!("{name}: {value}\r\n");
                out.extend_from_slice(header_line.as_bytes());
            }
        }

        if !self.body.is_empty() {
            out.extend_from_slice(b"\r\n");
            out.extend_from_slice(&self.body);
        }

        out
    }

    /// Writes the serialized response to `output` and flushes it.
    pub fn write_to<W: Write>(&self, output: &mut W) -> std::io::Result<()> {
        output.write_all(&self.to_bytes())?;
        output.flush()
    }
}

/// Staged builder for [`Response`].
#[derive(Debug)]
pub struct ResponseBuilder {
    status: u16,
    phrase: Option<String>,
    headers: Headers,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Overrides the reason phrase derived from the status table.
    pub fn phrase(mut self, phrase: &str) -> Self {
        self.phrase = Some(phrase.to_string());
        self
    }

    /// Appends one header value.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Sets the body from a string.
    pub fn body(mut self, body: &str) -> Self {
        self.body = body.as_bytes().to_vec();
        self
    }

    /// Sets the body from raw bytes (static files, images, archives).
    pub fn body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Finalizes the immutable response.
    pub fn build(self) -> Response {
        let phrase = self
            .phrase
            .unwrap_or_else(|| status::reason_phrase(self.status).unwrap_or("").to_string());
        Response {
            status: self.status,
            phrase,
            headers: self.headers,
            body: self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_serialization_with_body() {
        let response = Response::builder(200)
            .header("Content-Type", "text/plain")
            .body("X")
            .build();

        assert_eq!(
            response.to_bytes(),
            b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nX"
        );
    }

    #[test]
    fn test_empty_body_writes_no_separator() {
        let response = Response::builder(204)
            .header("Content-Type", "text/plain")
            .build();

        assert_eq!(
            response.to_bytes(),
            b"HTTP/1.1 204 No Content\r\nContent-Type: text/plain\r\n"
        );
    }

    #[test]
    fn test_multi_value_header_one_line_per_value() {
        let response = Response::builder(200)
            .header("Set-Cookie", "a=1")
            .header("Set-Cookie", "b=2")
            .body("ok")
            .build();

        let text = String::from_utf8(response.to_bytes()).unwrap();
        assert!(text.contains("Set-Cookie: a=1\r\n"));
        assert!(text.contains("Set-Cookie: b=2\r\n"));
        let first = text.find("Set-Cookie: a=1").unwrap();
        let second = text.find("Set-Cookie: b=2").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_headers_serialize_in_insertion_order() {
        let response = Response::builder(200)
            .header("B-Header", "1")
            .header("A-Header", "2")
            .body("ok")
            .build();

        let text = String::from_utf8(response.to_bytes()).unwrap();
        assert!(text.find("B-Header").unwrap() < text.find("A-Header").unwrap());
    }

    #[test]
    fn test_unknown_status_gets_empty_phrase() {
        let response = Response::builder(799).body("?").build();
        assert_eq!(response.phrase(), "");
        let text = String::from_utf8(response.to_bytes()).unwrap();
        assert!(text.starts_with("HTTP/1.1 799 \r\n"));
    }

    #[test]
    fn test_phrase_override() {
        let response = Response::builder(200).phrase("Fine").body("ok").build();
        let text = String::from_utf8(response.to_bytes()).unwrap();
        assert!(text.starts_with("HTTP/1.1 200 Fine\r\n"));
    }

    #[test]
    fn test_write_to_matches_to_bytes() {
        let response = Response::ok("hello");
        let mut sink = Vec::new();
        response.write_to(&mut sink).unwrap();
        assert_eq!(sink, response.to_bytes());
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(Response::ok("hi").status(), 200);
        assert_eq!(Response::not_found().status(), 404);

        let bad = Response::bad_request("no good");
        assert_eq!(bad.status(), 400);
        assert!(String::from_utf8_lossy(bad.body()).contains("no good"));

        let err = Response::server_error("boom");
        assert_eq!(err.status(), 500);
        assert!(String::from_utf8_lossy(err.body()).contains("boom"));
    }

    #[test]
    fn test_body_bytes() {
        let data = vec![0x00, 0x01, 0xFF];
        let response = Response::builder(200).body_bytes(data.clone()).build();
        assert_eq!(response.body(), &data[..]);
    }
}
