//! # HTTP request parsing
//! src/http/parser.rs
//!
//! Turns a raw byte stream into a [`Request`].
//!
//! The parser reads CRLF- or LF-terminated text lines until a blank line
//! closes the header block, then reads the body according to
//! `Content-Length` — the only body framing supported. Body reads block
//! and accumulate across however many underlying reads the stream needs.
//!
//! Header leniency: a header line without the `": "` separator is logged
//! and dropped instead of failing the whole request. Everything else that
//! is wrong with the head of the message is a hard parse error.

use std::io::BufRead;

use log::warn;
use thiserror::Error;

use super::{Headers, Method, Request};

/// Errors raised while parsing a request from a stream.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The stream ended before any request data arrived.
    #[error("connection closed before a request was received")]
    EmptyStream,

    /// The request line is not `METHOD PATH VERSION`.
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),

    /// `Content-Length` is present but not a non-negative integer.
    #[error("invalid Content-Length: {0:?}")]
    InvalidContentLength(String),

    /// The stream ended before the announced body length was read.
    #[error("unexpected end of stream: expected {expected} body bytes, got {got}")]
    UnexpectedEndOfStream { expected: usize, got: usize },

    /// The underlying stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Whether the failure can still be answered with a 400 response.
    ///
    /// An empty or broken stream has no usable write side; everything
    /// else failed after the connection proved itself readable.
    pub fn is_reportable(&self) -> bool {
        !matches!(self, ParseError::EmptyStream | ParseError::Io(_))
    }
}

/// Parses one HTTP/1.1 request from `stream`.
///
/// # Example
/// ```
/// use std::io::Cursor;
/// use webserver::http::{parse_request, Method};
///
/// let mut stream = Cursor::new(&b"GET /a HTTP/1.1\r\nHost: h\r\n\r\n"[..]);
/// let request = parse_request(&mut stream).unwrap();
///
/// assert_eq!(request.method(), Method::Get);
/// assert_eq!(request.path(), "/a");
/// assert_eq!(request.header("Host"), Some("h"));
/// assert_eq!(request.body(), None);
/// ```
pub fn parse_request<R: BufRead>(stream: &mut R) -> Result<Request, ParseError> {
    let request_line = match read_line(stream)? {
        Some(line) => line,
        None => return Err(ParseError::EmptyStream),
    };

    let mut tokens = request_line.split_whitespace();
    let (method_token, path, _version) = match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(m), Some(p), Some(v)) if tokens.next().is_none() => (m, p, v),
        _ => return Err(ParseError::MalformedRequestLine(request_line.clone())),
    };
    let method = Method::from_token(method_token)
        .ok_or_else(|| ParseError::MalformedRequestLine(request_line.clone()))?;

    let headers = read_headers(stream)?;

    let mut builder = Request::builder()
        .method(method)
        .path(path)
        .headers(headers.clone());

    if let Some(raw_length) = headers.get("Content-Length") {
        let length: usize = raw_length
            .trim()
            .parse()
            .map_err(|_| ParseError::InvalidContentLength(raw_length.to_string()))?;
        if length > 0 {
            let body = read_body(stream, length)?;
            builder = builder.body(String::from_utf8_lossy(&body).into_owned());
        }
    }

    builder
        .build()
        .map_err(|_| ParseError::MalformedRequestLine(request_line))
}

/// Reads header lines until the blank line that closes the block.
///
/// Lines without the `": "` separator are dropped with a warning; values
/// for a repeated name accumulate in order.
fn read_headers<R: BufRead>(stream: &mut R) -> Result<Headers, ParseError> {
    let mut headers = Headers::new();
    loop {
        let line = match read_line(stream)? {
            // EOF inside the header block ends it, same as a blank line;
            // a missing body is caught by Content-Length accounting.
            Some(line) if !line.is_empty() => line,
            _ => break,
        };
        match line.split_once(": ") {
            Some((name, value)) => headers.append(name.trim(), value.trim()),
            None => warn!("dropping malformed header line: {line:?}"),
        }
    }
    Ok(headers)
}

/// Reads exactly `expected` body bytes, accumulating across short reads.
fn read_body<R: BufRead>(stream: &mut R, expected: usize) -> Result<Vec<u8>, ParseError> {
    let mut body = vec![0u8; expected];
    let mut got = 0;
    while got < expected {
        let n = stream.read(&mut body[got..])?;
        if n == 0 {
            return Err(ParseError::UnexpectedEndOfStream { expected, got });
        }
        got += n;
    }
    Ok(body)
}

/// Reads one CRLF- or LF-terminated line, without its terminator.
///
/// Returns `None` at end of stream.
fn read_line<R: BufRead>(stream: &mut R) -> Result<Option<String>, ParseError> {
    let mut raw = Vec::new();
    let n = stream.read_until(b'\n', &mut raw)?;
    if n == 0 {
        return Ok(None);
    }
    if raw.last() == Some(&b'\n') {
        raw.pop();
    }
    if raw.last() == Some(&b'\r') {
        raw.pop();
    }
    Ok(Some(String::from_utf8_lossy(&raw).into_owned()))
}
