//! # HTTP protocol module
//!
//! Implements HTTP/1.1 request/response framing from scratch, without any
//! high-level HTTP library:
//!
//! - Parsing requests from a byte stream
//! - Building responses and serializing them to wire bytes
//! - Status codes and reason phrases
//! - An insertion-ordered, multi-value header map
//!
//! ## Request format
//!
//! ```text
//! GET /path?query=value HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! Another-Header: Value\r\n
//! \r\n
//! ```
//!
//! ## Response format
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! \r\n
//! Hello
//! ```
//!
//! Body framing on both sides is `Content-Length` only; chunked transfer
//! encoding is not supported.

pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod status;

pub use headers::Headers;
pub use parser::{parse_request, ParseError};
pub use request::{Method, Request, RequestBuildError};
pub use response::Response;
