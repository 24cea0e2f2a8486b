//! # HTTP status phrases
//! src/http/status.rs
//!
//! Static table mapping status codes to their reason phrases (RFC 9110).
//! The table only lists codes the server can realistically emit; callers
//! must handle the `None` case for everything else instead of panicking.

/// Reason phrase for `code`, if the code is in the static table.
///
/// # Example
/// ```
/// use webserver::http::status::reason_phrase;
///
/// assert_eq!(reason_phrase(200), Some("OK"));
/// assert_eq!(reason_phrase(404), Some("Not Found"));
/// assert_eq!(reason_phrase(799), None);
/// ```
pub fn reason_phrase(code: u16) -> Option<&'static str> {
    let phrase = match code {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        301 => "Moved Permanently",
        302 => "Found",
        304 => "Not Modified",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        408 => "Request Timeout",
        409 => "Conflict",
        411 => "Length Required",
        413 => "Payload Too Large",
        414 => "URI Too Long",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        503 => "Service Unavailable",
        505 => "HTTP Version Not Supported",
        _ => return None,
    };
    Some(phrase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_phrases() {
        assert_eq!(reason_phrase(200), Some("OK"));
        assert_eq!(reason_phrase(400), Some("Bad Request"));
        assert_eq!(reason_phrase(404), Some("Not Found"));
        assert_eq!(reason_phrase(500), Some("Internal Server Error"));
    }

    #[test]
    fn test_unknown_code_is_none() {
        assert_eq!(reason_phrase(299), None);
        assert_eq!(reason_phrase(600), None);
        assert_eq!(reason_phrase(0), None);
    }
}
