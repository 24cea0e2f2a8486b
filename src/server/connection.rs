//! # Connection handling
//! src/server/connection.rs
//!
//! One accepted socket lives for exactly one request/response cycle:
//! parse, route, serialize, close. Dropping the streams at the end of
//! this function closes the socket, successful or not.

use std::io::BufReader;
use std::net::TcpStream;

use log::{debug, error, warn};

use crate::http::{parse_request, Response};
use crate::router::Router;

/// Runs one connection cycle to completion.
///
/// Parse failures that leave the socket writable are answered with 400;
/// a connection that closed before sending anything usable is dropped
/// without a response. Write failures are logged and the connection is
/// abandoned — they never propagate to the caller.
pub fn handle(stream: TcpStream, router: &Router) {
    let peer = stream
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    let read_half = match stream.try_clone() {
        Ok(clone) => clone,
        Err(err) => {
            error!("failed to clone stream for {peer}: {err}");
            return;
        }
    };
    let mut reader = BufReader::new(read_half);
    let mut writer = stream;

    let response = match parse_request(&mut reader) {
        Ok(request) => {
            debug!("{peer} {} {}", request.method(), request.path());
            router.process(&request)
        }
        Err(err) if err.is_reportable() => {
            warn!("parse error from {peer}: {err}");
            Response::bad_request(&err.to_string())
        }
        Err(err) => {
            debug!("closing {peer} without response: {err}");
            return;
        }
    };

    if let Err(err) = response.write_to(&mut writer) {
        error!("write to {peer} failed: {err}");
    }
}
