//! # webserver
//! src/lib.rs
//!
//! A concurrent HTTP/1.1 server implemented from scratch on top of
//! `std::net`: blocking sockets, a single acceptor thread and a bounded
//! pool of worker threads, each of which owns one connection for exactly
//! one request/response cycle.
//!
//! ## Architecture
//!
//! - `http`: wire protocol — request parsing, response building and
//!   serialization, status phrases, the ordered header map
//! - `router`: exact-match path routing with 400/404/500 fallbacks
//! - `files`: webroot-scoped static file resolution and the MIME table
//! - `server`: TCP listener, worker pool and per-connection handling
//! - `config`: CLI/env configuration
//!
//! ## Example
//!
//! ```no_run
//! use webserver::config::Config;
//! use webserver::server::Server;
//!
//! let config = Config::default();
//! let server = Server::bind(config).expect("bind failed");
//! server.run().expect("server error");
//! ```

pub mod config;
pub mod files;
pub mod http;
pub mod router;
pub mod server;
