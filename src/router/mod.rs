//! # Request routing
//! src/router/mod.rs
//!
//! Maps request paths to handlers by exact string match on the base path
//! (query suffix stripped). No wildcards, prefixes or path parameters.
//!
//! ```text
//! Request → validate method → route table → handler → Response
//!                                  ↓ miss
//!                           static files (webroot)
//!                                  ↓ miss
//!                           /404 route or built-in 404
//! ```
//!
//! The table is populated once at startup and read-only afterwards, so
//! worker threads share it behind an `Arc` without locking.

use std::collections::HashMap;

use log::{debug, error};
use thiserror::Error;

use crate::files::{FileError, FileResolver};
use crate::http::{Request, Response};

/// Error returned by a failing handler.
///
/// Carries only a message; the router turns it into a 500 response.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct HandlerError(pub String);

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<std::io::Error> for HandlerError {
    fn from(err: std::io::Error) -> Self {
        Self(err.to_string())
    }
}

/// A unit of behavior mapping a request to a response.
pub trait Handler: Send + Sync {
    fn handle(&self, request: &Request) -> Result<Response, HandlerError>;
}

impl<F> Handler for F
where
    F: Fn(&Request) -> Result<Response, HandlerError> + Send + Sync,
{
    fn handle(&self, request: &Request) -> Result<Response, HandlerError> {
        self(request)
    }
}

/// Errors raised while registering routes.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The path is empty or does not start with `/`.
    #[error("invalid route path: {0:?}")]
    InvalidPath(String),

    /// A handler is already registered for the path.
    #[error("duplicate route: {0:?}")]
    DuplicateRoute(String),
}

/// Serves files from the webroot; the router's default route.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    resolver: FileResolver,
}

impl StaticFiles {
    pub fn new(resolver: FileResolver) -> Self {
        Self { resolver }
    }

    /// Resolves the request's base path to a file response.
    fn serve(&self, request: &Request) -> Result<Response, FileError> {
        let file = self.resolver.resolve(request.base_path())?;
        Ok(Response::builder(200)
            .header("Content-Type", file.content_type)
            .header("Content-Length", &file.bytes.len().to_string())
            .body_bytes(file.bytes)
            .build())
    }
}

impl Handler for StaticFiles {
    /// As a registered route, a resolution failure is already the final
    /// answer: 404, with traversal attempts indistinguishable from
    /// missing files.
    fn handle(&self, request: &Request) -> Result<Response, HandlerError> {
        match self.serve(request) {
            Ok(response) => Ok(response),
            Err(err) => {
                debug!("static serve failed for {}: {err}", request.base_path());
                Ok(Response::not_found())
            }
        }
    }
}

/// Exact-match route table with built-in fallbacks.
///
/// Built-in default entries: `/` (webroot index via the static handler),
/// `/404` and `/500` (canonical error pages). Additional routes are
/// registered before the server starts accepting; the table is never
/// mutated afterwards.
pub struct Router {
    routes: HashMap<String, Box<dyn Handler>>,
    fallback: StaticFiles,
}

impl Router {
    /// Creates a router with an empty table; static files from
    /// `resolver` remain the default route, and misses fall back to a
    /// built-in 404 response unless a `/404` route is registered.
    pub fn new(resolver: FileResolver) -> Self {
        Self {
            routes: HashMap::new(),
            fallback: StaticFiles::new(resolver),
        }
    }

    /// Creates a router pre-populated with the built-in default entries:
    /// `/` (webroot index), `/404` and `/500` (canonical error pages).
    pub fn with_defaults(resolver: FileResolver) -> Self {
        let mut router = Self::new(resolver);
        let index = router.fallback.clone();
        router
            .routes
            .insert("/".to_string(), Box::new(index));
        router.routes.insert(
            "/404".to_string(),
            Box::new(|_: &Request| Ok(Response::not_found())),
        );
        router.routes.insert(
            "/500".to_string(),
            Box::new(|_: &Request| {
                Ok(Response::builder(500)
                    .header("Content-Type", "text/plain")
                    .body("500 Internal Server Error")
                    .build())
            }),
        );
        router
    }

    /// Registers `handler` for `path`.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPath`] if the path is empty or does not
    /// start with `/`; [`RouterError::DuplicateRoute`] if the path is
    /// already registered (the built-in defaults count).
    pub fn add_route(&mut self, path: &str, handler: Box<dyn Handler>) -> Result<(), RouterError> {
        if path.is_empty() || !path.starts_with('/') {
            return Err(RouterError::InvalidPath(path.to_string()));
        }
        if self.routes.contains_key(path) {
            return Err(RouterError::DuplicateRoute(path.to_string()));
        }
        self.routes.insert(path.to_string(), handler);
        Ok(())
    }

    /// Resolves and runs the handler for `request`, converting every
    /// failure into a structured response.
    ///
    /// An unsupported method yields 400 before any handler runs. A
    /// handler failure yields 500 with the failure message in the body;
    /// note that this discloses internal detail and a hardening pass
    /// should suppress it.
    pub fn process(&self, request: &Request) -> Response {
        if !request.method().is_supported() {
            return Response::bad_request(&format!("unsupported method {}", request.method()));
        }

        let path = request.base_path();
        let outcome = match self.routes.get(path) {
            Some(handler) => handler.handle(request),
            None => match self.fallback.serve(request) {
                Ok(response) => Ok(response),
                Err(err) => {
                    debug!("no route or file for {path}: {err}");
                    return self.not_found(request);
                }
            },
        };

        match outcome {
            Ok(response) => response,
            Err(err) => {
                error!("handler for {path} failed: {err}");
                Response::server_error(&err.to_string())
            }
        }
    }

    fn not_found(&self, request: &Request) -> Response {
        match self.routes.get("/404") {
            Some(handler) => handler
                .handle(request)
                .unwrap_or_else(|_| Response::not_found()),
            None => Response::not_found(),
        }
    }
}
