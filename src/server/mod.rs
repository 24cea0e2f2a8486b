//! # TCP server
//! src/server/mod.rs
//!
//! Owns the listening socket and the worker pool. A single acceptor
//! thread blocks on `accept` and feeds connections to the pool; each
//! worker runs one connection's full parse → route → write cycle.
//!
//! The only state shared across workers is the route table, populated
//! before accepting starts and read-only afterwards, so it needs no
//! locking.

pub mod connection;
pub mod pool;

use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, error, info};

use crate::config::Config;
use crate::files::FileResolver;
use crate::router::{Handler, Router, RouterError};
use crate::server::pool::WorkerPool;

/// A bound, not-yet-running HTTP server.
///
/// Routes are registered between [`Server::bind`] and [`Server::run`];
/// the table is frozen once the accept loop starts.
pub struct Server {
    config: Config,
    listener: TcpListener,
    router: Router,
    running: Arc<AtomicBool>,
}

impl Server {
    /// Binds the listening socket and sets up the default routes
    /// (webroot index, 404 and 500 pages, static file fallback).
    pub fn bind(config: Config) -> io::Result<Self> {
        let listener = TcpListener::bind(config.address())?;
        let router = Router::with_defaults(FileResolver::new(&config.webroot));

        info!("server initialized:");
        info!("  address:     {}", listener.local_addr()?);
        info!("  webroot:     {}", config.webroot);
        info!("  max workers: {}", config.max_workers);

        Ok(Self {
            config,
            listener,
            router,
            running: Arc::new(AtomicBool::new(true)),
        })
    }

    /// The address the listener is actually bound to (relevant when the
    /// configured port is 0).
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Registers a handler; see [`Router::add_route`].
    pub fn add_route(&mut self, path: &str, handler: Box<dyn Handler>) -> Result<(), RouterError> {
        self.router.add_route(path, handler)
    }

    /// Handle for stopping the server from another thread.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            running: Arc::clone(&self.running),
            addr: self.listener.local_addr().ok(),
        }
    }

    /// Runs the accept loop until the shutdown handle fires.
    ///
    /// Accept errors while running are logged and the loop continues;
    /// the accept disturbance caused by shutdown itself is expected and
    /// only logged at debug. In-flight connections are drained before
    /// this returns.
    pub fn run(self) -> io::Result<()> {
        let Server {
            config,
            listener,
            router,
            running,
        } = self;

        let router = Arc::new(router);
        let pool = WorkerPool::new(config.max_workers, Arc::clone(&router));
        info!("listening on {}", listener.local_addr()?);

        while running.load(Ordering::SeqCst) {
            match listener.accept() {
                Ok((connection, peer)) => {
                    if !running.load(Ordering::SeqCst) {
                        // The shutdown wake-up connection, or a client
                        // that raced it; either way no new work starts.
                        break;
                    }
                    debug!("connection received from {peer}");
                    pool.submit(connection);
                }
                Err(err) => {
                    if running.load(Ordering::SeqCst) {
                        error!("error accepting connection: {err}");
                    } else {
                        debug!("accept interrupted by shutdown: {err}");
                    }
                }
            }
        }

        // Close the listening socket before draining the workers.
        drop(listener);
        info!("draining worker pool");
        pool.shutdown();
        info!("server stopped");
        Ok(())
    }
}

/// Stops a running [`Server`].
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    running: Arc<AtomicBool>,
    addr: Option<SocketAddr>,
}

impl ShutdownHandle {
    /// Flips the running flag and wakes the acceptor.
    ///
    /// The wake-up is a plain local connection to the listening socket;
    /// the acceptor re-checks the flag after every accept, so the dummy
    /// connection is dropped unserved. Calling `stop` twice is a no-op.
    pub fn stop(&self) {
        if self.running.swap(false, Ordering::SeqCst) {
            info!("shutting down gracefully");
            if let Some(addr) = self.addr {
                let _ = TcpStream::connect(addr);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{Request, Response};
    use std::thread;
    use std::time::Duration;

    fn test_config(webroot: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.port = 0; // ephemeral
        config.webroot = webroot.to_string_lossy().into_owned();
        config.max_workers = 2;
        config
    }

    #[test]
    fn test_bind_reports_local_addr() {
        let dir = tempfile::tempdir().unwrap();
        let server = Server::bind(test_config(dir.path())).unwrap();
        let addr = server.local_addr().unwrap();
        assert_ne!(addr.port(), 0);
    }

    #[test]
    fn test_add_route_rejects_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = Server::bind(test_config(dir.path())).unwrap();

        server
            .add_route("/ping", Box::new(|_: &Request| Ok(Response::ok("pong"))))
            .unwrap();
        let result = server.add_route("/ping", Box::new(|_: &Request| Ok(Response::ok("again"))));
        assert!(result.is_err());
    }

    #[test]
    fn test_run_stops_on_shutdown_handle() {
        let dir = tempfile::tempdir().unwrap();
        let server = Server::bind(test_config(dir.path())).unwrap();
        let handle = server.shutdown_handle();

        let acceptor = thread::spawn(move || server.run());
        thread::sleep(Duration::from_millis(50));
        handle.stop();
        handle.stop(); // idempotent

        let result = acceptor.join().unwrap();
        assert!(result.is_ok());
    }
}
