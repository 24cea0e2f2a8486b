//! # Server configuration
//! src/config.rs
//!
//! Configuration comes from CLI arguments with environment-variable
//! fallbacks.
//!
//! ## Examples
//!
//! ### CLI
//! ```bash
//! ./webserver --port 8080 --webroot ./webroot --max-workers 10
//! ```
//!
//! ### Environment variables
//! ```bash
//! HTTP_PORT=8080 WEB_ROOT=/srv/www ./webserver
//! ```

use clap::Parser;

/// HTTP/1.1 server configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "webserver")]
#[command(about = "Concurrent HTTP/1.1 server with static file serving")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Port the server listens on
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP to bind
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Directory that static files are served from
    #[arg(long, default_value = "./webroot", env = "WEB_ROOT")]
    pub webroot: String,

    /// Number of worker threads handling connections
    #[arg(long = "max-workers", default_value = "10", env = "MAX_WORKERS")]
    pub max_workers: usize,

    /// Per-connection timeout in milliseconds.
    ///
    /// Exposed for wrapping transports; the core serving path does not
    /// apply per-read timeouts.
    #[arg(
        long = "connection-timeout",
        default_value = "30000",
        env = "CONNECTION_TIMEOUT_MS"
    )]
    pub connection_timeout_ms: u64,
}

impl Config {
    /// Creates a configuration by parsing CLI arguments and the
    /// environment.
    pub fn new() -> Self {
        Config::parse()
    }

    /// Full bind address (`host:port`).
    ///
    /// # Example
    /// ```
    /// use webserver::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration, returning a message for the first
    /// invalid value found.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_workers == 0 {
            return Err("max workers must be >= 1".to_string());
        }
        if self.host.trim().is_empty() {
            return Err("host must not be empty".to_string());
        }
        if self.webroot.trim().is_empty() {
            return Err("webroot must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            webroot: "./webroot".to_string(),
            max_workers: 10,
            connection_timeout_ms: 30_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.webroot, "./webroot");
        assert_eq!(config.max_workers, 10);
        assert_eq!(config.connection_timeout_ms, 30_000);
    }

    #[test]
    fn test_address() {
        let config = Config::default();
        assert_eq!(config.address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_address_custom() {
        let mut config = Config::default();
        config.host = "0.0.0.0".to_string();
        config.port = 3000;
        assert_eq!(config.address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_success() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_workers() {
        let mut config = Config::default();
        config.max_workers = 0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("max workers"));
    }

    #[test]
    fn test_validate_empty_webroot() {
        let mut config = Config::default();
        config.webroot = "  ".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("webroot"));
    }

    #[test]
    fn test_validate_empty_host() {
        let mut config = Config::default();
        config.host = "".to_string();
        assert!(config.validate().is_err());
    }
}
