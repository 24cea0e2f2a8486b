//! # Entry point
//! src/main.rs

use log::{error, info};

use webserver::config::Config;
use webserver::server::Server;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::new();
    if let Err(message) = config.validate() {
        eprintln!("invalid configuration: {message}");
        std::process::exit(2);
    }

    info!("starting webserver on {}", config.address());

    let server = match Server::bind(config) {
        Ok(server) => server,
        Err(err) => {
            error!("server failed to start: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = server.run() {
        error!("server terminated: {err}");
        std::process::exit(1);
    }
}
