//! # Worker pool
//! src/server/pool.rs
//!
//! Bounded pool of worker threads fed from a shared connection queue.
//! The acceptor pushes accepted sockets; each worker pops one and runs
//! its full connection cycle with blocking I/O. On shutdown the queue is
//! drained first, so every accepted connection is still served.

use std::collections::VecDeque;
use std::net::TcpStream;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

use log::{debug, error};

use crate::router::Router;
use crate::server::connection;

struct QueueState {
    connections: VecDeque<TcpStream>,
    stopped: bool,
}

struct Queue {
    state: Mutex<QueueState>,
    available: Condvar,
}

/// Fixed-size pool of connection workers.
pub struct WorkerPool {
    queue: Arc<Queue>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns `size` worker threads sharing the read-only `router`.
    pub fn new(size: usize, router: Arc<Router>) -> Self {
        let queue = Arc::new(Queue {
            state: Mutex::new(QueueState {
                connections: VecDeque::new(),
                stopped: false,
            }),
            available: Condvar::new(),
        });

        let workers = (0..size)
            .map(|id| {
                let queue = Arc::clone(&queue);
                let router = Arc::clone(&router);
                thread::Builder::new()
                    .name(format!("worker-{id}"))
                    .spawn(move || worker_loop(id, queue, router))
                    .expect("failed to spawn worker thread")
            })
            .collect();

        Self { queue, workers }
    }

    /// Queues an accepted connection for the next free worker.
    pub fn submit(&self, connection: TcpStream) {
        let mut state = self.queue.state.lock().unwrap();
        state.connections.push_back(connection);
        self.queue.available.notify_one();
    }

    /// Stops the pool: no further submissions are expected, queued
    /// connections are still served, and all workers are joined.
    pub fn shutdown(self) {
        {
            let mut state = self.queue.state.lock().unwrap();
            state.stopped = true;
        }
        self.queue.available.notify_all();

        for worker in self.workers {
            if worker.join().is_err() {
                error!("worker thread panicked during shutdown");
            }
        }
    }
}

fn worker_loop(id: usize, queue: Arc<Queue>, router: Arc<Router>) {
    loop {
        let connection = {
            let mut state = queue.state.lock().unwrap();
            loop {
                if let Some(connection) = state.connections.pop_front() {
                    break connection;
                }
                if state.stopped {
                    debug!("worker-{id} exiting");
                    return;
                }
                state = queue.available.wait(state).unwrap();
            }
        };

        // A panic must only cost this one connection, never the worker
        // or its siblings.
        let outcome = catch_unwind(AssertUnwindSafe(|| connection::handle(connection, &router)));
        if outcome.is_err() {
            error!("worker-{id}: connection handling panicked");
        }
    }
}
