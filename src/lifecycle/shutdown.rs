//! Shutdown coordination for the gateway.

use std::time::Duration;

use axum_server::Handle;
use tokio::task::JoinHandle;

use crate::lifecycle::signals::shutdown_signal;

/// Coordinator for graceful shutdown of the TLS server.
pub struct Shutdown {
    handle: Handle,
    grace: Duration,
}

impl Shutdown {
    /// Create a coordinator that lets connections drain for `grace`.
    pub fn new(grace: Duration) -> Self {
        Self {
            handle: Handle::new(),
            grace,
        }
    }

    /// Handle to pass to the server.
    pub fn handle(&self) -> Handle {
        self.handle.clone()
    }

    /// Stop accepting and start draining.
    pub fn trigger(&self) {
        tracing::info!(grace_secs = self.grace.as_secs(), "Graceful shutdown started");
        self.handle.graceful_shutdown(Some(self.grace));
    }

    /// Trigger shutdown when the process receives SIGINT or SIGTERM.
    pub fn trigger_on_signal(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            shutdown_signal().await;
            self.trigger();
        })
    }
}
