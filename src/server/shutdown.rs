// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Shutdown coordination state
pub struct Shutdown {
    /// Notified when shutdown is requested (SIGTERM, SIGINT)
    pub notify: Arc<Notify>,
    /// Whether shutdown has been requested
    pub requested: Arc<AtomicBool>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self {
            notify: Arc::new(Notify::new()),
            requested: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request shutdown and wake the accept loop
    pub fn trigger(&self) {
        self.requested.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Start signal handlers (Unix)
///
/// Spawns a background task that listens for SIGTERM and SIGINT and
/// triggers graceful shutdown.
#[cfg(unix)]
pub fn start_signal_handler(shutdown: Arc<Shutdown>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                crate::logger::log_error(&format!("Failed to register SIGTERM handler: {e}"));
                return;
            }
        };
        let mut sigint = match signal(SignalKind::interrupt()) {
            Ok(s) => s,
            Err(e) => {
                crate::logger::log_error(&format!("Failed to register SIGINT handler: {e}"));
                return;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => {
                crate::logger::log_shutdown_started();
            }
            _ = sigint.recv() => {
                crate::logger::log_shutdown_started();
            }
        }

        shutdown.trigger();
    });
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Arc<Shutdown>) {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            crate::logger::log_shutdown_started();
            shutdown.trigger();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trigger_wakes_waiter() {
        let shutdown = Arc::new(Shutdown::new());
        assert!(!shutdown.requested.load(Ordering::SeqCst));

        let waiter = {
            let shutdown = Arc::clone(&shutdown);
            tokio::spawn(async move {
                shutdown.notify.notified().await;
            })
        };

        // Let the waiter register before triggering
        tokio::task::yield_now().await;
        shutdown.trigger();

        waiter.await.unwrap();
        assert!(shutdown.requested.load(Ordering::SeqCst));
    }
}
