// Server loop module
// Server main loop: accepts connections until shutdown, then drains

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::shutdown::Shutdown;
use crate::config;
use crate::logger;

/// Run the accept loop until shutdown is requested, then drain.
///
/// Each accepted connection is counted and served on its own task. On
/// shutdown the loop stops accepting and waits for active connections to
/// finish, bounded by `performance.shutdown_grace`.
#[allow(clippy::ignored_unit_patterns)]
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<config::AppState>,
    active_connections: Arc<AtomicUsize>,
    shutdown: Arc<Shutdown>,
) -> std::io::Result<()> {
    loop {
        if shutdown.requested.load(Ordering::SeqCst) {
            break;
        }

        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = shutdown.notify.notified() => {
                break;
            }
        }
    }

    // Stop accepting before draining
    drop(listener);
    drain_connections(&state, &active_connections).await;
    logger::log_shutdown_complete();
    Ok(())
}

/// Wait for active connections to finish, up to the configured grace period.
async fn drain_connections(state: &Arc<config::AppState>, active_connections: &Arc<AtomicUsize>) {
    let grace = std::time::Duration::from_secs(state.config.performance.shutdown_grace);
    let deadline = tokio::time::Instant::now() + grace;

    loop {
        let remaining = active_connections.load(Ordering::SeqCst);
        if remaining == 0 {
            break;
        }
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Shutdown grace period elapsed with {remaining} connection(s) still active"
            ));
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }
}
