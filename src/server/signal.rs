// Signal handling module
//
// Supported signals:
// - SIGINT:  Stop the server (Ctrl+C)
// - SIGTERM: Stop the server (Unix only)

use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Start the signal listener
///
/// Spawns a background task that notifies `shutdown` once an interrupt or
/// termination signal arrives. `notify_one` stores a permit, so the accept
/// loop sees the signal even if it is not waiting at that instant.
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    tokio::spawn(async move {
        if let Some(name) = wait_for_signal().await {
            logger::log_signal(name);
            shutdown.notify_one();
        }
    });
}

/// Wait for SIGINT or SIGTERM, returning the signal name
#[cfg(unix)]
async fn wait_for_signal() -> Option<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => Some(s),
        Err(e) => {
            logger::log_warning(&format!("Failed to register SIGTERM handler: {e}"));
            None
        }
    };

    tokio::select! {
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => Some("SIGINT (Ctrl+C)"),
            Err(e) => {
                logger::log_error(&format!("Failed to listen for Ctrl+C: {e}"));
                None
            }
        },
        () = async {
            match sigterm.as_mut() {
                Some(s) => {
                    s.recv().await;
                }
                None => std::future::pending::<()>().await,
            }
        } => Some("SIGTERM"),
    }
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
async fn wait_for_signal() -> Option<&'static str> {
    match tokio::signal::ctrl_c().await {
        Ok(()) => Some("Ctrl+C"),
        Err(e) => {
            logger::log_error(&format!("Failed to listen for Ctrl+C: {e}"));
            None
        }
    }
}
