use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::shutdown::{ShutdownReceiver, ShutdownSender};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// A run only ever needs one stop notification.
const SHUTDOWN_CHANNEL_CAPACITY: usize = 1;

#[must_use]
pub fn shutdown_channel() -> (ShutdownSender, ShutdownReceiver) {
    broadcast::channel::<()>(SHUTDOWN_CHANNEL_CAPACITY)
}

/// Spawn a task that turns Ctrl+C (and SIGTERM on Unix) into a shutdown
/// broadcast. The task also exits once someone else broadcasts shutdown.
pub fn spawn_signal_handler(shutdown_tx: &ShutdownSender) -> tokio::task::JoinHandle<()> {
    let shutdown_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        let mut shutdown_rx = shutdown_tx.subscribe();
        tokio::select! {
            _ = shutdown_rx.recv() => {}
            () = terminate_requested() => {
                debug!("Stop signal received, stopping the run.");
                drop(shutdown_tx.send(()));
            }
        }
    })
}

#[cfg(unix)]
async fn terminate_requested() {
    let mut term_signal = match signal(SignalKind::terminate()) {
        Ok(term_signal) => Some(term_signal),
        Err(err) => {
            warn!("Failed to register SIGTERM handler: {}", err);
            None
        }
    };
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        () = async {
            if let Some(term_signal) = term_signal.as_mut() {
                term_signal.recv().await;
            } else {
                std::future::pending::<()>().await;
            }
        } => {}
    }
}

#[cfg(not(unix))]
async fn terminate_requested() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", err);
        std::future::pending::<()>().await;
    }
}
