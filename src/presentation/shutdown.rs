//! Ctrl+C / SIGTERM handling for the notifier loop.

use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix;
use tokio_util::sync::CancellationToken;

pub const TRACING_TARGET: &str = "hookpulse::shutdown";

/// Cancels `token` once SIGINT (Ctrl+C) or, on Unix, SIGTERM arrives.
///
/// If no handler can be installed the token is left alone and the process
/// has to be stopped externally.
pub async fn cancel_on_signal(token: CancellationToken) {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => {
                tracing::info!(target: TRACING_TARGET, "Received Ctrl+C signal, stopping");
                true
            }
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "Failed to install Ctrl+C handler"
                );
                false
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match unix::signal(unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                tracing::info!(target: TRACING_TARGET, "Received SIGTERM signal, stopping");
                true
            }
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "Failed to install SIGTERM handler"
                );
                false
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<bool>();

    tokio::pin!(ctrl_c, terminate);
    let mut ctrl_c_done = false;
    let mut terminate_done = false;
    loop {
        let received = tokio::select! {
            received = &mut ctrl_c, if !ctrl_c_done => {
                ctrl_c_done = true;
                received
            }
            received = &mut terminate, if !terminate_done => {
                terminate_done = true;
                received
            }
            else => return,
        };
        if received {
            token.cancel();
            return;
        }
    }
}
