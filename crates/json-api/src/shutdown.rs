//! Graceful shutdown on SIGINT / SIGTERM.

use std::{fmt, io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),
}

/// The signal that started the shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Interrupt => "SIGINT",
            Self::Terminate => "SIGTERM",
        })
    }
}

async fn interrupt() -> Result<ShutdownSignal, ShutdownSignalError> {
    signal::ctrl_c().await.map_err(ShutdownSignalError::CtrlC)?;

    Ok(ShutdownSignal::Interrupt)
}

#[cfg(unix)]
async fn terminate() -> Result<ShutdownSignal, ShutdownSignalError> {
    signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(ShutdownSignalError::SigTerm)?
        .recv()
        .await;

    Ok(ShutdownSignal::Terminate)
}

#[cfg(not(unix))]
async fn terminate() -> Result<ShutdownSignal, ShutdownSignalError> {
    std::future::pending().await
}

/// Resolve with whichever shutdown signal arrives first.
pub(crate) async fn wait_for_signal() -> Result<ShutdownSignal, ShutdownSignalError> {
    tokio::select! {
        signal = interrupt() => signal,
        signal = terminate() => signal,
    }
}

/// Stop the server once a signal arrives, giving in-flight requests `drain`
/// to finish.
pub(crate) async fn listen(handle: ServerHandle, drain: Duration) -> Result<(), ShutdownSignalError> {
    let signal = wait_for_signal().await?;

    info!(%signal, drain_secs = drain.as_secs(), "shutting down");

    handle.stop_graceful(drain);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signals_display_their_names() {
        assert_eq!(ShutdownSignal::Interrupt.to_string(), "SIGINT");
        assert_eq!(ShutdownSignal::Terminate.to_string(), "SIGTERM");
    }
}
