use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Wait for SIGINT/Ctrl-C or SIGTERM, then cancel the sweep.
///
/// In-flight deletions are interrupted and the run returns whatever
/// completed before the signal.
pub async fn wait_for_shutdown_signal(token: CancellationToken) -> Result<(), std::io::Error> {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;

        tokio::select! {
            _ = ctrl_c => {
                info!(event = "cli.signal_received", signal = "SIGINT");
            }
            _ = sigterm.recv() => {
                info!(event = "cli.signal_received", signal = "SIGTERM");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = ctrl_c.await {
            warn!(
                event = "cli.signal_handler_failed",
                error = %e,
            );
            return Err(e);
        }
        info!(event = "cli.signal_received", signal = "SIGINT");
    }

    eprintln!("Interrupted: cancelling in-flight deletions...");
    warn!(event = "cli.run_cancelled");
    token.cancel();
    Ok(())
}

/// Spawn the signal watcher for the lifetime of a run.
pub fn spawn_shutdown_watcher(token: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = wait_for_shutdown_signal(token).await {
            warn!(event = "cli.signal_handler_failed", error = %e);
        }
    })
}
