use tokio::sync::broadcast;
use tracing::{info, warn};

/// Shutdown broadcast that also fires on Ctrl-C. The returned sender lets the
/// caller trigger shutdown itself (e.g. on a quit command).
pub fn create_shutdown_channel() -> (broadcast::Sender<()>, broadcast::Receiver<()>) {
    let (shutdown_sender, shutdown_receiver): (broadcast::Sender<()>, broadcast::Receiver<()>) =
        broadcast::channel::<()>(100);
    let ctrl_c_sender = shutdown_sender.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for ctrl-c: {}", e);
            return;
        }
        info!("signal received, starting graceful shutdown");
        // Receivers may already be gone if the game exited on its own
        let _ = ctrl_c_sender.send(());
    });
    (shutdown_sender, shutdown_receiver)
}
