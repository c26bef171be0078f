use tokio::task::JoinHandle;
use tracing::info;

/// Writes a diagnostic message from the gateway to the log output.
pub fn handle_log(message: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("{}", message);
    })
}
