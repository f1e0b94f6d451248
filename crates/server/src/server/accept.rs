pub(crate) mod tcp;
#[cfg(unix)]
pub(crate) mod unix;

use tokio::sync::watch;

/// Resolves once the mirror is shut down
pub(crate) async fn stopped(mut stop: watch::Receiver<bool>) {
    let _ = stop.wait_for(|stopped| *stopped).await;
}
