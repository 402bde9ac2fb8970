use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Anything that can answer "are we online right now".
pub trait Connectivity: Send + Sync {
    fn is_online(&self) -> bool;
}

/// Shared online flag. Starts online.
#[derive(Debug, Clone)]
pub struct OnlineStatus {
    online: Arc<AtomicBool>,
}

impl OnlineStatus {
    pub fn new(online: bool) -> OnlineStatus {
        OnlineStatus {
            online: Arc::new(AtomicBool::new(online)),
        }
    }

    /// Returns the previous value.
    pub fn set_online(&self, online: bool) -> bool {
        let previous = self.online.swap(online, Ordering::SeqCst);
        if previous != online {
            tracing::info!(online, "connectivity changed");
        }
        previous
    }
}

impl Default for OnlineStatus {
    fn default() -> Self {
        OnlineStatus::new(true)
    }
}

impl Connectivity for OnlineStatus {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}

/// Polls `url` with HEAD requests every `interval` and mirrors reachability
/// into `status` until `cancel` fires.
pub fn spawn_probe(
    status: OnlineStatus,
    url: String,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let client = reqwest::Client::new();
        let mut ticker = tokio::time::interval(interval);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("connectivity probe stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let reachable = match client.head(&url).send().await {
                        Ok(_) => true,
                        Err(e) => {
                            tracing::debug!("probe {url} failed: {e}");
                            false
                        }
                    };
                    status.set_online(reachable);
                }
            }
        }
    })
}
