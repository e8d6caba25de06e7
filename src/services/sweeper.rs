//! Background task that physically removes expired sessions.
//!
//! Purely housekeeping: the authenticator re-checks expiry on every read,
//! so a missed or failed sweep never lets an expired session through.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, info};

use crate::session::SessionStore;

/// Start the sweep task. Runs until the returned handle is aborted.
pub fn start_sweep_task(store: Arc<dyn SessionStore>, interval_secs: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting session sweeper (interval: {} seconds)",
            interval_secs
        );

        let mut ticker = interval(Duration::from_secs(interval_secs.max(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            run_sweep(store.as_ref()).await;
        }
    })
}

/// Run a single sweep. Returns the number of sessions removed.
pub async fn run_sweep(store: &dyn SessionStore) -> u64 {
    match store.purge_expired().await {
        Ok(0) => {
            debug!("Session sweep found nothing to remove");
            0
        }
        Ok(removed) => {
            info!("Removed {} expired sessions", removed);
            removed
        }
        Err(e) => {
            error!("Session sweep failed: {}", e);
            0
        }
    }
}
