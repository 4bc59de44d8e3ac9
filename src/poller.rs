//! Roster poller: fetch on start, then on a fixed interval.
//!
//! DESIGN
//! ======
//! One background task owns the timer and sends every fetch result, good or
//! bad, down a channel. There is no retry and no backoff; a failed tick is
//! simply followed by the next one. Dropping the [`RosterPoller`] aborts the
//! task, which is the teardown path.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::registration::Registration;
use crate::store::{RegistrationStore, StoreError};

#[cfg(test)]
#[path = "poller_test.rs"]
mod poller_test;

pub type FetchResult = Result<Vec<Registration>, StoreError>;

const CHANNEL_CAPACITY: usize = 4;

pub struct RosterPoller {
    rx: mpsc::Receiver<FetchResult>,
    handle: JoinHandle<()>,
}

impl RosterPoller {
    /// Next fetch result. `None` once the task has stopped.
    pub async fn next(&mut self) -> Option<FetchResult> {
        self.rx.recv().await
    }
}

impl Drop for RosterPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawn the polling task. The first fetch happens immediately.
pub fn spawn_roster_poller<S>(store: Arc<S>, interval: Duration) -> RosterPoller
where
    S: RegistrationStore + ?Sized + 'static,
{
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    info!(interval_ms = interval.as_millis(), "roster poller started");

    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let result = store.list_active().await;
            debug!(ok = result.is_ok(), "roster poll tick");
            if tx.send(result).await.is_err() {
                break;
            }
        }
    });

    RosterPoller { rx, handle }
}
