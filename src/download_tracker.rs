//! Live progress for concurrently downloading engines, maintained by polling
//! the backend on a fixed cadence instead of relying on push updates.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::backend::BackendClient;
use crate::models::DownloadStatus;

pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// What the engine row should render: a progress indicator while a download
/// is in flight, an install control otherwise.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineDisplayState {
    Progress(f32),
    Install,
}

/// Scope token for the polling loop. Dropping it aborts the ticker, so no
/// poll is issued after the owning view deactivates, on any exit path.
pub struct PollGuard {
    handle: JoinHandle<()>,
}

impl PollGuard {
    pub fn stop(self) {
        // Drop does the work.
    }
}

impl Drop for PollGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Default)]
struct TrackerState {
    /// Tick number of the snapshot currently held; responses from earlier
    /// ticks are discarded.
    last_applied: u64,
    statuses: Vec<DownloadStatus>,
}

#[derive(Clone)]
pub struct DownloadTracker {
    backend: Arc<dyn BackendClient>,
    state: Arc<RwLock<TrackerState>>,
    /// Monotonic across activations, so in-flight polls from a previous
    /// session can never outrank the current one.
    ticks: Arc<AtomicU64>,
}

impl DownloadTracker {
    pub fn new(backend: Arc<dyn BackendClient>) -> Self {
        Self {
            backend,
            state: Arc::new(RwLock::new(TrackerState::default())),
            ticks: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Spawns the polling loop. Each tick issues its poll on a detached task,
    /// so a slow response neither blocks nor skips the next scheduled tick;
    /// every response carries its tick number and replaces the whole snapshot
    /// only if nothing newer has landed. The backend is authoritative and may
    /// add or remove entries between polls. A failed poll keeps the previous
    /// snapshot and does not stop the loop.
    pub fn start(&self) -> PollGuard {
        // A fresh activation rebuilds from backend state: drop entries left
        // over from the previous session and fence off its in-flight polls.
        {
            let mut state = write_lock(&self.state);
            state.last_applied = self.ticks.load(Ordering::SeqCst);
            state.statuses.clear();
        }

        let backend = Arc::clone(&self.backend);
        let state = Arc::clone(&self.state);
        let ticks = Arc::clone(&self.ticks);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(POLL_INTERVAL);
            // Ticks lost to scheduler stalls are not replayed as a burst.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let tick = ticks.fetch_add(1, Ordering::SeqCst) + 1;
                let backend = Arc::clone(&backend);
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    match backend.poll_download_status().await {
                        Ok(snapshot) => {
                            let mut guard = write_lock(&state);
                            if tick > guard.last_applied {
                                guard.last_applied = tick;
                                guard.statuses = snapshot;
                            }
                        }
                        Err(err) => {
                            // A stale progress bar beats hiding in-progress
                            // state.
                            tracing::warn!("download status poll failed: {err}");
                        }
                    }
                });
            }
        });

        PollGuard { handle }
    }

    pub fn snapshot(&self) -> Vec<DownloadStatus> {
        read_lock(&self.state).statuses.clone()
    }

    pub fn percent(&self, engine_name: &str) -> Option<u8> {
        read_lock(&self.state)
            .statuses
            .iter()
            .find(|status| status.engine_name == engine_name)
            .map(|status| status.percent)
    }

    pub fn display_state(&self, engine_name: &str) -> EngineDisplayState {
        match self.percent(engine_name) {
            Some(percent) => EngineDisplayState::Progress(f32::from(percent) / 100.0),
            None => EngineDisplayState::Install,
        }
    }
}

fn read_lock(state: &RwLock<TrackerState>) -> RwLockReadGuard<'_, TrackerState> {
    match state.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn write_lock(state: &RwLock<TrackerState>) -> RwLockWriteGuard<'_, TrackerState> {
    match state.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
