//! Debounced persistence fan-out.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::warn;

use cerfa_core::models::{FormSnapshot, SessionPayload};
use cerfa_core::session::{SessionApi, SessionError, SnapshotStore};

/// Default quiet window before a change is pushed to the remote session.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(1);

/// Mirrors every state change to the local snapshot store immediately and to
/// the remote session after a quiet window.
///
/// Each [`notify`](AutosaveBridge::notify) cancels the previous in-flight
/// push, so a burst of edits lands as a single remote write carrying the
/// latest payload. Persistence failures are logged and never surface to the
/// caller; autosave must not interrupt form filling.
pub struct AutosaveBridge {
    local: Arc<dyn SnapshotStore>,
    remote: Option<Arc<dyn SessionApi>>,
    window: Duration,
    seq: Arc<AtomicU64>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl AutosaveBridge {
    pub fn new(local: Arc<dyn SnapshotStore>, remote: Option<Arc<dyn SessionApi>>) -> Self {
        Self::with_window(local, remote, DEFAULT_DEBOUNCE)
    }

    pub fn with_window(
        local: Arc<dyn SnapshotStore>,
        remote: Option<Arc<dyn SessionApi>>,
        window: Duration,
    ) -> Self {
        Self {
            local,
            remote,
            window,
            seq: Arc::new(AtomicU64::new(0)),
            pending: Mutex::new(None),
        }
    }

    /// Record a state change: save locally right away, schedule the remote
    /// push for after the quiet window.
    pub fn notify(&self, snapshot: &FormSnapshot) {
        if let Err(e) = self.local.save(snapshot) {
            warn!("local snapshot save failed: {e}");
        }

        let Some(remote) = self.remote.clone() else {
            return;
        };

        let payload = SessionPayload {
            data: snapshot.data.clone(),
            current_step: snapshot.current_step,
            seq: self.seq.fetch_add(1, Ordering::SeqCst) + 1,
        };
        let window = self.window;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            if let Err(e) = remote.push(&payload).await {
                warn!("remote session save failed: {e}");
            }
        });

        if let Ok(mut pending) = self.pending.lock() {
            if let Some(previous) = pending.replace(handle) {
                previous.abort();
            }
        }
    }

    /// Cancel any pending debounced push and write the given snapshot to the
    /// remote session immediately. Local storage is refreshed too.
    pub async fn flush(&self, snapshot: &FormSnapshot) -> Result<(), SessionError> {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(previous) = pending.take() {
                previous.abort();
            }
        }

        if let Err(e) = self.local.save(snapshot) {
            warn!("local snapshot save failed: {e}");
        }

        let Some(remote) = &self.remote else {
            return Ok(());
        };
        let payload = SessionPayload {
            data: snapshot.data.clone(),
            current_step: snapshot.current_step,
            seq: self.seq.fetch_add(1, Ordering::SeqCst) + 1,
        };
        remote.push(&payload).await
    }
}

impl Drop for AutosaveBridge {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(handle) = pending.take() {
                handle.abort();
            }
        }
    }
}
