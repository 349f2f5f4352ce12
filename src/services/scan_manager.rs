use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::ScanError;
use crate::models::presentation_types::Presentation;
use crate::models::scan_types::ScanState;
use crate::services::classifier::ClassifierClient;
use crate::services::collector::collect_evidence;
use crate::services::host::PageHost;
use crate::services::presenter::present;

const INTERRUPTED_MESSAGE: &str = "Scan interrupted before completion";

/// Owns the one authoritative `ScanState` and drives scans through it.
///
/// All transitions go through the internal watch channel; observers either
/// poll `state()` or `subscribe()` and redraw via the presenter on every
/// change.
pub struct ScanManager<H> {
    host: H,
    client: ClassifierClient,
    state: watch::Sender<ScanState>,
}

impl<H: PageHost> ScanManager<H> {
    pub fn new(host: H, client: ClassifierClient) -> Self {
        let (state, _) = watch::channel(ScanState::Idle);
        ScanManager {
            host,
            client,
            state,
        }
    }

    /// Snapshot of the current scan state.
    pub fn state(&self) -> ScanState {
        self.state.borrow().clone()
    }

    /// Watch endpoint for observers that redraw on every transition.
    pub fn subscribe(&self) -> watch::Receiver<ScanState> {
        self.state.subscribe()
    }

    /// The current state rendered for display.
    pub fn presentation(&self) -> Presentation {
        present(&self.state())
    }

    /// Run one full scan of the active tab to a terminal state.
    ///
    /// Publishes `Scanning`, then `Processing` once collection settles (even
    /// with entirely empty evidence), then `Resolved` or `Failed`, and
    /// returns that terminal state. A trigger while a scan is in flight is
    /// rejected with `ScanInProgress` and leaves the running scan untouched;
    /// a host without a scannable tab rejects with `NoActiveTab` before any
    /// state is published.
    pub async fn scan(&self) -> Result<ScanState, ScanError> {
        if self.state.borrow().is_active() {
            return Err(ScanError::ScanInProgress);
        }

        let target = self
            .host
            .active_tab()
            .await
            .map_err(|err| ScanError::no_active_tab(err.message))?;

        // Atomic check-and-set: closes the window another trigger could have
        // slipped through while the host call above was suspended.
        let started = self.state.send_if_modified(|state| {
            if state.is_active() {
                return false;
            }
            *state = ScanState::Scanning;
            true
        });
        if !started {
            return Err(ScanError::ScanInProgress);
        }

        info!(url = %target.url, "scan started");

        // A terminal state must be published no matter how this future ends.
        let mut cleanup = CleanupGuard::new(&self.state);

        let evidence = collect_evidence(&self.host, &target).await;
        self.state.send_replace(ScanState::Processing);

        let terminal = match self.client.classify(&target, evidence).await {
            Ok(result) => {
                info!(
                    verdict = ?result.verdict,
                    confidence = result.confidence,
                    modules_run = ?result.modules_run,
                    "scan resolved"
                );
                ScanState::Resolved(result)
            }
            Err(err) => {
                warn!(error = %err, "scan failed");
                ScanState::Failed(err.to_string())
            }
        };

        self.state.send_replace(terminal.clone());
        cleanup.disarm();
        Ok(terminal)
    }
}

/// Publishes a failure if a scan future dies before reaching a terminal
/// state, so the machine can never wedge in `Scanning` or `Processing` and
/// the trigger always comes back.
struct CleanupGuard<'a> {
    state: &'a watch::Sender<ScanState>,
    armed: bool,
}

impl<'a> CleanupGuard<'a> {
    fn new(state: &'a watch::Sender<ScanState>) -> Self {
        CleanupGuard { state, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for CleanupGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state
                .send_replace(ScanState::Failed(INTERRUPTED_MESSAGE.to_string()));
        }
    }
}
