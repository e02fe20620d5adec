// WHY: Deferred analysis with a visible "analyzing" state for interactive callers
// Only the most recent request may publish; superseded requests are aborted or discarded

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::objection_analyzer::{is_blank, AnalysisResult, ObjectionAnalyzer};

/// Delay between a request and its result becoming available
pub const DEFAULT_ANALYSIS_DELAY: Duration = Duration::from_millis(800);

/// Snapshot of the scheduler as seen by subscribers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisState {
    /// A request is pending
    pub analyzing: bool,
    /// Generation of the latest accepted request (0 before any request)
    pub generation: u64,
    /// Most recently published result
    pub result: Option<Arc<AnalysisResult>>,
}

/// Schedules analyses on the tokio runtime, superseding stale requests
pub struct AnalysisScheduler {
    analyzer: ObjectionAnalyzer,
    delay: Duration,
    generation: Arc<AtomicU64>,
    state_tx: Arc<watch::Sender<AnalysisState>>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl AnalysisScheduler {
    pub fn new(analyzer: ObjectionAnalyzer) -> Self {
        Self::with_delay(analyzer, DEFAULT_ANALYSIS_DELAY)
    }

    pub fn with_delay(analyzer: ObjectionAnalyzer, delay: Duration) -> Self {
        let (state_tx, _state_rx) = watch::channel(AnalysisState::default());
        Self {
            analyzer,
            delay,
            generation: Arc::new(AtomicU64::new(0)),
            state_tx: Arc::new(state_tx),
            in_flight: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Submit a draft for deferred analysis
    ///
    /// Blank text is ignored and leaves the current state untouched. Must be
    /// called from within a tokio runtime.
    pub fn submit(&self, text: impl Into<String>) -> Option<u64> {
        let text = text.into();
        if is_blank(&text) {
            debug!("Ignoring blank submission");
            return None;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.abort_in_flight();

        self.state_tx.send_modify(|state| {
            state.analyzing = true;
            state.generation = generation;
        });

        let analyzer = self.analyzer;
        let delay = self.delay;
        let current = Arc::clone(&self.generation);
        let state_tx = Arc::clone(&self.state_tx);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            if current.load(Ordering::SeqCst) != generation {
                debug!(generation, "Discarding superseded request before analysis");
                return;
            }
            let result = analyzer.analyze(&text).map(Arc::new);

            // WHY: re-check under the channel lock so a newer submit can't be overwritten
            let published = state_tx.send_if_modified(|state| {
                if current.load(Ordering::SeqCst) != generation {
                    return false;
                }
                state.analyzing = false;
                state.result = result.clone();
                true
            });

            if published {
                info!(generation, "Published analysis result");
            } else {
                debug!(generation, "Discarding superseded result");
            }
        });

        *self.in_flight.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
        Some(generation)
    }

    /// Abort the pending request, keeping the last published result
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.abort_in_flight();
        self.state_tx.send_if_modified(|state| {
            let was_analyzing = state.analyzing;
            state.analyzing = false;
            was_analyzing
        });
    }

    pub fn subscribe(&self) -> watch::Receiver<AnalysisState> {
        self.state_tx.subscribe()
    }

    pub fn current(&self) -> AnalysisState {
        self.state_tx.borrow().clone()
    }

    pub fn is_analyzing(&self) -> bool {
        self.state_tx.borrow().analyzing
    }

    /// Wait until no request is pending and return the published result
    pub async fn wait_for_result(&self) -> Option<Arc<AnalysisResult>> {
        let mut rx = self.subscribe();
        let result = match rx.wait_for(|state| !state.analyzing).await {
            Ok(state) => state.result.clone(),
            // Sender lives in self, so the channel cannot close while borrowed
            Err(_) => None,
        };
        result
    }

    fn abort_in_flight(&self) {
        let mut slot = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = slot.take() {
            handle.abort();
        }
    }
}

impl Drop for AnalysisScheduler {
    fn drop(&mut self) {
        self.abort_in_flight();
    }
}
