use crate::cache::CacheFingerprint;
use crate::client::{HealthStatus, StatsApi, UploadSummary};
use crate::error::{DashboardError, DashboardResult};
use crate::model::{AggregateStats, FilterParams};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

#[derive(Default)]
struct MockState {
    responses: HashMap<CacheFingerprint, AggregateStats>,
    fallback: AggregateStats,
    failure: Option<String>,
    gates: HashMap<CacheFingerprint, VecDeque<oneshot::Receiver<()>>>,
    fetches: Vec<FilterParams>,
    upload_result: Option<Result<UploadSummary, String>>,
    pending_dataset: Option<HashMap<CacheFingerprint, AggregateStats>>,
    uploads: Vec<PathBuf>,
    clears: usize,
}

/// Releases one held `fetch_stats` call.
pub struct FetchGate {
    tx: oneshot::Sender<()>,
}

impl FetchGate {
    pub fn release(self) {
        let _ = self.tx.send(());
    }
}

// In-memory stats server for tests. Responses are keyed by filter fingerprint.
#[derive(Clone, Default)]
pub struct MockStatsApi {
    state: Arc<Mutex<MockState>>,
}

impl MockStatsApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_stats(&self, filter: FilterParams, stats: AggregateStats) {
        self.lock()
            .responses
            .insert(CacheFingerprint::from_filter(&filter), stats);
    }

    /// Payload for any filter without an explicit response.
    pub fn set_fallback(&self, stats: AggregateStats) {
        self.lock().fallback = stats;
    }

    /// Makes every fetch fail until cleared with `None`.
    pub fn set_failure(&self, message: Option<&str>) {
        self.lock().failure = message.map(str::to_string);
    }

    /// Holds the next fetch for `filter` until the returned gate is released.
    pub fn hold_next(&self, filter: FilterParams) -> FetchGate {
        let (tx, rx) = oneshot::channel();
        self.lock()
            .gates
            .entry(CacheFingerprint::from_filter(&filter))
            .or_default()
            .push_back(rx);
        FetchGate { tx }
    }

    pub fn set_upload_result(&self, result: Result<UploadSummary, String>) {
        self.lock().upload_result = Some(result);
    }

    /// Responses the server switches to once the next upload succeeds.
    pub fn stage_upload_dataset(&self, responses: Vec<(FilterParams, AggregateStats)>) {
        let dataset = responses
            .into_iter()
            .map(|(filter, stats)| (CacheFingerprint::from_filter(&filter), stats))
            .collect();
        self.lock().pending_dataset = Some(dataset);
    }

    pub fn fetch_count(&self) -> usize {
        self.lock().fetches.len()
    }

    pub fn fetched_filters(&self) -> Vec<FilterParams> {
        self.lock().fetches.clone()
    }

    pub fn uploads(&self) -> Vec<PathBuf> {
        self.lock().uploads.clone()
    }

    pub fn clear_count(&self) -> usize {
        self.lock().clears
    }
}

#[async_trait]
impl StatsApi for MockStatsApi {
    async fn fetch_stats(&self, filter: &FilterParams) -> DashboardResult<AggregateStats> {
        let fingerprint = CacheFingerprint::from_filter(filter);
        let gate = {
            let mut state = self.lock();
            state.fetches.push(*filter);
            state.gates.get_mut(&fingerprint).and_then(|queue| queue.pop_front())
        };

        if let Some(gate) = gate {
            let _ = gate.await;
        }

        // Read after the gate so a held call sees the data as of its release
        let state = self.lock();
        if let Some(message) = &state.failure {
            return Err(DashboardError::transport(message.clone()));
        }
        Ok(state
            .responses
            .get(&fingerprint)
            .cloned()
            .unwrap_or_else(|| state.fallback.clone()))
    }

    async fn upload(&self, file: &Path) -> DashboardResult<UploadSummary> {
        let mut state = self.lock();
        state.uploads.push(file.to_path_buf());

        match state.upload_result.clone() {
            Some(Err(message)) => Err(DashboardError::Upload { message }),
            result => {
                if let Some(dataset) = state.pending_dataset.take() {
                    state.responses = dataset;
                }
                Ok(result.and_then(Result::ok).unwrap_or_else(|| UploadSummary {
                    added: 1,
                    skipped: 0,
                    message: "Upload successful".to_string(),
                    total_processed: Some(1),
                }))
            }
        }
    }

    async fn clear_database(&self) -> DashboardResult<()> {
        let mut state = self.lock();
        state.clears += 1;
        state.responses.clear();
        state.fallback = AggregateStats::default();
        Ok(())
    }

    async fn health(&self) -> DashboardResult<HealthStatus> {
        Ok(HealthStatus {
            status: "healthy".to_string(),
            message: Some("API is running".to_string()),
            error: None,
        })
    }
}
