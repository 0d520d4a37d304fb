use crate::cache::{CacheFingerprint, Clock, FetchCache, SystemClock};
use crate::client::{validate_upload_file, HealthStatus, StatsApi, UploadSummary};
use crate::error::DashboardResult;
use crate::filter::FilterController;
use crate::model::{AggregateStats, FilterParams};
use crate::navigation::{DailyView, DateNavigator};
use crate::orchestrator::state::{DashboardSnapshot, DashboardState, RequestOutcome};
use crate::DashboardConfig;
use chrono::NaiveDate;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchMode {
    PreferCache,
    ForceFresh,
}

struct Inner {
    state: DashboardState,
    // Last good payload; survives failures
    payload: Option<Arc<AggregateStats>>,
    filters: FilterController,
    navigator: DateNavigator,
    selected_date: Option<NaiveDate>,
    cache: FetchCache,
}

impl Inner {
    fn publish(&mut self, filter: &FilterParams, payload: Arc<AggregateStats>) {
        if filter.is_unfiltered() {
            self.navigator.rebuild(&payload);
        }
        self.state = if payload.is_empty() {
            DashboardState::Empty(Arc::clone(&payload))
        } else {
            DashboardState::Ready(Arc::clone(&payload))
        };
        self.payload = Some(payload);
    }
}

/// Drives every dashboard fetch.
///
/// Every trigger (first load, filter changes, day navigation, refresh after an
/// upload) ends up in [`request_data`](Self::request_data). Requests may
/// overlap; only the most recently issued one is allowed to publish its
/// result. State locks are never held across the network call.
pub struct DashboardOrchestrator {
    api: Arc<dyn StatsApi>,
    inner: RwLock<Inner>,
    generation: AtomicU64,
    max_upload_bytes: u64,
}

impl DashboardOrchestrator {
    pub fn new(api: Arc<dyn StatsApi>, config: &DashboardConfig) -> Self {
        Self::with_clock(api, config, Arc::new(SystemClock))
    }

    pub fn with_clock(api: Arc<dyn StatsApi>, config: &DashboardConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            inner: RwLock::new(Inner {
                state: DashboardState::Idle,
                payload: None,
                filters: FilterController::new(),
                navigator: DateNavigator::new(),
                selected_date: None,
                cache: FetchCache::new(config.cache_ttl_ms, clock),
            }),
            generation: AtomicU64::new(0),
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    /// Serves `filter` from cache when fresh, otherwise fetches it.
    pub async fn request_data(&self, filter: FilterParams) -> RequestOutcome {
        self.issue(filter, FetchMode::PreferCache).await
    }

    async fn issue(&self, filter: FilterParams, mode: FetchMode) -> RequestOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let fingerprint = CacheFingerprint::from_filter(&filter);

        // Freshness counts from when the request went out, not when it landed
        let issued_at = {
            let mut inner = self.inner.write().await;
            if mode == FetchMode::PreferCache {
                if let Some(payload) = inner.cache.lookup_fresh(&fingerprint) {
                    debug!(fingerprint = %fingerprint, generation, "Serving stats from cache");
                    inner.publish(&filter, payload);
                    return RequestOutcome::CacheHit;
                }
            }
            inner.state = DashboardState::Loading;
            inner.cache.now_ms()
        };

        debug!(fingerprint = %fingerprint, generation, ?mode, "Fetching stats");
        let result = self.api.fetch_stats(&filter).await;

        let mut inner = self.inner.write().await;
        let latest = self.generation.load(Ordering::SeqCst);
        if latest != generation {
            debug!(
                fingerprint = %fingerprint,
                generation,
                latest,
                "Discarding superseded stats response"
            );
            return RequestOutcome::Discarded;
        }

        match result {
            Ok(stats) => {
                let payload = Arc::new(stats);
                inner.cache.put(fingerprint, Arc::clone(&payload), issued_at);
                inner.publish(&filter, payload);
                RequestOutcome::Fetched
            }
            Err(e) => {
                warn!(fingerprint = %fingerprint, "Error fetching stats: {}", e);
                inner.state = DashboardState::Failed {
                    message: e.to_string(),
                };
                RequestOutcome::Failed
            }
        }
    }

    /// First load: whatever filter is active (unfiltered on a fresh instance).
    pub async fn load_initial(&self) -> RequestOutcome {
        let filter = self.inner.read().await.filters.active();
        self.request_data(filter).await
    }

    pub async fn apply_filter(&self, params: FilterParams) -> RequestOutcome {
        let filter = self.inner.write().await.filters.apply(params);
        self.request_data(filter).await
    }

    pub async fn clear_filter(&self) -> RequestOutcome {
        let filter = self.inner.write().await.filters.clear();
        self.request_data(filter).await
    }

    pub async fn refresh(&self) -> RequestOutcome {
        self.load_initial().await
    }

    /// Loads the date index and opens the most recent day.
    pub async fn init_daily_view(&self) -> RequestOutcome {
        let outcome = self.request_data(FilterParams::unfiltered()).await;
        if matches!(outcome, RequestOutcome::Failed | RequestOutcome::Discarded) {
            return outcome;
        }

        let newest = {
            let mut inner = self.inner.write().await;
            let newest = inner.navigator.default_selection();
            inner.selected_date = newest;
            newest
        };

        match newest {
            Some(date) => self.select_date(date).await,
            None => {
                info!("No report dates available, skipping daily fetch");
                RequestOutcome::Skipped
            }
        }
    }

    pub async fn select_date(&self, date: NaiveDate) -> RequestOutcome {
        self.inner.write().await.selected_date = Some(date);
        self.request_data(FilterParams::single_day(date)).await
    }

    /// Steps to the next older report date; no-op at the oldest one.
    pub async fn previous_day(&self) -> RequestOutcome {
        let target = {
            let inner = self.inner.read().await;
            inner
                .selected_date
                .filter(|d| inner.navigator.has_previous(*d))
                .map(|d| inner.navigator.previous(d))
        };
        match target {
            Some(date) => self.select_date(date).await,
            None => RequestOutcome::Skipped,
        }
    }

    /// Steps to the next newer report date; no-op at the newest one.
    pub async fn next_day(&self) -> RequestOutcome {
        let target = {
            let inner = self.inner.read().await;
            inner
                .selected_date
                .filter(|d| inner.navigator.has_next(*d))
                .map(|d| inner.navigator.next(d))
        };
        match target {
            Some(date) => self.select_date(date).await,
            None => RequestOutcome::Skipped,
        }
    }

    /// Uploads a transaction file, then refetches the active filter.
    ///
    /// Validation failures return before any network call. A server rejection
    /// leaves cache and state untouched.
    pub async fn upload(&self, file: &Path) -> DashboardResult<UploadSummary> {
        validate_upload_file(file, self.max_upload_bytes)?;
        let summary = self.api.upload(file).await?;

        let filter = {
            let mut inner = self.inner.write().await;
            let superseded = inner.cache.invalidate_all();
            // Responses still in flight predate the upload
            self.generation.fetch_add(1, Ordering::SeqCst);
            debug!(superseded, "Upload changed server data");
            inner.filters.active()
        };
        self.issue(filter, FetchMode::ForceFresh).await;
        Ok(summary)
    }

    /// Deletes all server data; no cached payload is served afterwards.
    pub async fn clear_database(&self) -> DashboardResult<()> {
        self.api.clear_database().await?;

        let filter = {
            let mut inner = self.inner.write().await;
            inner.cache.invalidate_all();
            self.generation.fetch_add(1, Ordering::SeqCst);
            inner.filters.active()
        };
        info!("Database cleared, refetching stats");
        self.issue(filter, FetchMode::ForceFresh).await;
        Ok(())
    }

    pub async fn health(&self) -> DashboardResult<HealthStatus> {
        self.api.health().await
    }

    pub async fn state(&self) -> DashboardState {
        self.inner.read().await.state.clone()
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        let inner = self.inner.read().await;
        DashboardSnapshot {
            state: inner.state.clone(),
            loading: inner.state.is_loading(),
            payload: inner.payload.clone(),
            active_filter: inner
                .filters
                .is_active()
                .then(|| inner.filters.active()),
        }
    }

    pub async fn daily_view(&self) -> DailyView {
        let inner = self.inner.read().await;
        inner.navigator.view(inner.selected_date)
    }

    pub async fn cached_entries(&self) -> usize {
        self.inner.read().await.cache.len()
    }
}
