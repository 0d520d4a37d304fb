use crate::model::{AggregateStats, FilterParams};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Idle,
    Loading,
    Ready(Arc<AggregateStats>),
    /// Fetch succeeded but nothing matched the filter.
    Empty(Arc<AggregateStats>),
    /// Last fetch failed; the previous payload, if any, is still shown.
    Failed { message: String },
}

impl DashboardState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DashboardState::Loading)
    }

    pub fn name(&self) -> &'static str {
        match self {
            DashboardState::Idle => "idle",
            DashboardState::Loading => "loading",
            DashboardState::Ready(_) => "ready",
            DashboardState::Empty(_) => "empty",
            DashboardState::Failed { .. } => "failed",
        }
    }
}

/// What a `request_data` call ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    CacheHit,
    Fetched,
    /// A newer request was issued while this one was in flight.
    Discarded,
    Failed,
    /// Nothing to fetch (no report dates, or already at a boundary).
    Skipped,
}

/// State exposed to the surrounding UI shell.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub state: DashboardState,
    pub loading: bool,
    pub payload: Option<Arc<AggregateStats>>,
    pub active_filter: Option<FilterParams>,
}

impl DashboardSnapshot {
    pub fn filter_active(&self) -> bool {
        self.active_filter.is_some()
    }
}
