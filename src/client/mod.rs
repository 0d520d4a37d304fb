pub mod http;
pub mod mock;
pub mod upload;

pub use http::HttpStatsClient;
pub use mock::MockStatsApi;
pub use upload::validate_upload_file;

use crate::error::DashboardResult;
use crate::model::{AggregateStats, FilterParams};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Result of a successful data upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadSummary {
    #[serde(default)]
    pub added: u64,
    #[serde(default)]
    pub skipped: u64,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_processed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Error body returned by the stats server on 4xx/5xx.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Remote side of the dashboard. Every call is a single HTTP round trip.
#[async_trait]
pub trait StatsApi: Send + Sync {
    async fn fetch_stats(&self, filter: &FilterParams) -> DashboardResult<AggregateStats>;

    async fn upload(&self, file: &Path) -> DashboardResult<UploadSummary>;

    async fn clear_database(&self) -> DashboardResult<()>;

    async fn health(&self) -> DashboardResult<HealthStatus>;
}
