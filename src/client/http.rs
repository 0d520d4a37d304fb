use crate::client::{ErrorBody, HealthStatus, StatsApi, UploadSummary};
use crate::error::{DashboardError, DashboardResult};
use crate::model::{AggregateStats, FilterParams};
use crate::DashboardConfig;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Response;
use std::path::Path;
use tracing::{debug, info, warn};

/// `StatsApi` over HTTP against the stats server's `/api` routes.
///
/// No request timeout is configured; a hung request keeps the caller waiting.
pub struct HttpStatsClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpStatsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.api_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Pulls the server's `{error}` message out of a failed response.
    async fn error_message(response: Response, fallback: &str) -> String {
        let status = response.status();
        match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("{} (HTTP {})", fallback, status),
        }
    }
}

#[async_trait]
impl StatsApi for HttpStatsClient {
    async fn fetch_stats(&self, filter: &FilterParams) -> DashboardResult<AggregateStats> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let url = self.endpoint("dashboard-stats");
        debug!(request_id = %request_id, ?filter, "GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(&filter.query_pairs())
            .send()
            .await
            .map_err(|e| DashboardError::transport(format!("Network error: {}", e)))?;

        if !response.status().is_success() {
            let message = Self::error_message(response, "Stats request failed").await;
            warn!(request_id = %request_id, "Stats request failed: {}", message);
            return Err(DashboardError::transport(message));
        }

        let stats = response
            .json::<AggregateStats>()
            .await
            .map_err(|e| DashboardError::transport(format!("Failed to parse response: {}", e)))?;

        debug!(
            request_id = %request_id,
            transactions = stats.total_transactions,
            "Stats received"
        );
        Ok(stats)
    }

    async fn upload(&self, file: &Path) -> DashboardResult<UploadSummary> {
        let file_name = file
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| DashboardError::validation("Upload path has no file name"))?;

        let bytes = tokio::fs::read(file).await?;
        info!("Uploading {} ({} bytes)", file_name, bytes.len());

        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));
        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let message = Self::error_message(response, "Upload failed").await;
            return Err(DashboardError::Upload { message });
        }

        let summary = response.json::<UploadSummary>().await?;
        info!(
            "Upload accepted: {} added, {} skipped",
            summary.added, summary.skipped
        );
        Ok(summary)
    }

    async fn clear_database(&self) -> DashboardResult<()> {
        let response = self
            .client
            .delete(self.endpoint("clear-database"))
            .send()
            .await?;

        if !response.status().is_success() {
            let message = Self::error_message(response, "Failed to delete data").await;
            return Err(DashboardError::Rejected { message });
        }

        info!("Server database cleared");
        Ok(())
    }

    async fn health(&self) -> DashboardResult<HealthStatus> {
        let response = self.client.get(self.endpoint("health")).send().await?;
        let status = response.status();

        // Unhealthy servers still answer with a status body.
        match response.json::<HealthStatus>().await {
            Ok(health) => Ok(health),
            Err(e) => Err(DashboardError::transport(format!(
                "Health check failed (HTTP {}): {}",
                status, e
            ))),
        }
    }
}
