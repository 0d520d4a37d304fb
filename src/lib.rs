pub mod cache;
pub mod client;
pub mod error;
pub mod filter;
pub mod model;
pub mod navigation;
pub mod orchestrator;
pub mod view;

pub use client::{HttpStatsClient, StatsApi};
pub use error::{DashboardError, DashboardResult};
pub use model::{AggregateStats, FilterParams};
pub use orchestrator::{DashboardOrchestrator, DashboardSnapshot, DashboardState, RequestOutcome};
pub use view::ViewModelBuilder;

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub api_url: String,
    pub cache_ttl_ms: u64,
    pub max_upload_bytes: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000/api".to_string(),
            cache_ttl_ms: cache::DEFAULT_TTL_MS, // 5 minutes
            max_upload_bytes: 100 * 1024 * 1024,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(api_url) = std::env::var("FUELBOARD_API_URL") {
            if !api_url.trim().is_empty() {
                config.api_url = api_url.trim().to_string();
            }
        }

        if let Ok(ttl_str) = std::env::var("FUELBOARD_CACHE_TTL_MS") {
            config.cache_ttl_ms = ttl_str.parse().unwrap_or(cache::DEFAULT_TTL_MS);
        }

        if let Ok(max_mb_str) = std::env::var("FUELBOARD_MAX_UPLOAD_MB") {
            if let Some(max_bytes) = parse_upload_limit(&max_mb_str) {
                config.max_upload_bytes = max_bytes;
            }
        }

        config
    }
}

/// Megabytes to bytes; None for malformed or overflowing values.
fn parse_upload_limit(max_mb: &str) -> Option<u64> {
    max_mb.trim().parse::<u64>().ok()?.checked_mul(1024 * 1024)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.api_url, "http://localhost:5000/api");
        assert_eq!(config.cache_ttl_ms, 300_000);
        assert_eq!(config.max_upload_bytes, 104_857_600);
    }

    #[test]
    fn test_upload_limit_parsing() {
        assert_eq!(parse_upload_limit("16"), Some(16 * 1024 * 1024));
        assert_eq!(parse_upload_limit("lots"), None);
        assert_eq!(parse_upload_limit("18446744073709551615"), None);
        assert_eq!(parse_upload_limit(&(u64::MAX / 1024).to_string()), None);
    }
}
