//! Chart-ready projections of one [`AggregateStats`] payload.
//!
//! Every transform is pure and is recomputed on each call. Only the raw
//! payload is cached upstream; nothing here is memoized.

pub mod activity;
pub mod cards;
pub mod distribution;
pub mod trend;

pub use cards::CardScope;

use crate::model::AggregateStats;
use serde::Serialize;

/// One slice of a share-of-total chart (fuel type or payment method).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSlice {
    pub label: String,
    pub primary_value: f64,
    pub secondary_value: f64,
    pub share_percent: f64,
}

/// One bucket of a line or bar series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub label: String,
    pub primary_value: f64,
    pub secondary_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityRow {
    pub label: String,
    pub sales: f64,
    pub liters: f64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCard {
    pub title: String,
    pub value: String,
    pub subtitle: String,
}

/// Borrowing facade over the transforms for a single payload.
#[derive(Debug, Clone, Copy)]
pub struct ViewModelBuilder<'a> {
    stats: &'a AggregateStats,
}

impl<'a> ViewModelBuilder<'a> {
    pub fn new(stats: &'a AggregateStats) -> Self {
        Self { stats }
    }

    pub fn summary_cards(&self, scope: CardScope) -> Vec<SummaryCard> {
        cards::summary_cards(self.stats, scope)
    }

    pub fn fuel_distribution(&self) -> Vec<DistributionSlice> {
        distribution::fuel_distribution(Some(&self.stats.fuel_distribution))
    }

    pub fn payment_mix(&self) -> Vec<DistributionSlice> {
        distribution::payment_mix(Some(&self.stats.payment_methods))
    }

    pub fn payment_bars(&self) -> Vec<TrendPoint> {
        trend::payment_bars(Some(&self.stats.payment_methods))
    }

    pub fn daily_trend(&self) -> Vec<TrendPoint> {
        trend::daily_trend(Some(&self.stats.daily_trend))
    }

    pub fn hourly_trend(&self) -> Vec<TrendPoint> {
        trend::hourly_trend(Some(&self.stats.hourly_trend))
    }

    pub fn machine_activity(&self) -> Vec<ActivityRow> {
        activity::machine_activity(Some(&self.stats.machines_activity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_from_payload() {
        let stats: AggregateStats = serde_json::from_str(
            r#"{
                "total_sales": 300, "total_transactions": 3,
                "fuel_distribution": {"Petrol": {"sales": 0, "liters": 0}, "Diesel": {"sales": 0, "liters": 0}},
                "payment_methods": {"Cash": 2, "Card": 1},
                "daily_trend": {"2024-03-02": {"sales": 200, "liters": 2}, "2024-03-01": {"sales": 100, "liters": 1}},
                "hourly_trend": {"08:00": {"sales": "300", "count": 3}},
                "machines_activity": {"Machine 1": {"sales": 300, "liters": 3, "count": 3}}
            }"#,
        )
        .unwrap();

        let builder = ViewModelBuilder::new(&stats);
        assert!(builder.fuel_distribution().iter().all(|s| s.share_percent == 0.0));
        assert_eq!(builder.payment_mix().len(), 2);
        assert_eq!(builder.daily_trend()[0].label, "2024-03-01");
        assert_eq!(builder.hourly_trend()[0].primary_value, 300.0);
        assert_eq!(builder.machine_activity()[0].count, 3);
        assert_eq!(builder.summary_cards(CardScope::Overall).len(), 5);

        // Recomputed, not memoized: identical output on every call
        assert_eq!(builder.daily_trend(), builder.daily_trend());
    }

    #[test]
    fn test_builder_on_empty_payload() {
        let stats = AggregateStats::default();
        let builder = ViewModelBuilder::new(&stats);

        assert!(builder.fuel_distribution().is_empty());
        assert!(builder.payment_mix().is_empty());
        assert!(builder.payment_bars().is_empty());
        assert!(builder.daily_trend().is_empty());
        assert!(builder.hourly_trend().is_empty());
        assert!(builder.machine_activity().is_empty());
    }
}
