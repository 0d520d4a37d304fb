use crate::model::numeric::{lenient_count, lenient_f64, lenient_opt_f64, Count, OrderedMap};
use serde::{Deserialize, Serialize};

/// Aggregate statistics for every transaction matching one filter.
///
/// Produced by the stats endpoint and treated as immutable once fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_sales: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_liters: f64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_transactions: u64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub petrol_sales: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub petrol_liters: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub diesel_sales: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub diesel_liters: f64,
    #[serde(
        default,
        deserialize_with = "lenient_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub average_transaction_value: Option<f64>,
    #[serde(default)]
    pub fuel_distribution: OrderedMap<FuelBucket>,
    #[serde(default)]
    pub payment_methods: OrderedMap<Count>,
    #[serde(default)]
    pub daily_trend: OrderedMap<DailyBucket>,
    #[serde(default)]
    pub hourly_trend: OrderedMap<HourlyBucket>,
    #[serde(default)]
    pub machines_activity: OrderedMap<MachineBucket>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelBucket {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sales: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub liters: f64,
    // Server-side share; ignored by the view layer, which recomputes it.
    #[serde(
        default,
        deserialize_with = "lenient_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyBucket {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sales: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub liters: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlyBucket {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sales: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub liters: f64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineBucket {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sales: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub liters: f64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub count: u64,
}

impl AggregateStats {
    /// Zero transactions matched the filter. Rendered as "no data", not as a failure.
    pub fn is_empty(&self) -> bool {
        self.total_transactions == 0
    }

    /// Average ticket value; undefined when there are no transactions.
    pub fn average_value(&self) -> Option<f64> {
        if self.total_transactions == 0 {
            return None;
        }
        self.average_transaction_value
            .or_else(|| Some(self.total_sales / self.total_transactions as f64))
    }
}
