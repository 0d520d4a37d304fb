use crate::model::{Count, DailyBucket, HourlyBucket, OrderedMap};
use crate::view::TrendPoint;

/// Daily sales (primary) and liters (secondary), oldest day first.
pub fn daily_trend(source: Option<&OrderedMap<DailyBucket>>) -> Vec<TrendPoint> {
    let Some(map) = source else {
        return Vec::new();
    };
    let mut points: Vec<TrendPoint> = map
        .iter()
        .map(|(label, bucket)| TrendPoint {
            label: label.to_string(),
            primary_value: bucket.sales,
            secondary_value: bucket.liters,
        })
        .collect();
    // ISO dates order lexically
    points.sort_by(|a, b| a.label.cmp(&b.label));
    points
}

/// Hourly sales (primary) and transaction count (secondary) in source order.
pub fn hourly_trend(source: Option<&OrderedMap<HourlyBucket>>) -> Vec<TrendPoint> {
    let Some(map) = source else {
        return Vec::new();
    };
    map.iter()
        .map(|(label, bucket)| TrendPoint {
            label: label.to_string(),
            primary_value: bucket.sales,
            secondary_value: bucket.count as f64,
        })
        .collect()
}

/// Transactions per payment method, for the bar chart.
pub fn payment_bars(source: Option<&OrderedMap<Count>>) -> Vec<TrendPoint> {
    let Some(map) = source else {
        return Vec::new();
    };
    map.iter()
        .map(|(label, count)| TrendPoint {
            label: label.to_string(),
            primary_value: count.0 as f64,
            secondary_value: 0.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_trend_sorted_ascending() {
        let map: OrderedMap<DailyBucket> = serde_json::from_str(
            r#"{"2024-03-02": {"sales": 2, "liters": 1},
                "2024-02-28": {"sales": 1, "liters": 1},
                "2024-03-10": {"sales": 3, "liters": 1}}"#,
        )
        .unwrap();

        let labels: Vec<_> = daily_trend(Some(&map)).into_iter().map(|p| p.label).collect();
        assert_eq!(labels, vec!["2024-02-28", "2024-03-02", "2024-03-10"]);
    }

    #[test]
    fn test_hourly_trend_coerces_values() {
        let map: OrderedMap<HourlyBucket> = serde_json::from_str(
            r#"{"18:00": {"sales": "1234.5"},
                "06:00": {"sales": 10, "count": 4}}"#,
        )
        .unwrap();

        let points = hourly_trend(Some(&map));
        assert_eq!(points[0].label, "18:00");
        assert_eq!(points[0].primary_value, 1234.5);
        assert_eq!(points[0].secondary_value, 0.0);
        assert_eq!(points[1].secondary_value, 4.0);
    }

    #[test]
    fn test_non_numeric_value_becomes_zero() {
        let map: OrderedMap<DailyBucket> =
            serde_json::from_str(r#"{"2024-03-01": {"sales": "n/a", "liters": null}}"#).unwrap();

        let points = daily_trend(Some(&map));
        assert_eq!(points[0].primary_value, 0.0);
        assert_eq!(points[0].secondary_value, 0.0);
    }

    #[test]
    fn test_payment_bars_counts() {
        let map: OrderedMap<Count> = serde_json::from_str(r#"{"Card": 7, "Cash": "2"}"#).unwrap();

        let points = payment_bars(Some(&map));
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].primary_value, 2.0);
        assert!(payment_bars(None).is_empty());
    }
}
