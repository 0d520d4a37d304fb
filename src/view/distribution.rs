use crate::model::{Count, FuelBucket, OrderedMap};
use crate::view::DistributionSlice;

/// Percentage of `value` in `total`; 0 when there is nothing to divide by.
pub fn share_percent(value: f64, total: f64) -> f64 {
    if total > 0.0 && total.is_finite() {
        100.0 * value / total
    } else {
        0.0
    }
}

fn distribute<'a, I>(entries: I) -> Vec<DistributionSlice>
where
    I: Iterator<Item = (&'a str, f64, f64)>,
{
    let rows: Vec<_> = entries.collect();
    let total: f64 = rows.iter().map(|(_, primary, _)| *primary).sum();

    rows.into_iter()
        .map(|(label, primary, secondary)| DistributionSlice {
            label: label.to_string(),
            primary_value: primary,
            secondary_value: secondary,
            share_percent: share_percent(primary, total),
        })
        .collect()
}

/// Fuel types sliced by sales value; liters ride along as the secondary value.
pub fn fuel_distribution(source: Option<&OrderedMap<FuelBucket>>) -> Vec<DistributionSlice> {
    match source {
        Some(map) => distribute(map.iter().map(|(label, b)| (label, b.sales, b.liters))),
        None => Vec::new(),
    }
}

/// Payment methods sliced by transaction count.
pub fn payment_mix(source: Option<&OrderedMap<Count>>) -> Vec<DistributionSlice> {
    let Some(map) = source else {
        return Vec::new();
    };
    let total: u64 = map.iter().map(|(_, c)| c.0).sum();

    map.iter()
        .map(|(label, count)| DistributionSlice {
            label: label.to_string(),
            primary_value: count.0 as f64,
            secondary_value: 0.0,
            share_percent: share_percent(count.0 as f64, total as f64),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fuel(sales: f64, liters: f64) -> FuelBucket {
        FuelBucket {
            sales,
            liters,
            percentage: None,
        }
    }

    #[test]
    fn test_zero_sum_distribution_is_all_zero() {
        let map: OrderedMap<FuelBucket> =
            vec![("Petrol", fuel(0.0, 0.0)), ("Diesel", fuel(0.0, 0.0))].into_iter().collect();

        let slices = fuel_distribution(Some(&map));
        assert_eq!(slices.len(), 2);
        for slice in &slices {
            assert_eq!(slice.share_percent, 0.0);
            assert!(!slice.share_percent.is_nan());
        }
    }

    #[test]
    fn test_fuel_shares_follow_sales() {
        let map: OrderedMap<FuelBucket> =
            vec![("Petrol", fuel(750.0, 7.0)), ("Diesel", fuel(250.0, 3.0))].into_iter().collect();

        let slices = fuel_distribution(Some(&map));
        assert_eq!(slices[0].label, "Petrol");
        assert_eq!(slices[0].share_percent, 75.0);
        assert_eq!(slices[0].secondary_value, 7.0);
        assert_eq!(slices[1].share_percent, 25.0);
    }

    #[test]
    fn test_payment_mix_keeps_source_order() {
        let map: OrderedMap<Count> =
            vec![("UPI", Count(1)), ("Cash", Count(3))].into_iter().collect();

        let slices = payment_mix(Some(&map));
        let labels: Vec<_> = slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["UPI", "Cash"]);
        assert_eq!(slices[0].share_percent, 25.0);
        assert_eq!(slices[1].share_percent, 75.0);
    }

    #[test]
    fn test_zero_count_payment_mix_is_all_zero() {
        let map: OrderedMap<Count> = serde_json::from_str(r#"{"Cash": 0, "UPI": 0}"#).unwrap();

        let slices = payment_mix(Some(&map));
        assert_eq!(slices.len(), 2);
        for slice in &slices {
            assert_eq!(slice.share_percent, 0.0);
            assert!(!slice.share_percent.is_nan());
        }
    }

    #[test]
    fn test_missing_sources_yield_nothing() {
        assert!(fuel_distribution(None).is_empty());
        assert!(payment_mix(None).is_empty());
        assert!(payment_mix(Some(&OrderedMap::new())).is_empty());
    }

    #[test]
    fn test_share_percent_guards_division() {
        assert_eq!(share_percent(5.0, 0.0), 0.0);
        assert_eq!(share_percent(5.0, f64::NAN), 0.0);
        assert_eq!(share_percent(1.0, 4.0), 25.0);
    }
}
