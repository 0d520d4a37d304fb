use crate::model::{MachineBucket, OrderedMap};
use crate::view::ActivityRow;

pub fn machine_activity(source: Option<&OrderedMap<MachineBucket>>) -> Vec<ActivityRow> {
    let Some(map) = source else {
        return Vec::new();
    };
    map.iter()
        .map(|(label, bucket)| ActivityRow {
            label: label.to_string(),
            sales: bucket.sales,
            liters: bucket.liters,
            count: bucket.count,
        })
        .collect()
}
