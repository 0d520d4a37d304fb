pub mod filter;
pub mod numeric;
pub mod stats;

pub use filter::FilterParams;
pub use numeric::{Count, OrderedMap};
pub use stats::{AggregateStats, DailyBucket, FuelBucket, HourlyBucket, MachineBucket};
