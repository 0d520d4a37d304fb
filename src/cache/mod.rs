pub mod clock;
pub mod fetch_cache;

pub use clock::{Clock, ManualClock, SystemClock};
pub use fetch_cache::{CacheEntry, CacheFingerprint, FetchCache, DEFAULT_TTL_MS};
