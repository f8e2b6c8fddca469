//! Data fetch cache.
//!
//! Memoizes profile and repository lookups per key, absorbs API failures by
//! serving fallback data, and coalesces concurrent lookups of the same key.

mod clock;
mod fetch;
mod key;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use fetch::{FetchCache, FetchSource, Fetched};
pub use key::CacheKey;
pub use store::{CacheEntry, MemoStore};
