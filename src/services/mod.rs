// Service exports
pub mod cache;
pub mod store;

pub use cache::{CacheError, CacheKey, CacheStats, MatchCache, SummaryCache};
pub use store::{InMemoryStore, ListingStore, SeedData, StoreError};
