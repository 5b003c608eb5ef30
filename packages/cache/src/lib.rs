// ABOUTME: Cache layer for Steamfolio
// ABOUTME: TTL key-value stores and a typed facade fronting slow Steam lookups

pub mod cache;
pub mod keys;
pub mod store;

pub use cache::{Cache, CacheError};
pub use keys::{
    CacheKey, FRIENDS_OWN_TTL, LIBRARY_TTL, PLAYER_COUNT_TTL, STORE_DETAILS_TTL,
};
pub use store::{CacheStore, DisabledCache, MemoryCache};
