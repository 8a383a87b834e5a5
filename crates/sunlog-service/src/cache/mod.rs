//! Caching infrastructure for the service layer.
//!
//! One [`EntityCache`] instance exists per entity type, constructed at
//! startup and shared by every caller. There is no TTL and no eviction;
//! the only removal path is a wholesale [`EntityCache::clear`] after a
//! write to that entity type.

pub mod cache_keys;
mod entity_cache;

pub use entity_cache::EntityCache;
