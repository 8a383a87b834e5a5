//! # Sunlog Service
//!
//! Business logic layer for Sunlog. This crate owns the cache-aside access
//! pattern: every read consults an in-memory [`cache::EntityCache`] before
//! the store, and every write wholesale-clears the cache for its entity
//! type. It also hosts the process-wide [`counter::RequestCounter`], the
//! [`resolver::AssociationResolver`] that turns id lists into loaded
//! entities, and the external sunrise/sunset [`lookup`] client.

pub mod cache;
pub mod counter;
pub mod dto;
pub mod r#impl;
pub mod lookup;
pub mod resolver;

mod location_service;
mod sunrise_sunset_service;

pub use cache::{cache_keys, EntityCache};
pub use counter::RequestCounter;
pub use dto::*;
pub use location_service::LocationService;
pub use lookup::{
    LookupResponse, LookupResults, SunriseLookupApi, SunriseLookupClient,
    SunriseLookupClientParameters, LOOKUP_SERVICE,
};
pub use r#impl::{
    LocationServiceImpl, LocationServiceImplParameters, SunriseSunsetServiceImpl,
    SunriseSunsetServiceImplParameters,
};
pub use resolver::{AssociationResolver, AssociationResolverImpl};
pub use sunrise_sunset_service::SunriseSunsetService;

#[cfg(test)]
pub(crate) mod testing;
