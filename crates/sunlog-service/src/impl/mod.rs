//! Service implementations.

mod location_service_impl;
mod sunrise_sunset_service_impl;

pub use location_service_impl::{LocationServiceImpl, LocationServiceImplParameters};
pub use sunrise_sunset_service_impl::{
    SunriseSunsetServiceImpl, SunriseSunsetServiceImplParameters,
};
