//! Data transfer objects for the service layer.

mod location_dto;
mod sunrise_sunset_dto;

pub use location_dto::{BulkLocationRequest, CreateLocationRequest, LocationUpsert, UpdateLocationRequest};
pub use sunrise_sunset_dto::{
    CreateSunriseSunsetRequest, FetchOutcome, FetchRequest, UpdateSunriseSunsetRequest,
};
