//! # Sunlog Repository
//!
//! Persistence layer for Sunlog, backed by MySQL through SQLx:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn LocationRepository> / Arc<dyn SunriseSunsetRepository>
//! MySqlLocationRepository / MySqlSunriseSunsetRepository
//!   ↓  Arc<dyn DatabasePoolInterface>
//! MySQL
//! ```
//!
//! The many-to-many relation between locations and sunrise/sunset records
//! lives in the `sunrise_sunset_location` join table. The record side owns
//! the join: saving a [`sunlog_core::SunriseSunset`] rewrites its join rows,
//! while saving a [`sunlog_core::Location`] persists scalar fields only.

pub mod mysql;
pub mod pool;
pub mod traits;

pub use mysql::{MySqlLocationRepository, MySqlSunriseSunsetRepository};
pub use pool::*;
pub use traits::*;
