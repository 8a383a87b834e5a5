//! Association resolver: foreign id lists to loaded entities.

use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use sunlog_core::{Interface, Location, LocationId, SunlogResult, SunriseSunset, SunriseSunsetId};
use sunlog_repository::{LocationRepository, SunriseSunsetRepository};
use tracing::debug;

/// Resolves lists of foreign ids into owned entity instances.
///
/// Ids with no matching entity are silently omitted from the result.
/// An empty input yields an empty result without a store query.
#[async_trait]
pub trait AssociationResolver: Interface + Send + Sync {
    /// Resolves location ids.
    async fn resolve_locations(&self, ids: &[LocationId]) -> SunlogResult<Vec<Location>>;

    /// Resolves sunrise/sunset record ids.
    async fn resolve_sunrise_sunsets(
        &self,
        ids: &[SunriseSunsetId],
    ) -> SunlogResult<Vec<SunriseSunset>>;
}

/// Store-backed resolver used by both entity services.
#[derive(Component)]
#[shaku(interface = AssociationResolver)]
pub struct AssociationResolverImpl {
    #[shaku(inject)]
    location_repository: Arc<dyn LocationRepository>,
    #[shaku(inject)]
    sunrise_sunset_repository: Arc<dyn SunriseSunsetRepository>,
}

impl AssociationResolverImpl {
    /// Creates a new resolver over the given repositories.
    #[must_use]
    pub fn new(
        location_repository: Arc<dyn LocationRepository>,
        sunrise_sunset_repository: Arc<dyn SunriseSunsetRepository>,
    ) -> Self {
        Self {
            location_repository,
            sunrise_sunset_repository,
        }
    }
}

#[async_trait]
impl AssociationResolver for AssociationResolverImpl {
    async fn resolve_locations(&self, ids: &[LocationId]) -> SunlogResult<Vec<Location>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Resolving {} location ids", ids.len());
        self.location_repository.find_all_by_id(ids).await
    }

    async fn resolve_sunrise_sunsets(
        &self,
        ids: &[SunriseSunsetId],
    ) -> SunlogResult<Vec<SunriseSunset>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Resolving {} sunrise/sunset ids", ids.len());
        self.sunrise_sunset_repository.find_all_by_id(ids).await
    }
}

impl std::fmt::Debug for AssociationResolverImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssociationResolverImpl").finish_non_exhaustive()
    }
}
