//! MySQL location repository implementation.

use crate::{pool::DatabasePoolInterface, traits::LocationRepository};
use async_trait::async_trait;
use shaku::Component;
use sqlx::mysql::MySqlPool;
use sqlx::{FromRow, MySql, QueryBuilder};
use std::collections::HashMap;
use std::sync::Arc;
use sunlog_core::{Location, LocationId, SunlogResult, SunriseSunset, SunriseSunsetId};
use tracing::debug;

/// MySQL location repository implementation.
#[derive(Component)]
#[shaku(interface = LocationRepository)]
pub struct MySqlLocationRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlLocationRepository {
    /// Creates a new MySQL location repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a location.
#[derive(Debug, FromRow)]
struct LocationRow {
    id: i64,
    name: String,
    country: String,
}

impl From<LocationRow> for Location {
    fn from(row: LocationRow) -> Self {
        Self {
            id: LocationId::new(row.id),
            name: row.name,
            country: row.country,
            sunrise_sunsets: Vec::new(),
        }
    }
}

/// Join row carrying a sunrise/sunset record for a given location.
#[derive(Debug, FromRow)]
struct AssociatedRecordRow {
    location_id: i64,
    id: i64,
    latitude: f64,
    longitude: f64,
    date: String,
    sunrise: String,
    sunset: String,
}

impl AssociatedRecordRow {
    fn into_record(self) -> SunriseSunset {
        SunriseSunset {
            id: SunriseSunsetId::new(self.id),
            latitude: self.latitude,
            longitude: self.longitude,
            date: self.date,
            sunrise: self.sunrise,
            sunset: self.sunset,
            locations: Vec::new(),
        }
    }
}

/// Loads the association sets for the given location ids, one level deep.
async fn load_associations(
    pool: &MySqlPool,
    ids: &[i64],
) -> SunlogResult<HashMap<i64, Vec<SunriseSunset>>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let mut qb = QueryBuilder::<MySql>::new(
        "SELECT ssl.location_id, ss.id, ss.latitude, ss.longitude, ss.`date`, ss.sunrise, ss.sunset \
         FROM sunrise_sunset_location ssl \
         JOIN sunrise_sunset ss ON ss.id = ssl.sunrise_sunset_id \
         WHERE ssl.location_id IN (",
    );
    {
        let mut sep = qb.separated(", ");
        for id in ids {
            sep.push_bind(*id);
        }
    }
    qb.push(")");

    let rows = qb
        .build_query_as::<AssociatedRecordRow>()
        .fetch_all(pool)
        .await?;

    let mut grouped: HashMap<i64, Vec<SunriseSunset>> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.location_id)
            .or_default()
            .push(row.into_record());
    }
    Ok(grouped)
}

/// Attaches loaded association sets to their locations.
fn attach_associations(
    rows: Vec<LocationRow>,
    mut associations: HashMap<i64, Vec<SunriseSunset>>,
) -> Vec<Location> {
    rows.into_iter()
        .map(|row| {
            let records = associations.remove(&row.id).unwrap_or_default();
            let mut location = Location::from(row);
            location.sunrise_sunsets = records;
            location
        })
        .collect()
}

/// Inserts or updates the scalar columns of a location.
///
/// The location side is the inverse side of the join, so the association
/// set is intentionally not written here.
async fn persist_scalar<'e, E>(executor: E, location: &Location) -> SunlogResult<Location>
where
    E: sqlx::Executor<'e, Database = MySql>,
{
    let mut saved = location.clone();
    if saved.id.is_unsaved() {
        let result = sqlx::query("INSERT INTO location (name, country) VALUES (?, ?)")
            .bind(&saved.name)
            .bind(&saved.country)
            .execute(executor)
            .await?;
        saved.id = LocationId::new(result.last_insert_id() as i64);
    } else {
        sqlx::query("UPDATE location SET name = ?, country = ? WHERE id = ?")
            .bind(&saved.name)
            .bind(&saved.country)
            .bind(saved.id.into_inner())
            .execute(executor)
            .await?;
    }
    Ok(saved)
}

#[async_trait]
impl LocationRepository for MySqlLocationRepository {
    async fn find_all(&self) -> SunlogResult<Vec<Location>> {
        debug!("Finding all locations");
        let pool = self.pool.try_pool()?;

        let rows =
            sqlx::query_as::<_, LocationRow>("SELECT id, name, country FROM location ORDER BY id")
                .fetch_all(pool)
                .await?;

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let associations = load_associations(pool, &ids).await?;
        Ok(attach_associations(rows, associations))
    }

    async fn find_by_id(&self, id: LocationId) -> SunlogResult<Option<Location>> {
        debug!("Finding location by id: {}", id);
        let pool = self.pool.try_pool()?;

        let row =
            sqlx::query_as::<_, LocationRow>("SELECT id, name, country FROM location WHERE id = ?")
                .bind(id.into_inner())
                .fetch_optional(pool)
                .await?;

        match row {
            Some(row) => {
                let associations = load_associations(pool, &[row.id]).await?;
                Ok(attach_associations(vec![row], associations).pop())
            }
            None => Ok(None),
        }
    }

    async fn find_all_by_id(&self, ids: &[LocationId]) -> SunlogResult<Vec<Location>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Finding {} locations by id list", ids.len());
        let pool = self.pool.try_pool()?;

        let mut qb =
            QueryBuilder::<MySql>::new("SELECT id, name, country FROM location WHERE id IN (");
        {
            let mut sep = qb.separated(", ");
            for id in ids {
                sep.push_bind(id.into_inner());
            }
        }
        qb.push(") ORDER BY id");

        let rows = qb.build_query_as::<LocationRow>().fetch_all(pool).await?;
        let found: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let associations = load_associations(pool, &found).await?;
        Ok(attach_associations(rows, associations))
    }

    async fn find_by_sunrise_sunset_date(&self, date: &str) -> SunlogResult<Vec<Location>> {
        debug!("Finding locations by sunrise/sunset date: {}", date);
        let pool = self.pool.try_pool()?;

        let rows = sqlx::query_as::<_, LocationRow>(
            "SELECT DISTINCT l.id, l.name, l.country \
             FROM location l \
             JOIN sunrise_sunset_location ssl ON ssl.location_id = l.id \
             JOIN sunrise_sunset ss ON ss.id = ssl.sunrise_sunset_id \
             WHERE ss.`date` = ? \
             ORDER BY l.id",
        )
        .bind(date)
        .fetch_all(pool)
        .await?;

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let associations = load_associations(pool, &ids).await?;
        Ok(attach_associations(rows, associations))
    }

    async fn save(&self, location: &Location) -> SunlogResult<Location> {
        debug!("Saving location: {}", location.name);
        let pool = self.pool.try_pool()?;

        persist_scalar(pool, location).await
    }

    async fn save_all(&self, locations: &[Location]) -> SunlogResult<Vec<Location>> {
        debug!("Saving {} locations", locations.len());
        let pool = self.pool.try_pool()?;

        let mut tx = pool.begin().await?;
        let mut saved = Vec::with_capacity(locations.len());
        for location in locations {
            saved.push(persist_scalar(&mut *tx, location).await?);
        }
        tx.commit().await?;
        Ok(saved)
    }

    async fn delete(&self, id: LocationId) -> SunlogResult<bool> {
        debug!("Deleting location: {}", id);
        let pool = self.pool.try_pool()?;

        let result = sqlx::query("DELETE FROM location WHERE id = ?")
            .bind(id.into_inner())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for MySqlLocationRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlLocationRepository").finish_non_exhaustive()
    }
}
