//! MySQL sunrise/sunset record repository implementation.

use crate::{pool::DatabasePoolInterface, traits::SunriseSunsetRepository};
use async_trait::async_trait;
use shaku::Component;
use sqlx::mysql::MySqlPool;
use sqlx::{FromRow, MySql, QueryBuilder, Transaction};
use std::collections::HashMap;
use std::sync::Arc;
use sunlog_core::{Location, LocationId, SunlogResult, SunriseSunset, SunriseSunsetId};
use tracing::debug;

/// MySQL sunrise/sunset record repository implementation.
#[derive(Component)]
#[shaku(interface = SunriseSunsetRepository)]
pub struct MySqlSunriseSunsetRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlSunriseSunsetRepository {
    /// Creates a new MySQL sunrise/sunset repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a sunrise/sunset record.
#[derive(Debug, FromRow)]
struct SunriseSunsetRow {
    id: i64,
    latitude: f64,
    longitude: f64,
    date: String,
    sunrise: String,
    sunset: String,
}

impl From<SunriseSunsetRow> for SunriseSunset {
    fn from(row: SunriseSunsetRow) -> Self {
        Self {
            id: SunriseSunsetId::new(row.id),
            latitude: row.latitude,
            longitude: row.longitude,
            date: row.date,
            sunrise: row.sunrise,
            sunset: row.sunset,
            locations: Vec::new(),
        }
    }
}

/// Join row carrying a location for a given sunrise/sunset record.
#[derive(Debug, FromRow)]
struct AssociatedLocationRow {
    sunrise_sunset_id: i64,
    id: i64,
    name: String,
    country: String,
}

impl AssociatedLocationRow {
    fn into_location(self) -> Location {
        Location {
            id: LocationId::new(self.id),
            name: self.name,
            country: self.country,
            sunrise_sunsets: Vec::new(),
        }
    }
}

const SELECT_COLUMNS: &str = "id, latitude, longitude, `date`, sunrise, sunset";

/// Loads the association sets for the given record ids, one level deep.
async fn load_associations(
    pool: &MySqlPool,
    ids: &[i64],
) -> SunlogResult<HashMap<i64, Vec<Location>>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let mut qb = QueryBuilder::<MySql>::new(
        "SELECT ssl.sunrise_sunset_id, l.id, l.name, l.country \
         FROM sunrise_sunset_location ssl \
         JOIN location l ON l.id = ssl.location_id \
         WHERE ssl.sunrise_sunset_id IN (",
    );
    {
        let mut sep = qb.separated(", ");
        for id in ids {
            sep.push_bind(*id);
        }
    }
    qb.push(")");

    let rows = qb
        .build_query_as::<AssociatedLocationRow>()
        .fetch_all(pool)
        .await?;

    let mut grouped: HashMap<i64, Vec<Location>> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.sunrise_sunset_id)
            .or_default()
            .push(row.into_location());
    }
    Ok(grouped)
}

/// Attaches loaded association sets to their records.
fn attach_associations(
    rows: Vec<SunriseSunsetRow>,
    mut associations: HashMap<i64, Vec<Location>>,
) -> Vec<SunriseSunset> {
    rows.into_iter()
        .map(|row| {
            let locations = associations.remove(&row.id).unwrap_or_default();
            let mut record = SunriseSunset::from(row);
            record.locations = locations;
            record
        })
        .collect()
}

/// Inserts or updates a record and rewrites its join rows.
///
/// This side owns the join: the `sunrise_sunset_location` rows are replaced
/// from the entity's association set on every save.
async fn persist_with_join(
    tx: &mut Transaction<'_, MySql>,
    record: &SunriseSunset,
) -> SunlogResult<SunriseSunset> {
    let mut saved = record.clone();
    if saved.id.is_unsaved() {
        let result = sqlx::query(
            "INSERT INTO sunrise_sunset (latitude, longitude, `date`, sunrise, sunset) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(saved.latitude)
        .bind(saved.longitude)
        .bind(&saved.date)
        .bind(&saved.sunrise)
        .bind(&saved.sunset)
        .execute(&mut **tx)
        .await?;
        saved.id = SunriseSunsetId::new(result.last_insert_id() as i64);
    } else {
        sqlx::query(
            "UPDATE sunrise_sunset \
             SET latitude = ?, longitude = ?, `date` = ?, sunrise = ?, sunset = ? \
             WHERE id = ?",
        )
        .bind(saved.latitude)
        .bind(saved.longitude)
        .bind(&saved.date)
        .bind(&saved.sunrise)
        .bind(&saved.sunset)
        .bind(saved.id.into_inner())
        .execute(&mut **tx)
        .await?;
    }

    sqlx::query("DELETE FROM sunrise_sunset_location WHERE sunrise_sunset_id = ?")
        .bind(saved.id.into_inner())
        .execute(&mut **tx)
        .await?;
    for location in &saved.locations {
        sqlx::query(
            "INSERT INTO sunrise_sunset_location (sunrise_sunset_id, location_id) VALUES (?, ?)",
        )
        .bind(saved.id.into_inner())
        .bind(location.id.into_inner())
        .execute(&mut **tx)
        .await?;
    }

    Ok(saved)
}

#[async_trait]
impl SunriseSunsetRepository for MySqlSunriseSunsetRepository {
    async fn find_all(&self) -> SunlogResult<Vec<SunriseSunset>> {
        debug!("Finding all sunrise/sunset records");
        let pool = self.pool.try_pool()?;

        let rows = sqlx::query_as::<_, SunriseSunsetRow>(&format!(
            "SELECT {} FROM sunrise_sunset ORDER BY id",
            SELECT_COLUMNS
        ))
        .fetch_all(pool)
        .await?;

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let associations = load_associations(pool, &ids).await?;
        Ok(attach_associations(rows, associations))
    }

    async fn find_by_id(&self, id: SunriseSunsetId) -> SunlogResult<Option<SunriseSunset>> {
        debug!("Finding sunrise/sunset record by id: {}", id);
        let pool = self.pool.try_pool()?;

        let row = sqlx::query_as::<_, SunriseSunsetRow>(&format!(
            "SELECT {} FROM sunrise_sunset WHERE id = ?",
            SELECT_COLUMNS
        ))
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

    async fn find_all_by_id(&self, ids: &[SunriseSunsetId]) -> SunlogResult<Vec<SunriseSunset>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Finding {} sunrise/sunset records by id list", ids.len());
        let pool = self.pool.try_pool()?;

        let mut qb = QueryBuilder::<MySql>::new(format!(
            "SELECT {} FROM sunrise_sunset WHERE id IN (",
            SELECT_COLUMNS
        ));
        {
            let mut sep = qb.separated(", ");
            for id in ids {
                sep.push_bind(id.into_inner());
            }
        }
        qb.push(") ORDER BY id");

        let rows = qb
            .build_query_as::<SunriseSunsetRow>()
            .fetch_all(pool)
            .await?;
        let found: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let associations = load_associations(pool, &found).await?;
        Ok(attach_associations(rows, associations))
    }

    async fn find_by_date(&self, date: &str) -> SunlogResult<Vec<SunriseSunset>> {
        debug!("Finding sunrise/sunset records by date: {}", date);
        let pool = self.pool.try_pool()?;

        let rows = sqlx::query_as::<_, SunriseSunsetRow>(&format!(
            "SELECT {} FROM sunrise_sunset WHERE `date` = ? ORDER BY id",
            SELECT_COLUMNS
        ))
        .bind(date)
        .fetch_all(pool)
        .await?;

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let associations = load_associations(pool, &ids).await?;
        Ok(attach_associations(rows, associations))
    }

    async fn save(&self, record: &SunriseSunset) -> SunlogResult<SunriseSunset> {
        debug!("Saving sunrise/sunset record for date: {}", record.date);
        let pool = self.pool.try_pool()?;

        let mut tx = pool.begin().await?;
        let saved = persist_with_join(&mut tx, record).await?;
        tx.commit().await?;
        Ok(saved)
    }

    async fn save_all(&self, records: &[SunriseSunset]) -> SunlogResult<Vec<SunriseSunset>> {
        debug!("Saving {} sunrise/sunset records", records.len());
        let pool = self.pool.try_pool()?;

        let mut tx = pool.begin().await?;
        let mut saved = Vec::with_capacity(records.len());
        for record in records {
            saved.push(persist_with_join(&mut tx, record).await?);
        }
        tx.commit().await?;
        Ok(saved)
    }

    async fn delete(&self, id: SunriseSunsetId) -> SunlogResult<bool> {
        debug!("Deleting sunrise/sunset record: {}", id);
        let pool = self.pool.try_pool()?;

        let result = sqlx::query("DELETE FROM sunrise_sunset WHERE id = ?")
            .bind(id.into_inner())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for MySqlSunriseSunsetRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlSunriseSunsetRepository").finish_non_exhaustive()
    }
}
