use sqlx::SqlitePool;
use tracing::{debug, instrument};

use crate::db::{DbError, Station};

#[derive(Clone)]
pub struct StationRepository {
    pool: SqlitePool,
}

impl StationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All stations in storage order
    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<Station>, DbError> {
        debug!("Querying all stations");

        let stations = sqlx::query_as::<_, Station>(
            r#"
            SELECT
                id,
                station AS station_id,
                name,
                CAST(latitude AS REAL) AS latitude,
                CAST(longitude AS REAL) AS longitude,
                CAST(elevation AS REAL) AS elevation
            FROM stations
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!("Found {} stations", stations.len());
        Ok(stations)
    }

    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<i64, DbError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM stations")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
