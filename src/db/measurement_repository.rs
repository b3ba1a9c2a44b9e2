use sqlx::SqlitePool;
use tracing::{debug, instrument};

use crate::aggregation::DateRange;
use crate::db::{DateBounds, DbError, Measurement};

// Numeric columns are cast so INTEGER and FLOAT storage decode the same way.
const MEASUREMENT_COLUMNS: &str = r#"
    station AS station_id,
    date,
    CAST(prcp AS REAL) AS precipitation,
    CAST(tobs AS REAL) AS temperature
"#;

#[derive(Clone)]
pub struct MeasurementRepository {
    pool: SqlitePool,
}

impl MeasurementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Every measurement, oldest date first
    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<Measurement>, DbError> {
        debug!("Querying all measurements");

        let sql = format!("SELECT {MEASUREMENT_COLUMNS} FROM measurements ORDER BY date");
        let measurements = sqlx::query_as::<_, Measurement>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!("Found {} measurements", measurements.len());
        Ok(measurements)
    }

    /// Measurements dated within `range`, both bounds inclusive
    #[instrument(skip(self), fields(start = %range.start, end = ?range.end))]
    pub async fn find_by_date_range(&self, range: &DateRange) -> Result<Vec<Measurement>, DbError> {
        debug!("Querying measurements from {} to {:?}", range.start, range.end);

        let sql = format!(
            r#"
            SELECT {MEASUREMENT_COLUMNS}
            FROM measurements
            WHERE date >= ? AND (? IS NULL OR date <= ?)
            ORDER BY date
            "#
        );
        let end = range.end.as_deref();
        let measurements = sqlx::query_as::<_, Measurement>(&sql)
            .bind(range.start.as_str())
            .bind(end)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;

        debug!("Found {} measurements", measurements.len());
        Ok(measurements)
    }

    #[instrument(skip(self))]
    pub async fn date_bounds(&self) -> Result<DateBounds, DbError> {
        let bounds = sqlx::query_as::<_, DateBounds>(
            "SELECT MIN(date) AS earliest, MAX(date) AS latest FROM measurements",
        )
        .fetch_one(&self.pool)
        .await?;

        debug!("Measurement dates span {:?} to {:?}", bounds.earliest, bounds.latest);
        Ok(bounds)
    }
}
