use serde::Serialize;
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

use crate::aggregation::{
    self, DailySeries, DateRange, TemperatureStats, LAST_YEAR_DATE_COUNT,
};
use crate::db::{DbError, MeasurementRepository, Station, StationRepository};
use crate::services::{QueryDate, ServiceError};

/// Extent of the loaded dataset
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DatasetSummary {
    pub earliest_date: Option<String>,
    pub latest_date: Option<String>,
    pub station_count: i64,
}

/// Climate queries over the observation dataset.
///
/// Each call reads its records with a single query and aggregates them in
/// memory, so results always reflect one consistent snapshot of storage.
#[derive(Clone)]
pub struct ClimateService {
    measurement_repo: MeasurementRepository,
    station_repo: StationRepository,
}

impl ClimateService {
    pub fn new(measurement_repo: MeasurementRepository, station_repo: StationRepository) -> Self {
        Self {
            measurement_repo,
            station_repo,
        }
    }

    /// Daily precipitation totals for the latest year of data
    #[instrument(skip(self))]
    pub async fn precipitation_last_year(&self) -> Result<DailySeries, DbError> {
        let measurements = self.measurement_repo.find_all().await?;
        let totals = aggregation::daily_precipitation_totals(&measurements, LAST_YEAR_DATE_COUNT);

        debug!(
            "Aggregated {} measurements into {} daily precipitation totals",
            measurements.len(),
            totals.len()
        );
        Ok(totals)
    }

    #[instrument(skip(self))]
    pub async fn all_stations(&self) -> Result<Vec<Station>, DbError> {
        self.station_repo.find_all().await
    }

    /// Daily mean temperature for the latest year of data
    #[instrument(skip(self))]
    pub async fn mean_temperature_last_year(&self) -> Result<DailySeries, DbError> {
        let measurements = self.measurement_repo.find_all().await?;
        let means = aggregation::daily_mean_temperature(&measurements, LAST_YEAR_DATE_COUNT);

        debug!(
            "Aggregated {} measurements into {} daily mean temperatures",
            measurements.len(),
            means.len()
        );
        Ok(means)
    }

    /// Minimum, maximum and average temperature from `start` through `end`
    ///
    /// Both bounds are inclusive; without `end` the range runs to the latest
    /// observation. An `end` before `start` selects nothing.
    #[instrument(skip(self))]
    pub async fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureStats, ServiceError> {
        let start = QueryDate::parse(start)?;
        let end = end.map(QueryDate::parse).transpose()?;
        let range = DateRange::new(start.into_string(), end.map(QueryDate::into_string));

        if range.is_inverted() {
            info!(
                "Range end {:?} precedes start {}, no observations selected",
                range.end, range.start
            );
            return Ok(TemperatureStats::default());
        }

        let measurements = self.measurement_repo.find_by_date_range(&range).await?;
        let stats = aggregation::temperature_stats(&measurements, &range);

        debug!(
            "Computed temperature stats over {} measurements: {:?}",
            measurements.len(),
            stats
        );
        Ok(stats)
    }

    #[instrument(skip(self))]
    pub async fn dataset_summary(&self) -> Result<DatasetSummary, DbError> {
        let bounds = self.measurement_repo.date_bounds().await?;
        let station_count = self.station_repo.count().await?;

        Ok(DatasetSummary {
            earliest_date: bounds.earliest,
            latest_date: bounds.latest,
            station_count,
        })
    }
}
