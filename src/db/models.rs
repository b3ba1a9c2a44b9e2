use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// Database entity models

/// One station's observations for one day.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Measurement {
    pub station_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub precipitation: Option<f64>,
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, ToSchema)]
pub struct Station {
    pub id: i64,
    pub station_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

/// Earliest and latest observation dates; both `None` for an empty table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DateBounds {
    pub earliest: Option<String>,
    pub latest: Option<String>,
}
