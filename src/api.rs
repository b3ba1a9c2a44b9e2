use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::aggregation::{DailySeries, TemperatureStats};
use crate::db::Station;
use crate::services::{ClimateService, DatasetSummary, ServiceError};

#[derive(Clone)]
pub struct AppState {
    pub climate_service: ClimateService,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize, ToSchema)]
pub struct RouteInfo {
    pub path: String,
    pub description: String,
}

#[derive(Serialize, ToSchema)]
pub struct RouteIndex {
    pub routes: Vec<RouteInfo>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatsQuery {
    /// First date included, YYYY-MM-DD
    pub start: String,
    /// Last date included, YYYY-MM-DD
    pub end: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        route_index,
        health,
        get_precipitation,
        get_stations,
        get_daily_mean_temperature,
        get_temperature_stats,
        get_stats_from,
        get_stats_between,
        get_dataset_summary
    ),
    components(schemas(
        HealthResponse,
        RouteInfo,
        RouteIndex,
        DailySeries,
        TemperatureStats,
        Station,
        DatasetSummary
    )),
    tags((name = "climate", description = "Precipitation and temperature aggregates"))
)]
pub struct ApiDoc;

pub fn generate_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health))
        .route("/precipitation", get(get_precipitation))
        .route("/stations", get(get_stations))
        .route("/tobs", get(get_daily_mean_temperature))
        .route("/dataset", get(get_dataset_summary))
        .route("/temperature/daily-mean", get(get_daily_mean_temperature))
        .route("/temperature/stats", get(get_temperature_stats))
        .route("/{start}", get(get_stats_from))
        .route("/{start}/{end}", get(get_stats_between))
        .with_state(state);

    Router::new()
        .route("/", get(route_index))
        .nest("/api/v1.0", api_routes)
}

const ROUTES: &[(&str, &str)] = &[
    (
        "/api/v1.0/precipitation",
        "Total precipitation per day for the latest year of data",
    ),
    ("/api/v1.0/stations", "All weather stations"),
    (
        "/api/v1.0/tobs",
        "Mean observed temperature per day for the latest year of data",
    ),
    (
        "/api/v1.0/temperature/daily-mean",
        "Mean observed temperature per day for the latest year of data",
    ),
    (
        "/api/v1.0/temperature/stats?start=YYYY-MM-DD&end=YYYY-MM-DD",
        "Minimum, maximum and average temperature for an inclusive date range; end is optional",
    ),
    (
        "/api/v1.0/{start}",
        "Minimum, maximum and average temperature from start (YYYY-MM-DD) onwards",
    ),
    (
        "/api/v1.0/{start}/{end}",
        "Minimum, maximum and average temperature from start through end (YYYY-MM-DD)",
    ),
    ("/api/v1.0/dataset", "Date span and station count of the dataset"),
    ("/api/v1.0/health", "Service health"),
];

#[utoipa::path(
    get,
    path = "/",
    tag = "climate",
    responses((status = 200, description = "Available routes", body = RouteIndex))
)]
#[instrument]
async fn route_index() -> Json<RouteIndex> {
    debug!("Route index requested");
    let routes = ROUTES
        .iter()
        .map(|(path, description)| RouteInfo {
            path: path.to_string(),
            description: description.to_string(),
        })
        .collect();
    Json(RouteIndex { routes })
}

#[utoipa::path(
    get,
    path = "/api/v1.0/health",
    tag = "climate",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
#[instrument(skip(_state))]
async fn health(State(_state): State<AppState>) -> impl IntoResponse {
    debug!("Health check requested");
    let response = HealthResponse {
        status: "healthy".to_string(),
    };
    (StatusCode::OK, Json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    tag = "climate",
    responses(
        (status = 200, description = "Precipitation totals keyed by date", body = DailySeries),
        (status = 500, description = "Storage failure")
    )
)]
#[instrument(skip(state))]
async fn get_precipitation(State(state): State<AppState>) -> Result<Json<DailySeries>, StatusCode> {
    debug!("Fetching daily precipitation totals");
    let totals = state
        .climate_service
        .precipitation_last_year()
        .await
        .map_err(|e| {
            error!("Failed to compute daily precipitation totals: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    info!("Retrieved precipitation totals for {} dates", totals.len());
    Ok(Json(totals))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    tag = "climate",
    responses(
        (status = 200, description = "All stations", body = [Station]),
        (status = 500, description = "Storage failure")
    )
)]
#[instrument(skip(state))]
async fn get_stations(State(state): State<AppState>) -> Result<Json<Vec<Station>>, StatusCode> {
    debug!("Fetching stations");
    let stations = state.climate_service.all_stations().await.map_err(|e| {
        error!("Failed to fetch stations: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    info!("Retrieved {} stations", stations.len());
    Ok(Json(stations))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/temperature/daily-mean",
    tag = "climate",
    responses(
        (status = 200, description = "Mean temperature keyed by date", body = DailySeries),
        (status = 500, description = "Storage failure")
    )
)]
#[instrument(skip(state))]
async fn get_daily_mean_temperature(
    State(state): State<AppState>,
) -> Result<Json<DailySeries>, StatusCode> {
    debug!("Fetching daily mean temperatures");
    let means = state
        .climate_service
        .mean_temperature_last_year()
        .await
        .map_err(|e| {
            error!("Failed to compute daily mean temperatures: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    info!("Retrieved mean temperatures for {} dates", means.len());
    Ok(Json(means))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/temperature/stats",
    tag = "climate",
    params(StatsQuery),
    responses(
        (status = 200, description = "Temperature statistics, null when no data", body = TemperatureStats),
        (status = 400, description = "Missing or malformed date"),
        (status = 500, description = "Storage failure")
    )
)]
#[instrument(skip(state))]
async fn get_temperature_stats(
    State(state): State<AppState>,
    Query(params): Query<StatsQuery>,
) -> Result<Json<TemperatureStats>, StatusCode> {
    stats_for_range(&state, &params.start, params.end.as_deref()).await
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    tag = "climate",
    params(("start" = String, Path, description = "First date included, YYYY-MM-DD")),
    responses(
        (status = 200, description = "Temperature statistics, null when no data", body = TemperatureStats),
        (status = 400, description = "Malformed date"),
        (status = 500, description = "Storage failure")
    )
)]
#[instrument(skip(state), fields(start = %start))]
async fn get_stats_from(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureStats>, StatusCode> {
    stats_for_range(&state, &start, None).await
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    tag = "climate",
    params(
        ("start" = String, Path, description = "First date included, YYYY-MM-DD"),
        ("end" = String, Path, description = "Last date included, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Temperature statistics, null when no data", body = TemperatureStats),
        (status = 400, description = "Malformed date"),
        (status = 500, description = "Storage failure")
    )
)]
#[instrument(skip(state), fields(start = %start, end = %end))]
async fn get_stats_between(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureStats>, StatusCode> {
    stats_for_range(&state, &start, Some(&end)).await
}

async fn stats_for_range(
    state: &AppState,
    start: &str,
    end: Option<&str>,
) -> Result<Json<TemperatureStats>, StatusCode> {
    debug!("Fetching temperature stats from {} to {:?}", start, end);
    let stats = state
        .climate_service
        .temperature_stats(start, end)
        .await
        .map_err(|e| match &e {
            ServiceError::InvalidDate(_) => {
                warn!("Rejected temperature stats request: {}", e);
                StatusCode::BAD_REQUEST
            }
            ServiceError::Db(_) => {
                error!("Failed to compute temperature stats from {} to {:?}: {}", start, end, e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })?;

    if stats.is_empty() {
        info!("No temperature observations from {} to {:?}", start, end);
    } else {
        info!(
            "Temperature stats from {} to {:?}: min {:?}, max {:?}, avg {:?}",
            start, end, stats.minimum, stats.maximum, stats.average
        );
    }
    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/dataset",
    tag = "climate",
    responses(
        (status = 200, description = "Dataset date span and station count", body = DatasetSummary),
        (status = 500, description = "Storage failure")
    )
)]
#[instrument(skip(state))]
async fn get_dataset_summary(
    State(state): State<AppState>,
) -> Result<Json<DatasetSummary>, StatusCode> {
    let summary = state.climate_service.dataset_summary().await.map_err(|e| {
        error!("Failed to summarize dataset: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    info!(
        "Dataset spans {:?} to {:?} across {} stations",
        summary.earliest_date, summary.latest_date, summary.station_count
    );
    Ok(Json(summary))
}
