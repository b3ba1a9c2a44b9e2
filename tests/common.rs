#![allow(dead_code)]

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// A fresh in-memory database with the schema applied.
///
/// Every connection to `sqlite::memory:` opens its own database, so the pool
/// is pinned to a single connection that never expires.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    climate_api::db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// (station, date, prcp, tobs)
pub type MeasurementRow<'a> = (&'a str, &'a str, Option<f64>, Option<f64>);

pub async fn insert_measurements(pool: &SqlitePool, rows: &[MeasurementRow<'_>]) {
    for (station, date, prcp, tobs) in rows {
        sqlx::query("INSERT INTO measurements (station, date, prcp, tobs) VALUES (?, ?, ?, ?)")
            .bind(*station)
            .bind(*date)
            .bind(*prcp)
            .bind(*tobs)
            .execute(pool)
            .await
            .expect("Failed to insert measurement");
    }
}

pub async fn insert_station(pool: &SqlitePool, station: &str, name: &str, lat: f64, lon: f64, elevation: f64) {
    sqlx::query(
        "INSERT INTO stations (station, name, latitude, longitude, elevation) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(station)
    .bind(name)
    .bind(lat)
    .bind(lon)
    .bind(elevation)
    .execute(pool)
    .await
    .expect("Failed to insert station");
}

/// The three-record sample used throughout: two stations on 2017-08-22, one on 2017-08-23.
pub async fn insert_sample_dataset(pool: &SqlitePool) {
    insert_station(pool, "USC00519397", "WAIKIKI 717.2, HI US", 21.2716, -157.8168, 3.0).await;
    insert_station(pool, "USC00513117", "KANEOHE 838.1, HI US", 21.4234, -157.8015, 14.6).await;
    insert_measurements(
        pool,
        &[
            ("USC00519397", "2017-08-22", Some(0.5), Some(80.0)),
            ("USC00513117", "2017-08-22", None, Some(78.0)),
            ("USC00519397", "2017-08-23", Some(1.0), Some(82.0)),
        ],
    )
    .await;
}
