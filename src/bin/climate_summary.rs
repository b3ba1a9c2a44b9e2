use clap::{Parser, Subcommand};

use climate_api::db::{self, MeasurementRepository, StationRepository};
use climate_api::services::ClimateService;

#[derive(Parser)]
#[command(name = "climate-summary")]
#[command(about = "Print climate aggregates from the observation database", long_about = None)]
struct Cli {
    /// Database connection string
    #[arg(long, env, default_value = climate_api::config::DEFAULT_DATABASE_URL)]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every station
    Stations,
    /// Daily precipitation totals for the latest year of data
    Precipitation,
    /// Daily mean temperature for the latest year of data
    Tobs,
    /// Minimum, maximum and average temperature over a date range
    Stats {
        /// First date included (YYYY-MM-DD)
        start: String,
        /// Last date included (YYYY-MM-DD); open-ended when omitted
        end: Option<String>,
    },
    /// Date span and station count
    Dataset,
}

fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| "no data".to_string(), |v| format!("{v:.2}"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let pool = db::connect(&cli.database_url, 1).await?;
    let service = ClimateService::new(
        MeasurementRepository::new(pool.clone()),
        StationRepository::new(pool),
    );

    match cli.command {
        Command::Stations => {
            let stations = service.all_stations().await?;
            println!("{} stations:", stations.len());
            for station in &stations {
                println!(
                    "  {:<12} {:<45} lat {:>9.4} lon {:>10.4} elev {:>7.1}",
                    station.station_id,
                    station.name,
                    station.latitude,
                    station.longitude,
                    station.elevation
                );
            }
        }
        Command::Precipitation => {
            let totals = service.precipitation_last_year().await?;
            println!("Precipitation totals for {} dates:", totals.len());
            for (date, total) in &totals.0 {
                println!("  {date}: {total:.2}");
            }
        }
        Command::Tobs => {
            let means = service.mean_temperature_last_year().await?;
            println!("Mean temperature for {} dates:", means.len());
            for (date, mean) in &means.0 {
                println!("  {date}: {mean:.2}");
            }
        }
        Command::Stats { start, end } => {
            let stats = service.temperature_stats(&start, end.as_deref()).await?;
            match &end {
                Some(end) => println!("Temperature from {start} through {end}:"),
                None => println!("Temperature from {start} onwards:"),
            }
            println!("  minimum: {}", format_value(stats.minimum));
            println!("  maximum: {}", format_value(stats.maximum));
            println!("  average: {}", format_value(stats.average));
        }
        Command::Dataset => {
            let summary = service.dataset_summary().await?;
            println!(
                "Observations from {} to {} across {} stations",
                summary.earliest_date.as_deref().unwrap_or("-"),
                summary.latest_date.as_deref().unwrap_or("-"),
                summary.station_count
            );
        }
    }

    Ok(())
}
