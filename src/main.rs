use tracing::{info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use climate_api::app::Application;
use climate_api::config::Config;
use climate_api::db;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with environment filter support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,climate_api=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env();
    info!("Starting climate API with config: {:?}", config);

    let pool = db::connect(&config.database_url, config.database_max_connections).await?;

    if config.run_migrations {
        db::run_migrations(&pool).await?;
    }

    let app = Application::build(config, pool).await?;
    app.run_until_stopped().await
}
