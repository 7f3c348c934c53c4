use skygaze_backend::config;
use skygaze_backend::logging;
use skygaze_backend::module::catalog::PositionTable;
use skygaze_backend::module::sky::SkyManager;
use skygaze_backend::module::timing::TimingResolver;

use anyhow::Result;
use chrono::Utc;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    config::read_config()?;
    let config = config::CONFIG.get().unwrap();

    // Initialize logging
    let _logging_guard = logging::init_logging("logs", "skygaze-backend", &config.log_level);

    tracing::info!("Skygaze backend starting...");

    // Load the planet position table
    let position_table = match &config.position_table_path {
        Some(path) => match PositionTable::load_from_file(path).await {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!("Failed to load {}: {}, using bundled table", path, e);
                PositionTable::bundled()?
            }
        },
        None => PositionTable::bundled()?,
    };

    let resolver = TimingResolver::with_default_sources()?;
    let manager = SkyManager::new(position_table, resolver);

    let observer = config.observer();
    tracing::info!(
        "Observer at {:.4}, {:.4} (UTC{:+})",
        observer.latitude,
        observer.longitude,
        observer.timezone_offset_hours
    );

    let report = manager.build_report(&observer, Utc::now()).await;

    tracing::info!("Moon illumination: {}%", report.moon_illumination_percent);
    for body in &report.bodies {
        tracing::info!(
            "{:<10} [{}] alt {:>6.1} az {:>6.1}  {}",
            body.name,
            body.status.badge(),
            body.altitude_degrees,
            body.azimuth_degrees,
            body.status_message
        );
    }

    Ok(())
}
