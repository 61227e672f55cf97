//! Truckplan - trip planning backend with HOS duty scheduling
//!
//! Geocodes the trip's addresses, resolves the route, and computes an
//! Hours-of-Service compliant duty schedule from pickup to dropoff.

mod cli;
mod config;
mod services;
mod types;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::services::geocoding::create_geocoder;
use crate::services::hos::HosScheduler;
use crate::services::planner::TripPlanner;
use crate::services::routing::{create_routing_service, fuel_stops};
use crate::types::TripRequest;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs directory - use LOGS_DIR env var or default to ./logs
    let logs_dir = std::env::var("LOGS_DIR").unwrap_or_else(|_| "./logs".to_string());
    std::fs::create_dir_all(&logs_dir).ok();

    // File appender for persistent logs (daily rotation)
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &logs_dir, "truckplan.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Initialize logging - stderr and file (stdout carries the JSON result)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,truckplan=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    let config = config::Config::from_env()?;
    let cli = cli::Cli::parse();

    match cli.command {
        cli::Command::Plan { current, pickup, dropoff, cycle_used } => {
            let geocoder: Arc<_> = create_geocoder(
                &config.geocoder_backend,
                &config.nominatim_url,
                config.http_timeout_seconds,
            )
            .into();
            let router: Arc<_> =
                create_routing_service(config.osrm_url.as_deref(), config.http_timeout_seconds)
                    .into();

            let planner = TripPlanner::new(geocoder, router);
            let request = TripRequest {
                current_location: current,
                pickup_location: pickup,
                dropoff_location: dropoff,
                current_cycle_used: cycle_used,
            };

            let plan = planner.plan(&request).await?;
            info!(
                segments = plan.segments.len(),
                stops = plan.stops.len(),
                "trip planned"
            );
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        cli::Command::Schedule { distance, duration, cycle_used } => {
            let stops = fuel_stops(distance);
            let scheduler = HosScheduler::new(cycle_used);
            let segments = scheduler.calculate_trip_schedule(distance, duration, &stops);

            info!(
                segments = segments.len(),
                available_hours = scheduler.available_hours(),
                "schedule computed"
            );
            println!("{}", serde_json::to_string_pretty(&segments)?);
        }
    }

    Ok(())
}
