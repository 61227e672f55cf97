//! CLI argument parsing for the truckplan binary.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "truckplan", about = "Truck trip planner with HOS duty scheduling")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Plan a full trip: geocode addresses, route, and compute the duty schedule
    Plan {
        /// Driver's current location (free-text address)
        #[arg(long)]
        current: String,
        /// Pickup location
        #[arg(long)]
        pickup: String,
        /// Dropoff location
        #[arg(long)]
        dropoff: String,
        /// Hours already used in the 70-hour duty cycle
        #[arg(long, default_value_t = 0.0)]
        cycle_used: f64,
    },
    /// Compute a duty schedule for known route figures, no network needed
    Schedule {
        /// Route distance in miles
        #[arg(long)]
        distance: f64,
        /// Route duration in hours
        #[arg(long)]
        duration: f64,
        /// Hours already used in the 70-hour duty cycle
        #[arg(long, default_value_t = 0.0)]
        cycle_used: f64,
    },
}
