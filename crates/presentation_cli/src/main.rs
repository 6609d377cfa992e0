//! routectl
//!
//! Command-line client for the routing engine.

#![allow(clippy::print_stdout)]

mod output;
mod settings;

use std::path::PathBuf;

use anyhow::bail;
use application::ReplyStatus;
use clap::{Parser, Subcommand};
use domain::{AvoidFeature, GeoCoordinate, RouteRequest, TravelMode};
use integration_mapbox::{build_routing_engine, polyline};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// routectl
#[derive(Parser)]
#[command(name = "routectl")]
#[command(author, version, about = "Route planning against the Mapbox Directions API", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Mapbox access token (overrides the configuration file)
    #[arg(long, env = "MAPBOX_ACCESS_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Directions API base URL (overrides the configuration file)
    #[arg(long, env = "MAPBOX_API_URL", global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a route between two or more points
    ///
    /// Example: routectl route --from 52.3731,4.8926 --to 52.3584,4.8811 --mode cycling
    Route {
        /// Origin as LAT,LON
        #[arg(long)]
        from: GeoCoordinate,

        /// Destination as LAT,LON
        #[arg(long)]
        to: GeoCoordinate,

        /// Intermediate waypoint as LAT,LON (repeatable, in travel order)
        #[arg(long)]
        via: Vec<GeoCoordinate>,

        /// Travel mode
        #[arg(short, long, default_value = "driving")]
        mode: TravelMode,

        /// Features to avoid, comma separated (tolls, highways, ferries, ...)
        #[arg(long, value_delimiter = ',')]
        avoid: Vec<AvoidFeature>,

        /// Number of routes to ask for
        #[arg(long, default_value = "1")]
        alternatives: u8,

        /// Instruction language
        #[arg(short, long, default_value = "en")]
        language: String,

        /// Print every maneuver
        #[arg(long)]
        steps: bool,

        /// Print the routes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode an encoded polyline
    ///
    /// Example: routectl decode '_p~iF~ps|U_ulLnnqC_mqNvxq`@' --precision 5
    Decode {
        /// Encoded polyline
        polyline: String,

        /// Decimal places encoded per coordinate
        #[arg(short, long, default_value = "6")]
        precision: u32,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Assemble the request from command-line waypoints and options
fn build_request(
    from: GeoCoordinate,
    to: GeoCoordinate,
    via: Vec<GeoCoordinate>,
    mode: TravelMode,
    avoid: Vec<AvoidFeature>,
    alternatives: u8,
    language: String,
) -> RouteRequest {
    let mut waypoints = Vec::with_capacity(via.len() + 2);
    waypoints.push(from);
    waypoints.extend(via);
    waypoints.push(to);

    avoid.into_iter().fold(
        RouteRequest::new(waypoints)
            .with_travel_mode(mode)
            .with_alternatives(alternatives)
            .with_locale(language),
        RouteRequest::with_avoid,
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Route {
            from,
            to,
            via,
            mode,
            avoid,
            alternatives,
            language,
            steps,
            json,
        } => {
            let config = settings::load(cli.config.as_deref(), cli.token, cli.api_url)?;
            let engine = build_routing_engine(&config)?;
            let request = build_request(from, to, via, mode, avoid, alternatives, language);

            let reply = engine.calculate_route(&request);
            let status = tokio::select! {
                status = reply.wait() => status,
                _ = tokio::signal::ctrl_c() => {
                    info!(reply = %reply.id(), "Interrupted, canceling route request");
                    engine.cancel(&reply);
                    reply.status()
                },
            };

            match status {
                ReplyStatus::Finished(routes) if json => {
                    println!("{}", serde_json::to_string_pretty(&*routes)?);
                },
                ReplyStatus::Finished(routes) => {
                    print!("{}", output::format_routes(&routes, steps));
                },
                ReplyStatus::Error(err) => bail!("Route request failed: {err}"),
                ReplyStatus::Canceled => {
                    println!("Route request canceled");
                    std::process::exit(130);
                },
                ReplyStatus::Pending => bail!("Route request did not complete"),
            }
        },

        Commands::Decode {
            polyline: encoded,
            precision,
        } => {
            let path = polyline::decode(&encoded, precision)?;
            print!("{}", output::format_path(&path));
        },
    }

    Ok(())
}
