use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use inquire::{Confirm, CustomType, Password, PasswordDisplayMode};
use tracing::{debug, warn};
use weatherboard_core::{
    Config, Coordinate, Dashboard, Features, StaticGeolocator, WeatherService,
    provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherboard", version, about = "Weather dashboard CLI")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` overrides it.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key, home coordinates and panel toggles.
    Configure,

    /// Show the dashboard for a place, or for your location when no place is given.
    Show {
        /// City or place name.
        address: Option<String>,

        /// Latitude for the location flow; defaults to the configured home.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude for the location flow.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Current conditions only, no forecast or nearby cities.
        #[arg(long)]
        basic: bool,

        /// How many nearby locations to request.
        #[arg(long)]
        nearby: Option<u8>,

        /// Print the snapshot as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the location of the config file.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { address, lat, lon, basic, nearby, json } => {
                let home = lat.zip(lon).map(|(lat, lon)| Coordinate::new(lat, lon));
                show(ShowArgs { address, home, basic, nearby, json }).await
            }
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

struct ShowArgs {
    address: Option<String>,
    home: Option<Coordinate>,
    basic: bool,
    nearby: Option<u8>,
    json: bool,
}

async fn show(args: ShowArgs) -> anyhow::Result<ExitCode> {
    let config = Config::load()?.with_env_overrides(|k| std::env::var(k).ok());
    debug!(base_url = config.base_url(), nearby_count = config.nearby_count, "config loaded");

    let features = if args.basic { Features::basic() } else { config.features };
    let provider = provider_from_config(&config)?;
    let service = WeatherService::new(provider, features)
        .with_nearby_count(args.nearby.unwrap_or(config.nearby_count));
    debug!(features = ?service.features(), "querying provider");
    let dashboard = Dashboard::new(service);

    let snapshot = match args.address {
        Some(address) => dashboard.submit(&address).await,
        None => {
            let home = args.home.or(config.home);
            if home.is_none() {
                warn!("no coordinates given and no [home] configured");
            }
            let geolocator = StaticGeolocator::new(home);
            dashboard.locate(&geolocator).await
        }
    };

    if args.json {
        let out =
            serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot")?;
        println!("{out}");
    } else {
        print!("{}", render::render(&snapshot));
    }

    Ok(if snapshot.error.is_some() { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_string());
    }

    let set_home = Confirm::new("Set home coordinates for the location flow?")
        .with_default(config.home.is_some())
        .prompt()?;
    config.home = if set_home {
        let latitude = CustomType::<f64>::new("Latitude:")
            .with_error_message("Please enter a number")
            .prompt()?;
        let longitude = CustomType::<f64>::new("Longitude:")
            .with_error_message("Please enter a number")
            .prompt()?;
        Some(Coordinate::new(latitude, longitude))
    } else {
        None
    };

    config.features = Features {
        forecast: Confirm::new("Show the forecast panels?")
            .with_default(config.features.forecast)
            .prompt()?,
        nearby: Confirm::new("Show nearby cities?").with_default(config.features.nearby).prompt()?,
    };

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}
