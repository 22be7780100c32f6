//! Core library for the `weatherboard` dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap client behind the `WeatherProvider` trait
//! - Forecast aggregation and the nearby-city filter
//! - Session state and the snapshot handed to presentation
//!
//! It is used by `weatherboard-cli`, but can also be reused by other front ends.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod location;
pub mod model;
pub mod nearby;
pub mod provider;
pub mod service;
pub mod session;

pub use config::Config;
pub use dashboard::Dashboard;
pub use error::{ErrorKind, QueryError, SessionError};
pub use location::{Geolocator, LocationError, StaticGeolocator};
pub use model::{
    Coordinate, CurrentConditions, DailySummary, ForecastSample, HourlySummary, LocationQuery,
    NearbyCity, WeatherReport, icon_url,
};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use service::{Features, WeatherService};
pub use session::{Session, Snapshot};
