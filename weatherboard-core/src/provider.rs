use crate::{
    Config, QueryError,
    model::{CurrentConditions, ForecastSample, LocationQuery, NearbyCity},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// The three independent reads the dashboard needs, all keyed on the same
/// location.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, location: &LocationQuery) -> Result<CurrentConditions, QueryError>;

    /// Raw forecast series in provider order.
    async fn forecast(&self, location: &LocationQuery) -> Result<Vec<ForecastSample>, QueryError>;

    async fn nearby(
        &self,
        location: &LocationQuery,
        count: u8,
    ) -> Result<Vec<NearbyCity>, QueryError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.require_api_key()?;
    OpenWeatherProvider::builder(api_key.to_owned())
        .base_url(config.base_url())
        .timeout_secs(config.timeout_secs)
        .build()
}
