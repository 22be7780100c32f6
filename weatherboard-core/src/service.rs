//! One weather client for both dashboard variants, switched by [`Features`].

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    QueryError,
    forecast::{daily_summaries, hourly_summaries},
    model::{
        Coordinate, CurrentConditions, ForecastSample, LocationQuery, NearbyCity, WeatherReport,
    },
    nearby::{DEFAULT_NEARBY_COUNT, exclude_location},
    provider::WeatherProvider,
};

/// Which optional panels a query fills in. Current conditions are always fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    pub forecast: bool,
    pub nearby: bool,
}

impl Features {
    pub const fn full() -> Self {
        Self { forecast: true, nearby: true }
    }

    /// Current conditions only.
    pub const fn basic() -> Self {
        Self { forecast: false, nearby: false }
    }
}

impl Default for Features {
    fn default() -> Self {
        Self::full()
    }
}

#[derive(Debug)]
pub struct WeatherService<P> {
    provider: P,
    features: Features,
    nearby_count: u8,
}

impl<P: WeatherProvider> WeatherService<P> {
    pub fn new(provider: P, features: Features) -> Self {
        Self { provider, features, nearby_count: DEFAULT_NEARBY_COUNT }
    }

    pub fn with_nearby_count(mut self, count: u8) -> Self {
        self.nearby_count = count;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn features(&self) -> Features {
        self.features
    }

    pub async fn by_coordinates(&self, lat: f64, lon: f64) -> Result<WeatherReport, QueryError> {
        self.fetch(&LocationQuery::Coordinates(Coordinate::new(lat, lon))).await
    }

    pub async fn by_name(&self, query: &str) -> Result<WeatherReport, QueryError> {
        self.fetch(&LocationQuery::name(query)?).await
    }

    /// Issue the enabled calls concurrently and assemble the report.
    ///
    /// Current conditions and forecast are required: either failing fails the
    /// whole query. The nearby list is best-effort and degrades to empty.
    pub async fn fetch(&self, location: &LocationQuery) -> Result<WeatherReport, QueryError> {
        let (current, forecast, nearby) = tokio::join!(
            self.provider.current(location),
            async {
                if self.features.forecast {
                    self.provider.forecast(location).await
                } else {
                    Ok(Vec::new())
                }
            },
            async {
                if self.features.nearby {
                    self.provider.nearby(location, self.nearby_count).await
                } else {
                    Ok(Vec::new())
                }
            },
        );

        let current = current?;
        let samples = forecast?;
        let nearby = match nearby {
            Ok(candidates) => exclude_location(candidates, &current.place_name),
            Err(err) => {
                warn!(%location, error = %err, "nearby lookup failed, continuing without it");
                Vec::new()
            }
        };

        info!(
            %location,
            place = %current.place_name,
            samples = samples.len(),
            nearby = nearby.len(),
            "weather query succeeded"
        );

        Ok(assemble(current, &samples, nearby))
    }
}

fn assemble(
    current: CurrentConditions,
    samples: &[ForecastSample],
    nearby: Vec<NearbyCity>,
) -> WeatherReport {
    WeatherReport {
        current: Some(current),
        daily: daily_summaries(samples),
        hourly: hourly_summaries(samples),
        nearby,
    }
}
