use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    QueryError,
    config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS},
    model::{Coordinate, CurrentConditions, ForecastSample, LocationQuery, NearbyCity},
};

use super::WeatherProvider;

const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

#[derive(Debug, Clone)]
pub struct OpenWeatherProviderBuilder {
    api_key: String,
    base_url: String,
    timeout_secs: u64,
}

impl OpenWeatherProviderBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// `0` disables the timeout.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn build(self) -> anyhow::Result<OpenWeatherProvider> {
        let mut http = Client::builder();
        if self.timeout_secs > 0 {
            http = http.timeout(Duration::from_secs(self.timeout_secs));
        }
        let http = http.build().context("Failed to build HTTP client")?;

        Ok(OpenWeatherProvider { api_key: self.api_key, base_url: self.base_url, http })
    }
}

impl OpenWeatherProvider {
    pub fn builder(api_key: String) -> OpenWeatherProviderBuilder {
        OpenWeatherProviderBuilder {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(level = "debug", skip(self, location, extra), fields(location = %location))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        location: &LocationQuery,
        extra: &[(&'static str, String)],
    ) -> Result<T, QueryError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let mut params = location.query_params();
        params.extend_from_slice(extra);
        params.push(("appid", self.api_key.clone()));
        params.push(("units", "metric".to_string()));

        let res = self.http.get(&url).query(&params).send().await?;

        let status = res.status();
        let body = res.text().await?;
        debug!(%status, bytes = body.len(), "OpenWeather response");

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, location: &LocationQuery) -> Result<CurrentConditions, QueryError> {
        let parsed: OwCurrentResponse = self.get_json("weather", location, &[]).await?;

        let observed_at = unix_to_utc(parsed.dt).ok_or_else(|| {
            QueryError::Parse(serde::de::Error::custom(format!(
                "invalid observation time (dt={})",
                parsed.dt
            )))
        })?;

        let (description, icon_id) = first_condition(&parsed.weather);

        Ok(CurrentConditions {
            place_name: parsed.name,
            description,
            icon_id,
            temperature_c: parsed.main.temp,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            coordinate: parsed.coord.map(|c| Coordinate::new(c.lat, c.lon)),
            observed_at,
        })
    }

    async fn forecast(&self, location: &LocationQuery) -> Result<Vec<ForecastSample>, QueryError> {
        let parsed: OwForecastResponse = self.get_json("forecast", location, &[]).await?;

        parsed
            .list
            .into_iter()
            .map(|entry| -> Result<ForecastSample, QueryError> {
                let timestamp = entry.timestamp()?;
                let (description, icon_id) = first_condition(&entry.weather);
                Ok(ForecastSample { timestamp, temperature_c: entry.main.temp, description, icon_id })
            })
            .collect()
    }

    async fn nearby(
        &self,
        location: &LocationQuery,
        count: u8,
    ) -> Result<Vec<NearbyCity>, QueryError> {
        let parsed: OwFindResponse =
            self.get_json("find", location, &[("cnt", count.to_string())]).await?;

        Ok(parsed
            .list
            .into_iter()
            .take(usize::from(count))
            .map(|entry| {
                let (description, icon_id) = first_condition(&entry.weather);
                NearbyCity { name: entry.name, description, icon_id, temperature_c: entry.main.temp }
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    coord: Option<OwCoord>,
    main: OwCurrentMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    dt_txt: Option<String>,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

impl OwForecastEntry {
    /// The provider's `dt_txt` verbatim; the unix `dt` read as UTC when absent.
    fn timestamp(&self) -> Result<NaiveDateTime, QueryError> {
        let parsed = match &self.dt_txt {
            Some(txt) => NaiveDateTime::parse_from_str(txt, DT_TXT_FORMAT).ok(),
            None => unix_to_utc(self.dt).map(|dt| dt.naive_utc()),
        };
        parsed.ok_or_else(|| {
            QueryError::Parse(serde::de::Error::custom(format!(
                "invalid forecast timestamp (dt={}, dt_txt={:?})",
                self.dt, self.dt_txt
            )))
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwFindEntry {
    name: String,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwFindResponse {
    #[serde(default)]
    list: Vec<OwFindEntry>,
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

fn first_condition(weather: &[OwWeather]) -> (String, String) {
    weather
        .first()
        .map(|w| (w.description.clone(), w.icon.clone()))
        .unwrap_or_else(|| ("Unknown".to_string(), String::new()))
}

fn status_error(status: StatusCode, body: &str) -> QueryError {
    let message = serde_json::from_str::<OwErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| truncate_body(body));

    match status {
        StatusCode::NOT_FOUND => QueryError::NotFound(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => QueryError::Credential(message),
        StatusCode::TOO_MANY_REQUESTS => QueryError::RateLimited,
        _ => QueryError::Status { status: status.as_u16(), body: message },
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
