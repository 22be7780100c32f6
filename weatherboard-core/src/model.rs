use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::QueryError;

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lat {:.2}, Lon {:.2}", self.latitude, self.longitude)
    }
}

/// How a query addresses its target: coordinates, or a place name the
/// provider resolves itself.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    Coordinates(Coordinate),
    Name(String),
}

impl LocationQuery {
    /// Build a name query. Blank input is rejected before any request is made.
    pub fn name(query: &str) -> Result<Self, QueryError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(QueryError::InvalidQuery);
        }
        Ok(Self::Name(trimmed.to_string()))
    }

    pub fn is_by_name(&self) -> bool {
        matches!(self, Self::Name(_))
    }

    /// Provider query parameters that address this location.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Coordinates(c) => vec![
                ("lat", c.latitude.to_string()),
                ("lon", c.longitude.to_string()),
            ],
            Self::Name(name) => vec![("q", name.clone())],
        }
    }
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Coordinates(c) => write!(f, "{c}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub place_name: String,
    pub description: String,
    pub icon_id: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub coordinate: Option<Coordinate>,
    pub observed_at: DateTime<Utc>,
}

/// One raw point of the provider's 3-hour forecast series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: NaiveDateTime,
    pub temperature_c: f64,
    pub description: String,
    pub icon_id: String,
}

/// Representative sample for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub temperature_c: f64,
    pub description: String,
    pub icon_id: String,
}

pub type HourlySummary = ForecastSample;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyCity {
    pub name: String,
    pub description: String,
    pub icon_id: String,
    pub temperature_c: f64,
}

/// Everything one successful query cycle produced, before it is merged into
/// the session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeatherReport {
    pub current: Option<CurrentConditions>,
    pub daily: Vec<DailySummary>,
    pub hourly: Vec<HourlySummary>,
    pub nearby: Vec<NearbyCity>,
}

/// Static image asset for an opaque provider icon id.
pub fn icon_url(icon_id: &str) -> String {
    format!("{ICON_BASE_URL}/{icon_id}.png")
}
