//! Geolocation capability.
//!
//! A terminal has no position sensor, so coordinates are injected: from the
//! `[home]` table of the config file or from command-line flags.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::model::Coordinate;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("Geolocation is not available")]
    Unavailable,
    #[error("Geolocation permission denied")]
    PermissionDenied,
    #[error("Geolocation error: {0}")]
    Other(String),
}

#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinate, LocationError>;
}

/// Yields a fixed coordinate, or `Unavailable` when none was supplied.
#[derive(Debug, Clone, Default)]
pub struct StaticGeolocator {
    coordinate: Option<Coordinate>,
}

impl StaticGeolocator {
    pub fn new(coordinate: Option<Coordinate>) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl Geolocator for StaticGeolocator {
    async fn locate(&self) -> Result<Coordinate, LocationError> {
        self.coordinate.ok_or(LocationError::Unavailable)
    }
}

/// A capability that is never present.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

#[async_trait]
impl Geolocator for Unavailable {
    async fn locate(&self) -> Result<Coordinate, LocationError> {
        Err(LocationError::Unavailable)
    }
}
