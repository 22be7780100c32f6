//! The coordinating flow: owns the one session and runs the geolocation and
//! manual query paths against it.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

use crate::{
    location::Geolocator,
    model::LocationQuery,
    provider::WeatherProvider,
    service::WeatherService,
    session::{Session, Snapshot},
};

#[derive(Debug)]
pub struct Dashboard<P> {
    service: WeatherService<P>,
    session: Mutex<Session>,
    located: AtomicBool,
}

impl<P: WeatherProvider> Dashboard<P> {
    pub fn new(service: WeatherService<P>) -> Self {
        Self { service, session: Mutex::new(Session::new()), located: AtomicBool::new(false) }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.session.lock().snapshot().clone()
    }

    /// Automatic flow: resolve coordinates once, then query by them.
    ///
    /// Only the first call does anything; later calls return the current
    /// snapshot. Failure ends up in the snapshot's error, never as a return.
    pub async fn locate(&self, geolocator: &dyn Geolocator) -> Snapshot {
        if self.located.swap(true, Ordering::SeqCst) {
            return self.snapshot();
        }

        let cycle = self.session.lock().begin("");

        let coordinate = match geolocator.locate().await {
            Ok(coordinate) => coordinate,
            Err(err) => {
                warn!(error = %err, "geolocation failed");
                self.session.lock().fail_location(cycle, &err);
                return self.snapshot();
            }
        };

        info!(%coordinate, "resolved location");
        {
            let mut session = self.session.lock();
            session.record_coordinate(coordinate);
            if session.current_cycle() != cycle {
                // A manual query took over; its results stand.
                return session.snapshot().clone();
            }
        }

        let location = LocationQuery::Coordinates(coordinate);
        let result = self.service.fetch(&location).await;
        self.session.lock().complete(cycle, &location, result);

        self.snapshot()
    }

    /// Manual flow: query by a user-entered place name.
    pub async fn submit(&self, query: &str) -> Snapshot {
        let cycle = self.session.lock().begin(query.trim());

        let location = match LocationQuery::name(query) {
            Ok(location) => location,
            Err(err) => {
                let raw = LocationQuery::Name(query.to_string());
                self.session.lock().complete(cycle, &raw, Err(err));
                return self.snapshot();
            }
        };

        let result = self.service.fetch(&location).await;
        self.session.lock().complete(cycle, &location, result);

        self.snapshot()
    }
}
