//! Session state and the immutable snapshot handed to presentation.

use serde::Serialize;
use tracing::debug;

use crate::{
    QueryError,
    error::SessionError,
    location::LocationError,
    model::{
        Coordinate, CurrentConditions, DailySummary, HourlySummary, LocationQuery, NearbyCity,
        WeatherReport,
    },
};

/// Everything presentation needs for one query cycle.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Snapshot {
    pub query: String,
    pub coordinate: Option<Coordinate>,
    pub current: Option<CurrentConditions>,
    pub daily: Vec<DailySummary>,
    pub hourly: Vec<HourlySummary>,
    pub nearby: Vec<NearbyCity>,
    pub error: Option<SessionError>,
    pub loading: bool,
}

impl Snapshot {
    pub fn has_results(&self) -> bool {
        self.current.is_some()
            || !self.daily.is_empty()
            || !self.hourly.is_empty()
            || !self.nearby.is_empty()
    }
}

/// Identifies one query cycle. Only the most recently started cycle may
/// write results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cycle(u64);

#[derive(Debug, Default)]
pub struct Session {
    snapshot: Snapshot,
    cycle: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn current_cycle(&self) -> Cycle {
        Cycle(self.cycle)
    }

    /// Start a cycle: every result field and the error are cleared and the
    /// session goes into loading. The coordinate survives, it is resolved
    /// once per session.
    pub fn begin(&mut self, query: impl Into<String>) -> Cycle {
        self.cycle += 1;
        self.snapshot = Snapshot {
            query: query.into(),
            coordinate: self.snapshot.coordinate,
            loading: true,
            ..Snapshot::default()
        };
        Cycle(self.cycle)
    }

    /// Record the resolved coordinate. Not tied to a cycle: a newer cycle
    /// only supersedes results, never the coordinate itself.
    pub fn record_coordinate(&mut self, coordinate: Coordinate) {
        self.snapshot.coordinate = Some(coordinate);
    }

    /// Finish a query cycle. Returns `false` when a newer cycle has started
    /// since, in which case nothing changes.
    pub fn complete(
        &mut self,
        cycle: Cycle,
        location: &LocationQuery,
        result: Result<WeatherReport, QueryError>,
    ) -> bool {
        if !self.is_live(cycle) {
            return false;
        }

        let next = match result {
            Ok(report) => Snapshot {
                current: report.current,
                daily: report.daily,
                hourly: report.hourly,
                nearby: report.nearby,
                ..self.cleared()
            },
            Err(err) => Snapshot {
                error: Some(SessionError::from_query(&err, location.is_by_name())),
                ..self.cleared()
            },
        };
        self.snapshot = next;
        true
    }

    /// Terminal outcome of the geolocation path.
    pub fn fail_location(&mut self, cycle: Cycle, err: &LocationError) -> bool {
        if !self.is_live(cycle) {
            return false;
        }
        self.snapshot = Snapshot { error: Some(SessionError::from_location(err)), ..self.cleared() };
        true
    }

    fn is_live(&self, cycle: Cycle) -> bool {
        let live = cycle.0 == self.cycle;
        if !live {
            debug!(stale = cycle.0, current = self.cycle, "dropping result of superseded cycle");
        }
        live
    }

    /// Query text and coordinate kept, everything else empty and not loading.
    fn cleared(&self) -> Snapshot {
        Snapshot {
            query: self.snapshot.query.clone(),
            coordinate: self.snapshot.coordinate,
            ..Snapshot::default()
        }
    }
}
