//! Plain-text presentation of a dashboard snapshot.

use std::fmt::Write;

use weatherboard_core::{Snapshot, icon_url};

pub fn render(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    write_snapshot(&mut out, snapshot).expect("writing to a String cannot fail");
    out
}

fn write_snapshot(out: &mut String, snap: &Snapshot) -> std::fmt::Result {
    if snap.loading {
        writeln!(out, "Loading...")?;
    }
    if let Some(err) = &snap.error {
        writeln!(out, "Error: {err}")?;
    }
    if let Some(coordinate) = &snap.coordinate {
        writeln!(out, "Coordinates: {coordinate}")?;
    }

    if let Some(current) = &snap.current {
        writeln!(out)?;
        writeln!(out, "{}", current.place_name)?;
        writeln!(out, "  {} ({})", current.description, icon_url(&current.icon_id))?;
        writeln!(out, "  Temperature: {:.1} °C", current.temperature_c)?;
        writeln!(out, "  Humidity: {}%", current.humidity_pct)?;
        writeln!(out, "  Wind Speed: {} m/s", current.wind_speed_mps)?;
    }

    if !snap.hourly.is_empty() {
        writeln!(out)?;
        writeln!(out, "Hourly")?;
        for hour in &snap.hourly {
            writeln!(
                out,
                "  {}  {:>5.1} °C  {}",
                hour.timestamp.format("%H:%M"),
                hour.temperature_c,
                hour.description
            )?;
        }
    }

    if !snap.daily.is_empty() {
        writeln!(out)?;
        writeln!(out, "Forecast")?;
        for day in &snap.daily {
            writeln!(
                out,
                "  {}  {:>5.1} °C  {}",
                day.date.format("%a %d %b"),
                day.temperature_c,
                day.description
            )?;
        }
    }

    if !snap.nearby.is_empty() {
        writeln!(out)?;
        writeln!(out, "Nearby")?;
        for city in &snap.nearby {
            writeln!(out, "  {:<20} {:>5.1} °C  {}", city.name, city.temperature_c, city.description)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use weatherboard_core::{
        Coordinate, CurrentConditions, DailySummary, ErrorKind, ForecastSample, NearbyCity,
        SessionError,
    };

    fn full_snapshot() -> Snapshot {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("date");
        Snapshot {
            query: "Paris".into(),
            coordinate: Some(Coordinate::new(48.8566, 2.3522)),
            current: Some(CurrentConditions {
                place_name: "Paris".into(),
                description: "clear sky".into(),
                icon_id: "01d".into(),
                temperature_c: 21.46,
                humidity_pct: 40,
                wind_speed_mps: 3.6,
                coordinate: None,
                observed_at: Utc::now(),
            }),
            daily: vec![DailySummary {
                date,
                temperature_c: 10.0,
                description: "light rain".into(),
                icon_id: "10d".into(),
            }],
            hourly: vec![ForecastSample {
                timestamp: date.and_hms_opt(9, 0, 0).expect("time"),
                temperature_c: 10.0,
                description: "light rain".into(),
                icon_id: "10d".into(),
            }],
            nearby: vec![NearbyCity {
                name: "Lyon".into(),
                description: "mist".into(),
                icon_id: "50d".into(),
                temperature_c: 15.0,
            }],
            error: None,
            loading: false,
        }
    }

    #[test]
    fn renders_every_panel() {
        let out = render(&full_snapshot());

        assert!(out.contains("Coordinates: Lat 48.86, Lon 2.35"));
        assert!(out.contains("Temperature: 21.5 °C"));
        assert!(out.contains("Humidity: 40%"));
        assert!(out.contains("https://openweathermap.org/img/wn/01d.png"));
        assert!(out.contains("09:00"));
        assert!(out.contains("Mon 01 Jan"));
        assert!(out.contains("Lyon"));
        assert!(!out.contains("Error"));
    }

    #[test]
    fn renders_error_without_panels() {
        let snap = Snapshot {
            error: Some(SessionError {
                kind: ErrorKind::NotFound,
                message: "City not found or invalid API key.".into(),
            }),
            ..Snapshot::default()
        };

        let out = render(&snap);

        assert_eq!(out, "Error: City not found or invalid API key.\n");
    }

    #[test]
    fn renders_loading_state() {
        let snap = Snapshot { loading: true, ..Snapshot::default() };
        assert_eq!(render(&snap), "Loading...\n");
    }
}
