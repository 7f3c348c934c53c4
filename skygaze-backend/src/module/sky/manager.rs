///! Sky report manager
///!
///! Pulls the pieces together for one request: catalog coordinates, current
///! alt/az, externally resolved timings with the deterministic local
///! fallback, viewing window and visibility status. Requests share nothing
///! but the immutable catalog and table, so every call works on fresh data.

use chrono::{DateTime, Utc};

use skygaze_common::{BodyReport, ObserverContext, SkyReport, TimingRecord};

use crate::module::astro;
use crate::module::catalog::{PositionSource, PositionTable, StarCatalog};
use crate::module::timing::TimingResolver;

/// Per-request report builder over process-lifetime reference data
pub struct SkyManager {
    stars: StarCatalog,
    planets: PositionTable,
    resolver: TimingResolver,
}

impl SkyManager {
    pub fn new(planets: PositionTable, resolver: TimingResolver) -> Self {
        Self {
            stars: StarCatalog::new(),
            planets,
            resolver,
        }
    }

    /// Build a complete sky report for one observer at one instant
    ///
    /// Never fails: provider outages degrade to the local calculator, and a
    /// circumpolar body simply carries no rise/set.
    pub async fn build_report(&self, observer: &ObserverContext, now: DateTime<Utc>) -> SkyReport {
        let started = std::time::Instant::now();
        let now_local = observer.to_local(now);
        let date = now_local.date_naive();

        let mut entries = Vec::new();
        for name in self.planets.body_names() {
            if let Some(entry) = self.planets.lookup(&name, date) {
                entries.push(entry);
            }
        }
        for name in self.stars.body_names() {
            if let Some(entry) = self.stars.lookup(&name, date) {
                entries.push(entry);
            }
        }

        let body_names: Vec<String> = entries.iter().map(|entry| entry.name.clone()).collect();
        let external = self.resolver.resolve_batch(&body_names, observer, date).await;

        let lst_hours = astro::local_sidereal_hours(observer.longitude, now, None);

        let mut bodies = Vec::with_capacity(entries.len());
        for entry in entries {
            let hour_angle_degrees = (lst_hours - entry.right_ascension_hours) * 15.0;
            let position = astro::altaz(
                entry.declination_degrees,
                observer.latitude,
                hour_angle_degrees,
            );

            let mut timing = external
                .get(&entry.name)
                .copied()
                .unwrap_or_else(TimingRecord::empty);

            if !timing.is_complete() {
                let fallback = astro::compute_timings(
                    entry.right_ascension_hours,
                    entry.declination_degrees,
                    observer,
                    date,
                );
                timing.merge_missing(&fallback);
            }

            let window = astro::best_viewing_window(
                entry.right_ascension_hours,
                entry.declination_degrees,
                observer,
                date,
                timing.transit_time,
            );

            let (status, mut status_message) = astro::classify_visibility(
                &entry.name,
                position.altitude_degrees,
                &timing,
                now_local,
            );

            // A body with no crossings at all is circumpolar; when it is the
            // always-up kind, say so instead of the generic message
            if timing.rise_time.is_none()
                && timing.set_time.is_none()
                && status == skygaze_common::VisibilityStatus::Visible
                && astro::is_always_above_horizon(entry.declination_degrees, observer.latitude)
            {
                status_message = format!("{} is circumpolar and never sets", entry.name);
            }

            bodies.push(BodyReport {
                name: entry.name,
                kind: entry.kind,
                right_ascension_hours: entry.right_ascension_hours,
                declination_degrees: entry.declination_degrees,
                altitude_degrees: position.altitude_degrees,
                azimuth_degrees: position.azimuth_degrees,
                magnitude: entry.magnitude,
                distance: entry.distance,
                distance_unit: entry.distance_unit.to_string(),
                rise_time: timing.rise_time,
                set_time: timing.set_time,
                transit_time: timing.transit_time,
                best_viewing_start: window.map(|w| w.start_time),
                best_viewing_end: window.map(|w| w.end_time),
                status,
                status_message,
            });
        }

        let visible = bodies
            .iter()
            .filter(|body| body.status == skygaze_common::VisibilityStatus::Visible)
            .count();
        tracing::info!(
            "Built sky report: {} bodies, {} visible, in {:.0} ms",
            bodies.len(),
            visible,
            started.elapsed().as_secs_f64() * 1000.0
        );

        SkyReport {
            generated_at: now,
            observer: *observer,
            bodies,
            moon_illumination_percent: astro::moon_illumination_percent(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn offline_manager() -> SkyManager {
        // No external sources: everything falls back to the local calculator
        SkyManager::new(PositionTable::bundled().unwrap(), TimingResolver::new(Vec::new()))
    }

    fn new_york() -> ObserverContext {
        ObserverContext::new(40.7, -74.0)
    }

    #[tokio::test]
    async fn test_report_covers_planets_and_stars() {
        let manager = offline_manager();
        let now = Utc.with_ymd_and_hms(2026, 1, 16, 3, 0, 0).unwrap();
        let report = manager.build_report(&new_york(), now).await;

        let names: Vec<&str> = report.bodies.iter().map(|b| b.name.as_str()).collect();
        for expected in ["Mars", "Jupiter", "Saturn", "Sirius", "Polaris"] {
            assert!(names.contains(&expected), "missing {}", expected);
        }
    }

    #[tokio::test]
    async fn test_every_body_has_a_transit() {
        // The deterministic fallback guarantees a transit for every body
        let manager = offline_manager();
        let now = Utc.with_ymd_and_hms(2026, 1, 16, 3, 0, 0).unwrap();
        let report = manager.build_report(&new_york(), now).await;

        assert!(!report.bodies.is_empty());
        for body in &report.bodies {
            assert!(body.transit_time.is_some(), "{} lost its transit", body.name);
        }
    }

    #[tokio::test]
    async fn test_circumpolar_star_has_no_rise_or_set() {
        let manager = offline_manager();
        let now = Utc.with_ymd_and_hms(2026, 1, 16, 3, 0, 0).unwrap();
        let report = manager.build_report(&new_york(), now).await;

        let polaris = report.bodies.iter().find(|b| b.name == "Polaris").unwrap();
        assert!(polaris.rise_time.is_none());
        assert!(polaris.set_time.is_none());
        assert!(polaris.transit_time.is_some());
        assert!((polaris.altitude_degrees - 40.7).abs() < 1.0);
    }

    #[tokio::test]
    async fn test_circumpolar_star_message_at_night() {
        let manager = offline_manager();
        // 03:00 UTC is 22:00 the previous evening in New York
        let now = Utc.with_ymd_and_hms(2026, 1, 16, 3, 0, 0).unwrap();
        let report = manager.build_report(&new_york(), now).await;

        let polaris = report.bodies.iter().find(|b| b.name == "Polaris").unwrap();
        assert_eq!(polaris.status, skygaze_common::VisibilityStatus::Visible);
        assert!(polaris.status_message.contains("never sets"));
    }

    #[tokio::test]
    async fn test_report_is_deterministic() {
        let manager = offline_manager();
        let now = Utc.with_ymd_and_hms(2026, 6, 10, 22, 30, 0).unwrap();

        let first = manager.build_report(&new_york(), now).await;
        let second = manager.build_report(&new_york(), now).await;

        assert_eq!(first.bodies.len(), second.bodies.len());
        for (a, b) in first.bodies.iter().zip(second.bodies.iter()) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.altitude_degrees, b.altitude_degrees);
            assert_eq!(a.rise_time, b.rise_time);
            assert_eq!(a.status, b.status);
        }
    }

    #[tokio::test]
    async fn test_moon_illumination_in_range() {
        let manager = offline_manager();
        let now = Utc.with_ymd_and_hms(2026, 3, 3, 1, 0, 0).unwrap();
        let report = manager.build_report(&new_york(), now).await;
        assert!(report.moon_illumination_percent <= 100);
    }
}
