///! Tiered timing resolver
///!
///! Providers are tried in priority order. Each tier queries only the bodies
///! the earlier tiers left incomplete, and merged fields are never
///! overwritten by a later tier. Per-body calls inside one tier run
///! concurrently, staggered by a small delay proportional to their batch
///! position as rate-limit courtesy.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::time::Duration;

use skygaze_common::{ObserverContext, TimingRecord};

use super::almanac::AlmanacSource;
use super::ephemeris_api::EphemerisApiSource;
use super::sources::TimingSource;

const BATCH_STAGGER_DELAY_MS: u64 = 150;

/// Priority-ordered chain of external timing providers
pub struct TimingResolver {
    sources: Vec<Box<dyn TimingSource>>,
}

impl TimingResolver {
    pub fn new(sources: Vec<Box<dyn TimingSource>>) -> Self {
        Self { sources }
    }

    /// The default chain: structured API first, text almanac second
    pub fn with_default_sources() -> anyhow::Result<Self> {
        Ok(Self::new(vec![
            Box::new(EphemerisApiSource::new()?),
            Box::new(AlmanacSource::new()?),
        ]))
    }

    /// Resolve timings for a batch of bodies
    ///
    /// Every requested body gets an entry in the result; bodies no provider
    /// could answer for come back with an empty record. Provider failures
    /// are logged and treated as "no data" for that body only.
    pub async fn resolve_batch(
        &self,
        body_names: &[String],
        observer: &ObserverContext,
        date: NaiveDate,
    ) -> HashMap<String, TimingRecord> {
        let mut records: HashMap<String, TimingRecord> = body_names
            .iter()
            .map(|name| (name.clone(), TimingRecord::empty()))
            .collect();

        for source in &self.sources {
            // Only the gap left by higher-priority tiers goes to this one
            let pending: Vec<(String, String)> = body_names
                .iter()
                .filter(|name| {
                    records
                        .get(name.as_str())
                        .is_some_and(|record| !record.is_complete())
                })
                .filter_map(|name| source.body_id(name).map(|id| (name.clone(), id)))
                .collect();

            if pending.is_empty() {
                continue;
            }

            tracing::debug!(
                "Querying {} for {} of {} bodies",
                source.name(),
                pending.len(),
                body_names.len()
            );

            let results = futures::future::join_all(pending.into_iter().enumerate().map(
                |(index, (name, body_id))| async move {
                    if index > 0 {
                        tokio::time::sleep(Duration::from_millis(
                            BATCH_STAGGER_DELAY_MS * index as u64,
                        ))
                        .await;
                    }
                    let result = source.resolve(&body_id, observer, date).await;
                    (name, result)
                },
            ))
            .await;

            let mut answered = 0usize;
            for (name, result) in results {
                match result {
                    Ok(fetched) => {
                        if let Some(record) = records.get_mut(&name) {
                            record.merge_missing(&fetched);
                        }
                        if !fetched.is_empty() {
                            answered += 1;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("{} returned no data for {}: {}", source.name(), name, e);
                    }
                }
            }

            tracing::debug!("{} answered for {} bodies", source.name(), answered);
        }

        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::{DateTime, FixedOffset, TimeZone};

    fn local(h: u32, min: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(-5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 1, 15, h, min, 0)
            .unwrap()
    }

    fn observer() -> ObserverContext {
        ObserverContext::new(40.7, -74.0)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    /// Provider stub with canned per-body answers
    struct StubSource {
        name: &'static str,
        answers: HashMap<String, TimingRecord>,
        fail_for: Vec<String>,
        covers_stars: bool,
    }

    impl StubSource {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                answers: HashMap::new(),
                fail_for: Vec::new(),
                covers_stars: false,
            }
        }

        fn answer(mut self, body: &str, record: TimingRecord) -> Self {
            self.answers.insert(body.to_string(), record);
            self
        }

        fn failing_for(mut self, body: &str) -> Self {
            self.fail_for.push(body.to_string());
            self
        }
    }

    #[async_trait]
    impl TimingSource for StubSource {
        fn name(&self) -> &'static str {
            self.name
        }

        fn body_id(&self, body_name: &str) -> Option<String> {
            if !self.covers_stars && body_name.eq_ignore_ascii_case("Sirius") {
                return None;
            }
            Some(body_name.to_lowercase())
        }

        async fn resolve(
            &self,
            body_id: &str,
            _observer: &ObserverContext,
            _date: NaiveDate,
        ) -> Result<TimingRecord> {
            if self.fail_for.iter().any(|b| b.to_lowercase() == body_id) {
                anyhow::bail!("provider unavailable");
            }
            Ok(self
                .answers
                .get(body_id)
                .copied()
                .unwrap_or_else(TimingRecord::empty))
        }
    }

    #[tokio::test]
    async fn test_higher_tier_fields_survive_lower_tier() {
        let tier1 = StubSource::new("tier1").answer(
            "mars",
            TimingRecord {
                rise_time: Some(local(19, 12)),
                set_time: None,
                transit_time: None,
            },
        );
        let tier2 = StubSource::new("tier2").answer(
            "mars",
            TimingRecord {
                rise_time: Some(local(20, 0)),
                set_time: Some(local(4, 31)),
                transit_time: Some(local(23, 48)),
            },
        );

        let resolver = TimingResolver::new(vec![Box::new(tier1), Box::new(tier2)]);
        let records = resolver
            .resolve_batch(&["Mars".to_string()], &observer(), date())
            .await;

        let mars = &records["Mars"];
        assert_eq!(mars.rise_time, Some(local(19, 12)));
        assert_eq!(mars.set_time, Some(local(4, 31)));
        assert_eq!(mars.transit_time, Some(local(23, 48)));
    }

    #[tokio::test]
    async fn test_provider_failure_does_not_abort_batch() {
        let complete = TimingRecord {
            rise_time: Some(local(9, 30)),
            set_time: Some(local(18, 40)),
            transit_time: Some(local(14, 5)),
        };
        let tier1 = StubSource::new("tier1")
            .failing_for("mars")
            .answer("venus", complete);
        let tier2 = StubSource::new("tier2").answer("mars", complete);

        let resolver = TimingResolver::new(vec![Box::new(tier1), Box::new(tier2)]);
        let records = resolver
            .resolve_batch(
                &["Mars".to_string(), "Venus".to_string()],
                &observer(),
                date(),
            )
            .await;

        assert!(records["Venus"].is_complete());
        assert!(records["Mars"].is_complete());
    }

    #[tokio::test]
    async fn test_complete_bodies_skip_later_tiers() {
        let complete = TimingRecord {
            rise_time: Some(local(9, 30)),
            set_time: Some(local(18, 40)),
            transit_time: Some(local(14, 5)),
        };
        let tier1 = StubSource::new("tier1").answer("mars", complete);
        // Tier 2 would disagree; it must never be consulted for Mars
        let tier2 = StubSource::new("tier2").answer(
            "mars",
            TimingRecord {
                rise_time: Some(local(1, 0)),
                set_time: Some(local(2, 0)),
                transit_time: Some(local(3, 0)),
            },
        );

        let resolver = TimingResolver::new(vec![Box::new(tier1), Box::new(tier2)]);
        let records = resolver
            .resolve_batch(&["Mars".to_string()], &observer(), date())
            .await;

        assert_eq!(records["Mars"].rise_time, Some(local(9, 30)));
    }

    #[tokio::test]
    async fn test_unmapped_body_comes_back_empty() {
        let tier1 = StubSource::new("tier1");
        let resolver = TimingResolver::new(vec![Box::new(tier1)]);

        let records = resolver
            .resolve_batch(&["Sirius".to_string()], &observer(), date())
            .await;

        assert!(records["Sirius"].is_empty());
    }

    #[tokio::test]
    async fn test_all_providers_down_still_returns_entries() {
        let tier1 = StubSource::new("tier1")
            .failing_for("mars")
            .failing_for("venus");
        let resolver = TimingResolver::new(vec![Box::new(tier1)]);

        let records = resolver
            .resolve_batch(
                &["Mars".to_string(), "Venus".to_string()],
                &observer(),
                date(),
            )
            .await;

        assert_eq!(records.len(), 2);
        assert!(records.values().all(|r| r.is_empty()));
    }
}
