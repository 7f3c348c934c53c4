///! Structured-JSON timing provider
///!
///! Queries the Open Ephemeris body-events endpoint. The service has changed
///! its field names across versions, so the raw record accepts the known
///! spellings via serde aliases and treats every field as optional.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Deserialize;
use std::time::Duration;

use skygaze_common::{ObserverContext, TimingRecord};

use super::parse::parse_time_token;
use super::sources::TimingSource;

const EPHEMERIS_API_URL: &str = "https://api.open-ephemeris.org/v1/body-events";
const REQUEST_TIMEOUT_SECONDS: u64 = 30;
const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_SECONDS: u64 = 2;

/// Raw per-body event record as returned by the API
#[derive(Debug, Deserialize)]
struct RawBodyEvents {
    #[serde(default, alias = "riseTime", alias = "rise_time")]
    rise: Option<String>,

    #[serde(default, alias = "transitTime", alias = "transit_time", alias = "culmination")]
    transit: Option<String>,

    #[serde(default, alias = "setTime", alias = "set_time")]
    set: Option<String>,
}

/// Wrapper for the JSON response
#[derive(Debug, Deserialize)]
struct RawResponse {
    #[allow(dead_code)]
    #[serde(default)]
    body: Option<String>,

    #[serde(alias = "data")]
    events: RawBodyEvents,
}

/// Parse a body-events JSON document into a timing record
///
/// Time fields hold local 24-hour clock strings. An unparseable field is
/// left empty rather than failing the record.
fn parse_body_events(json: &str, date: NaiveDate, offset: FixedOffset) -> Result<TimingRecord> {
    let raw: RawResponse =
        serde_json::from_str(json).context("Failed to deserialize body-events JSON")?;

    let parse_field = |field: &Option<String>| -> Option<DateTime<FixedOffset>> {
        field
            .as_deref()
            .and_then(|token| parse_time_token(token, date, offset))
    };

    Ok(TimingRecord {
        rise_time: parse_field(&raw.events.rise),
        set_time: parse_field(&raw.events.set),
        transit_time: parse_field(&raw.events.transit),
    })
}

/// Open Ephemeris API client
pub struct EphemerisApiSource {
    client: reqwest::Client,
}

impl EphemerisApiSource {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// Single fetch attempt
    async fn fetch_attempt(
        &self,
        url: &str,
        body_id: &str,
        date: NaiveDate,
        offset: FixedOffset,
    ) -> Result<TimingRecord> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context(format!("Failed to send request for {}", body_id))?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "HTTP error {} for {}",
                response.status(),
                body_id
            ));
        }

        let text = response
            .text()
            .await
            .context(format!("Failed to read response body for {}", body_id))?;

        parse_body_events(&text, date, offset)
    }
}

#[async_trait]
impl TimingSource for EphemerisApiSource {
    fn name(&self) -> &'static str {
        "open-ephemeris"
    }

    fn body_id(&self, body_name: &str) -> Option<String> {
        match body_name.to_lowercase().as_str() {
            "mercury" => Some("mercury".to_string()),
            "venus" => Some("venus".to_string()),
            "mars" => Some("mars".to_string()),
            "jupiter" => Some("jupiter".to_string()),
            "saturn" => Some("saturn".to_string()),
            _ => None,
        }
    }

    async fn resolve(
        &self,
        body_id: &str,
        observer: &ObserverContext,
        date: NaiveDate,
    ) -> Result<TimingRecord> {
        let url = format!(
            "{}?body={}&lat={:.4}&lon={:.4}&date={}&tz={}",
            EPHEMERIS_API_URL,
            body_id,
            observer.latitude,
            observer.longitude,
            date.format("%Y-%m-%d"),
            observer.timezone_offset_hours,
        );
        let offset = observer.fixed_offset();

        for attempt in 1..=MAX_RETRIES {
            if attempt > 1 {
                let delay = Duration::from_secs(RETRY_DELAY_SECONDS * attempt as u64);
                tracing::debug!(
                    "Retrying {} after {:?} (attempt {}/{})",
                    body_id,
                    delay,
                    attempt,
                    MAX_RETRIES
                );
                tokio::time::sleep(delay).await;
            }

            match self.fetch_attempt(&url, body_id, date, offset).await {
                Ok(record) => return Ok(record),
                Err(e) if attempt == MAX_RETRIES => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        "Attempt {}/{} failed for {}: {}",
                        attempt,
                        MAX_RETRIES,
                        body_id,
                        e
                    );
                }
            }
        }

        Err(anyhow::anyhow!(
            "Failed to fetch events for {} after {} attempts",
            body_id,
            MAX_RETRIES
        ))
    }
}
