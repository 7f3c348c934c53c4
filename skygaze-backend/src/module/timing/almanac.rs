///! Free-text almanac timing provider
///!
///! The daily almanac endpoint returns plain text with labeled clock tokens,
///! one body per request, e.g.:
///!
///!   Mars
///!   Rise: 7:12 PM   Transit: 11:48 PM   Set: 4:31 AM
///!
///! Labels and token formats vary (12-hour and 24-hour have both been seen),
///! so extraction is regex-driven and per-field tolerant.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{FixedOffset, NaiveDate};
use regex::Regex;
use std::time::Duration;

use skygaze_common::{ObserverContext, TimingRecord};

use super::parse::parse_time_token;
use super::sources::TimingSource;

const ALMANAC_URL: &str = "https://almanac.nightfall.dev/v2/daily";
const REQUEST_TIMEOUT_SECONDS: u64 = 20;

/// Extract labeled time tokens from almanac text
///
/// The first occurrence of each label wins; unparseable tokens leave their
/// field empty. This never fails: text with no recognizable tokens simply
/// produces an empty record.
pub fn parse_almanac_text(text: &str, date: NaiveDate, offset: FixedOffset) -> TimingRecord {
    let mut record = TimingRecord::empty();

    let re = match Regex::new(r"(?i)\b(rise|transit|set)\s*:\s*(\d{1,2}:\d{2}(?::\d{2})?\s*(?:AM|PM)?)") {
        Ok(re) => re,
        Err(e) => {
            tracing::error!("Invalid almanac token pattern: {}", e);
            return record;
        }
    };

    for caps in re.captures_iter(text) {
        let label = caps[1].to_lowercase();
        let parsed = parse_time_token(&caps[2], date, offset);

        match label.as_str() {
            "rise" if record.rise_time.is_none() => record.rise_time = parsed,
            "transit" if record.transit_time.is_none() => record.transit_time = parsed,
            "set" if record.set_time.is_none() => record.set_time = parsed,
            _ => {}
        }
    }

    record
}

/// Nightfall almanac client
pub struct AlmanacSource {
    client: reqwest::Client,
}

impl AlmanacSource {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TimingSource for AlmanacSource {
    fn name(&self) -> &'static str {
        "nightfall-almanac"
    }

    fn body_id(&self, body_name: &str) -> Option<String> {
        // The almanac indexes planets by display name
        match body_name.to_lowercase().as_str() {
            "mercury" => Some("Mercury".to_string()),
            "venus" => Some("Venus".to_string()),
            "mars" => Some("Mars".to_string()),
            "jupiter" => Some("Jupiter".to_string()),
            "saturn" => Some("Saturn".to_string()),
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
            "{}?body={}&lat={:.4}&lon={:.4}&date={}",
            ALMANAC_URL,
            body_id,
            observer.latitude,
            observer.longitude,
            date.format("%Y-%m-%d"),
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context(format!("Failed to fetch almanac page for {}", body_id))?;

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
            .context(format!("Failed to read almanac page for {}", body_id))?;

        Ok(parse_almanac_text(&text, date, observer.fixed_offset()))
    }
}
