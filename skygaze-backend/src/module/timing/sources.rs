///! Provider seam for external timing services

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use skygaze_common::{ObserverContext, TimingRecord};

/// One external rise/transit/set provider
///
/// Implementations translate the common body name into their own identifier
/// space via a fixed mapping table; bodies without a mapping are skipped for
/// that provider. `resolve` may return a record with none, some or all
/// fields present.
#[async_trait]
pub trait TimingSource: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Provider-specific identifier for a body, or `None` when the provider
    /// does not cover it
    fn body_id(&self, body_name: &str) -> Option<String>;

    /// Fetch whatever timing fields the provider has for one body
    async fn resolve(
        &self,
        body_id: &str,
        observer: &ObserverContext,
        date: NaiveDate,
    ) -> Result<TimingRecord>;
}
