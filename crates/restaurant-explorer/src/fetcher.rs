/// Dataset fetcher.
///
/// Issues a single GET against the configured endpoint (with the timeout and retry policy of
/// `JsonSource`) and validates every element into a `Record`. Elements that fail validation
/// are dropped here so nothing downstream has to re-check names or locations.
use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::AppError;
use crate::model::{RawRecord, Record, RecordCollection};
use resto_common::http::{JsonSource, JsonSourceConfig};

pub struct DataFetcher {
    source: JsonSource,
    url: String,
}

impl DataFetcher {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let source = JsonSource::new(JsonSourceConfig {
            timeout: config.fetch_timeout,
            max_retries: config.fetch_max_retries,
            ..JsonSourceConfig::default()
        })?;
        Ok(Self {
            source,
            url: config.data_url.clone(),
        })
    }

    /// Fetch the dataset, keeping only records with a name and a location.
    ///
    /// Transport failures, non-2xx statuses and bodies that are not a JSON array all map to
    /// `AppError::DataUnavailable`. An empty result is not an error here.
    pub async fn fetch(&self) -> Result<RecordCollection, AppError> {
        info!(url = %self.url, "fetching restaurant data");
        let elements: Vec<Value> = self
            .source
            .get_json(&self.url)
            .await
            .map_err(|e| AppError::DataUnavailable(e.to_string()))?;

        let total = elements.len();
        let records = validate_records(elements);
        info!(
            total,
            kept = records.len(),
            dropped = total - records.len(),
            "restaurant data fetched"
        );
        Ok(records)
    }
}

/// Decode and validate each element independently; malformed elements are skipped.
pub fn validate_records(elements: Vec<Value>) -> RecordCollection {
    elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| {
            let raw: RawRecord = serde_json::from_value(element)
                .inspect_err(|e| debug!(index, error = %e, "undecodable element dropped"))
                .ok()?;
            Record::try_from(raw)
                .inspect_err(|e| debug!(index, reason = %e, "malformed record dropped"))
                .ok()
        })
        .collect()
}
