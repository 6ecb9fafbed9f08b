//! HTTP client for the upstream locating engine (Quuppa Positioning Engine).
//!
//! The engine's `getTagData` endpoint reports every tracked tag; this module
//! polls it, keeps only observations that carry advertising data, and hands
//! them to the core as [`TagRecord`]s. The upstream status code is treated as
//! an integer contract: 0 means data, 11 means the engine is not in track
//! mode (a warning, not an error).

use crate::app::{PollError, TagSource};
use crate::tag::{TagObservation, TagRecord};
use serde::Deserialize;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

const CODE_OK: i64 = 0;
const CODE_NOT_TRACKING: i64 = 11;

/// URL builder for the QPE API endpoints this crate uses.
#[derive(Debug, Clone)]
pub struct QpeUrlCompendium {
    base_url: String,
}

impl QpeUrlCompendium {
    /// `base_url` is the engine root, e.g. `http://localhost:8080/qpe`.
    pub fn new(base_url: &str) -> Self {
        QpeUrlCompendium {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `getTagData` with every available item, including gateway-captured
    /// advertising payloads.
    pub fn get_tag_data_all_items(&self) -> String {
        format!("{}/getTagData?mode=json&format=ALL_ITEMS", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct TagDataResponse {
    code: i64,
    #[serde(default)]
    tags: Vec<TagObservation>,
}

fn records_from_response(response: TagDataResponse) -> Result<Vec<TagRecord>, PollError> {
    match response.code {
        CODE_OK => Ok(response
            .tags
            .into_iter()
            .filter_map(TagObservation::into_record)
            .collect()),
        CODE_NOT_TRACKING => {
            log::warn!("engine not in track mode, no data acquisition possible");
            Ok(Vec::new())
        }
        other => Err(PollError::UnexpectedCode(other)),
    }
}

impl From<reqwest::Error> for PollError {
    fn from(error: reqwest::Error) -> Self {
        PollError::Request(error.to_string())
    }
}

/// One-shot client for the engine's tag data endpoint.
#[derive(Debug, Clone)]
pub struct EngineClient {
    http: reqwest::Client,
    urls: QpeUrlCompendium,
}

impl EngineClient {
    pub fn new(base_url: &str) -> Self {
        EngineClient {
            http: reqwest::Client::new(),
            urls: QpeUrlCompendium::new(base_url),
        }
    }

    /// Fetch all tags currently known to the engine that have captured
    /// advertising data.
    pub async fn fetch_observed_tags(&self) -> Result<Vec<TagRecord>, PollError> {
        let response = self
            .http
            .get(self.urls.get_tag_data_all_items())
            .send()
            .await?
            .error_for_status()?;
        let body: TagDataResponse = response.json().await?;
        records_from_response(body)
    }
}

/// [`TagSource`] that polls the engine on a fixed interval. The first poll
/// fires immediately; every later one waits out the interval first.
pub struct EngineSource {
    client: EngineClient,
    interval: Duration,
    first_poll: bool,
}

impl EngineSource {
    pub fn new(base_url: &str, interval: Duration) -> Self {
        EngineSource {
            client: EngineClient::new(base_url),
            interval,
            first_poll: true,
        }
    }
}

impl TagSource for EngineSource {
    fn poll(
        &mut self,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Vec<TagRecord>>, PollError>> + Send + '_>> {
        Box::pin(async move {
            if self.first_poll {
                self.first_poll = false;
            } else {
                tokio::time::sleep(self.interval).await;
            }
            self.client.fetch_observed_tags().await.map(Some)
        })
    }
}
