//! Upstream event feed.
//!
//! The cache manager does not talk HTTP itself; it is handed an `EventFeed`.
//! `VatsimFeed` is the production implementation against the VATSIM API.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::constants::{self, DEFAULT_UPSTREAM_URL, UPSTREAM_TIMEOUT};
use crate::error::{VatcalError, VatcalResult};
use crate::event::{RawEvent, RawEventsResponse};
use crate::region::Region;

/// Source of raw events for a region.
///
/// Every failure (transport, status, body) is reported as `VatcalError::Fetch`.
pub trait EventFeed: Send + Sync {
    fn fetch(&self, region: Region) -> impl Future<Output = VatcalResult<Vec<RawEvent>>> + Send;
}

/// Fetches events from the VATSIM events API.
#[derive(Debug, Clone)]
pub struct VatsimFeed {
    http: reqwest::Client,
    base_url: String,
}

impl VatsimFeed {
    pub fn new() -> VatcalResult<Self> {
        Self::with_options(DEFAULT_UPSTREAM_URL, UPSTREAM_TIMEOUT)
    }

    pub fn with_options(base_url: &str, timeout: Duration) -> VatcalResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(constants::USER_AGENT));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| VatcalError::Config(format!("Could not build HTTP client: {e}")))?;

        // Region paths are relative, so the base must end with a slash
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        Ok(VatsimFeed { http, base_url })
    }

    pub fn url_for(&self, region: Region) -> String {
        format!("{}{}", self.base_url, region.feed_path())
    }
}

impl EventFeed for VatsimFeed {
    async fn fetch(&self, region: Region) -> VatcalResult<Vec<RawEvent>> {
        let url = self.url_for(region);
        tracing::debug!(%region, %url, "requesting upstream events");

        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(VatcalError::Fetch(format!(
                "HTTP error! status: {} for region {}",
                status.as_u16(),
                region
            )));
        }

        let body: RawEventsResponse = response.json().await?;
        Ok(body.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_region_urls() {
        let feed = VatsimFeed::new().unwrap();
        assert_eq!(
            feed.url_for(Region::All),
            "https://my.vatsim.net/api/v2/events/latest"
        );
        assert_eq!(
            feed.url_for(Region::Emea),
            "https://my.vatsim.net/api/v2/events/view/region/EMEA"
        );
    }

    #[test]
    fn adds_missing_trailing_slash() {
        let feed = VatsimFeed::with_options("http://localhost:9000/api", UPSTREAM_TIMEOUT).unwrap();
        assert_eq!(feed.url_for(Region::All), "http://localhost:9000/api/events/latest");
    }
}
