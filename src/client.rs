//! HTTP client for communicating with vatcal-server

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::time::Duration;

use vatcal_core::api::{EventsResponse, RegionInfo};
use vatcal_core::{Event, Region};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// HTTP client for vatcal-server
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

/// One successful answer of `GET /api/events`.
#[derive(Debug, Clone)]
pub struct EventsPage {
    pub region: Region,
    pub events: Vec<Event>,
    pub cached: bool,
    pub stale: bool,
    pub last_updated: Option<DateTime<Utc>>,
    /// Set when the server answered from stale cache
    pub warning: Option<String>,
}

impl TryFrom<EventsResponse> for EventsPage {
    type Error = anyhow::Error;

    fn try_from(resp: EventsResponse) -> Result<Self> {
        if !resp.success {
            anyhow::bail!(
                "{}",
                resp.error.unwrap_or_else(|| "Failed to fetch events".to_string())
            );
        }

        Ok(EventsPage {
            region: resp.region,
            events: resp.data.unwrap_or_default(),
            cached: resp.cached.unwrap_or(false),
            stale: resp.stale.unwrap_or(false),
            last_updated: resp.last_updated,
            warning: resp.error,
        })
    }
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Could not build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn events_url(&self, region: Region) -> String {
        format!("{}/api/events?region={}", self.base_url, region.id())
    }

    /// GET /api/events
    ///
    /// Error responses still carry a JSON body, so the body is parsed
    /// before the status decides anything.
    pub async fn events(&self, region: Region) -> Result<EventsPage> {
        let resp = self
            .http
            .get(self.events_url(region))
            .send()
            .await
            .with_context(|| format!("Failed to connect to server at {}", self.base_url))?;

        let status = resp.status();
        let body: EventsResponse = resp
            .json()
            .await
            .with_context(|| format!("Unexpected response from server (status {})", status.as_u16()))?;

        EventsPage::try_from(body)
    }

    /// GET /api/regions
    pub async fn regions(&self) -> Result<Vec<RegionInfo>> {
        let resp = self
            .http
            .get(format!("{}/api/regions", self.base_url))
            .send()
            .await
            .with_context(|| format!("Failed to connect to server at {}", self.base_url))?;

        if !resp.status().is_success() {
            anyhow::bail!("Server returned status {}", resp.status().as_u16());
        }

        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> EventsResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn trims_trailing_slash_from_server_url() {
        let client = Client::new("http://localhost:3000/").unwrap();
        assert_eq!(
            client.events_url(Region::All),
            "http://localhost:3000/api/events?region=all"
        );
        assert_eq!(
            client.events_url(Region::Emea),
            "http://localhost:3000/api/events?region=EMEA"
        );
    }

    #[test]
    fn page_from_fresh_response() {
        let page = EventsPage::try_from(response(
            r#"{"success":true,"data":[],"cached":false,"region":"EMEA","lastUpdated":1710957600000}"#,
        ))
        .unwrap();

        assert_eq!(page.region, Region::Emea);
        assert!(!page.cached);
        assert!(!page.stale);
        assert!(page.warning.is_none());
        assert_eq!(
            page.last_updated.map(|t| t.timestamp_millis()),
            Some(1_710_957_600_000)
        );
    }

    #[test]
    fn page_keeps_stale_warning() {
        let page = EventsPage::try_from(response(
            r#"{"success":true,"data":[],"cached":true,"stale":true,"region":"all","lastUpdated":1710957600000,"error":"API unavailable, serving cached data"}"#,
        ))
        .unwrap();

        assert!(page.cached);
        assert!(page.stale);
        assert_eq!(page.warning.as_deref(), Some("API unavailable, serving cached data"));
    }

    #[test]
    fn failed_response_is_an_error() {
        let err = EventsPage::try_from(response(
            r#"{"success":false,"region":"EMEA","error":"Failed to fetch events and no cached data available"}"#,
        ))
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Failed to fetch events and no cached data available"
        );
    }
}
