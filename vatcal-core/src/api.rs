//! JSON types of the vatcal HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::EventsSnapshot;
use crate::event::Event;
use crate::region::Region;

pub const NO_DATA_MESSAGE: &str = "Failed to fetch events and no cached data available";

/// Body of `GET /api/events`.
///
/// Successful responses carry `data`, `cached` and `lastUpdated`; failed
/// ones only `region` and `error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Event>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stale: Option<bool>,
    pub region: Region,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EventsResponse {
    pub fn failure(region: Region, error: impl Into<String>) -> Self {
        EventsResponse {
            success: false,
            data: None,
            cached: None,
            stale: None,
            region,
            last_updated: None,
            error: Some(error.into()),
        }
    }
}

impl From<EventsSnapshot> for EventsResponse {
    fn from(snapshot: EventsSnapshot) -> Self {
        EventsResponse {
            success: true,
            data: Some(snapshot.events),
            cached: Some(snapshot.cached),
            stale: snapshot.stale.then_some(true),
            region: snapshot.region,
            last_updated: Some(snapshot.last_updated),
            error: snapshot.error,
        }
    }
}

/// Entry of `GET /api/regions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionInfo {
    pub id: Region,
    pub name: String,
}

impl From<Region> for RegionInfo {
    fn from(region: Region) -> Self {
        RegionInfo {
            id: region,
            name: region.display_name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn failure_has_no_data_fields() {
        let json = serde_json::to_value(EventsResponse::failure(Region::Emea, NO_DATA_MESSAGE)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "region": "EMEA",
                "error": NO_DATA_MESSAGE,
            })
        );
    }

    #[test]
    fn snapshot_response_uses_epoch_millis() {
        let updated = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        let response = EventsResponse::from(EventsSnapshot {
            region: Region::All,
            events: vec![],
            cached: true,
            stale: false,
            last_updated: updated,
            error: None,
        });
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["lastUpdated"], updated.timestamp_millis());
        assert_eq!(json["data"], serde_json::json!([]));
        assert_eq!(json["cached"], true);
        assert!(json.get("stale").is_none());
        assert!(json.get("error").is_none());

        let back: EventsResponse = serde_json::from_value(json).unwrap();
        assert_eq!(back.last_updated, Some(updated));
    }

    #[test]
    fn region_info_names() {
        let info = RegionInfo::from(Region::Emea);
        assert_eq!(info.name, "Europe, Middle East & Africa");
        assert_eq!(serde_json::to_value(&info).unwrap()["id"], "EMEA");
    }
}
