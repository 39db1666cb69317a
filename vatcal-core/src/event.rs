//! VATSIM event types.
//!
//! `RawEvent` mirrors the upstream JSON as the VATSIM API sends it. It is
//! converted once, on fetch, into the canonical `Event` that the cache, the
//! HTTP API and the calendar layout all work with.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::ALL_DAY_THRESHOLD_HOURS;
use crate::error::{VatcalError, VatcalResult};

/// Envelope of the upstream feed response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEventsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<RawEvent>,
}

/// Treat an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An event as returned by the upstream feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEvent {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub organisers: Vec<RawOrganiser>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub airports: Vec<RawAirport>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub routes: Vec<Route>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub short_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub banner: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawOrganiser {
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub division: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub organised_by_vatsim: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAirport {
    #[serde(default, deserialize_with = "null_as_default")]
    pub icao: String,
}

/// A published route between two airports.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Route {
    #[serde(default, deserialize_with = "null_as_default")]
    pub departure: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub arrival: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub route: String,
}

/// A network event in canonical form.
///
/// `id` is stable across fetches and is the merge key of the cache.
/// `end_time >= start_time` is assumed, never repaired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub short_description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub link: String,
    pub banner: String,
    /// ICAO codes, in upstream order
    pub airports: Vec<String>,
    pub routes: Vec<Route>,
    /// "Division (Region)" labels, in upstream order
    pub organisers: Vec<String>,
}

impl Event {
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    /// Events lasting 23 hours or more are shown in the all-day lane.
    pub fn is_all_day(&self) -> bool {
        self.duration() >= Duration::hours(ALL_DAY_THRESHOLD_HOURS)
    }

    /// Open-interval overlap: events that merely touch do not overlap.
    pub fn overlaps(&self, other: &Event) -> bool {
        self.start_time < other.end_time && other.start_time < self.end_time
    }

    pub fn is_ongoing_at(&self, now: DateTime<Utc>) -> bool {
        self.start_time <= now && now < self.end_time
    }
}

impl TryFrom<RawEvent> for Event {
    type Error = VatcalError;

    fn try_from(raw: RawEvent) -> VatcalResult<Self> {
        let start_time = parse_timestamp(&raw.start_time)?;
        let end_time = parse_timestamp(&raw.end_time)?;

        Ok(Event {
            id: raw.id,
            title: raw.name,
            description: raw.description,
            short_description: raw.short_description,
            start_time,
            end_time,
            link: raw.link,
            banner: raw.banner,
            airports: raw.airports.into_iter().map(|a| a.icao).collect(),
            routes: raw.routes,
            organisers: raw
                .organisers
                .iter()
                .map(|org| format!("{} ({})", org.division, org.region))
                .collect(),
        })
    }
}

/// Parse an upstream timestamp.
///
/// RFC 3339 is what VATSIM sends; naive timestamps are read as UTC.
pub fn parse_timestamp(s: &str) -> VatcalResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| VatcalError::Fetch(format!("Invalid timestamp '{}' in feed", s)))
}
