//! Per-region event cache.
//!
//! Each region has one slot holding the events last served for it. A slot is
//! refreshed from the feed once its TTL has elapsed; fresh events are merged
//! into what was retained before, so events that drop out of the upstream
//! "latest" window stay visible for the retention window after they end.
//!
//! A slot stays locked while its feed request is in flight, so concurrent
//! misses on the same region share one upstream call.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Mutex;

use crate::constants::{CACHE_TTL_MINUTES, RETENTION_HOURS};
use crate::error::{VatcalError, VatcalResult};
use crate::event::Event;
use crate::feed::EventFeed;
use crate::region::Region;

pub const STALE_DATA_MESSAGE: &str = "API unavailable, serving cached data";

/// Freshness and retention windows of the cache.
#[derive(Debug, Clone, Copy)]
pub struct CachePolicy {
    pub ttl: TimeDelta,
    pub retention: TimeDelta,
}

impl Default for CachePolicy {
    fn default() -> Self {
        CachePolicy {
            ttl: TimeDelta::minutes(CACHE_TTL_MINUTES),
            retention: TimeDelta::hours(RETENTION_HOURS),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    /// Events served to clients
    events: Vec<Event>,
    /// Merge history; the next fetch is merged into this set
    retained: Vec<Event>,
    last_updated: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

/// What `EventCache::get_events` hands back for a region.
#[derive(Debug, Clone)]
pub struct EventsSnapshot {
    pub region: Region,
    pub events: Vec<Event>,
    /// Served from the cache rather than a fetch made for this call
    pub cached: bool,
    /// Served from an expired entry because the refresh failed
    pub stale: bool,
    pub last_updated: DateTime<Utc>,
    pub error: Option<String>,
}

impl EventsSnapshot {
    fn from_entry(region: Region, entry: &CacheEntry, cached: bool) -> Self {
        EventsSnapshot {
            region,
            events: entry.events.clone(),
            cached,
            stale: false,
            last_updated: entry.last_updated,
            error: None,
        }
    }

    fn stale(region: Region, entry: &CacheEntry) -> Self {
        EventsSnapshot {
            stale: true,
            error: Some(STALE_DATA_MESSAGE.to_string()),
            ..Self::from_entry(region, entry, true)
        }
    }
}

/// Region-keyed event cache in front of an `EventFeed`.
pub struct EventCache<F> {
    feed: F,
    policy: CachePolicy,
    slots: HashMap<Region, Mutex<Option<CacheEntry>>>,
}

impl<F: EventFeed> EventCache<F> {
    pub fn new(feed: F) -> Self {
        Self::with_policy(feed, CachePolicy::default())
    }

    pub fn with_policy(feed: F, policy: CachePolicy) -> Self {
        let slots = Region::ALL
            .into_iter()
            .map(|region| (region, Mutex::new(None)))
            .collect();

        EventCache {
            feed,
            policy,
            slots,
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    pub fn feed(&self) -> &F {
        &self.feed
    }

    pub async fn get_events(&self, region: Region) -> VatcalResult<EventsSnapshot> {
        self.get_events_at(region, Utc::now()).await
    }

    /// Serve `region` as of `now`: from the cache while fresh, otherwise from
    /// the feed, falling back to the last known events if the feed fails.
    pub async fn get_events_at(
        &self,
        region: Region,
        now: DateTime<Utc>,
    ) -> VatcalResult<EventsSnapshot> {
        let slot = self
            .slots
            .get(&region)
            .ok_or_else(|| VatcalError::Config(format!("No cache slot for region {}", region)))?;
        let mut entry = slot.lock().await;

        if let Some(current) = entry.as_ref().filter(|e| now < e.expires_at) {
            tracing::debug!(%region, events = current.events.len(), "serving cached events");
            return Ok(EventsSnapshot::from_entry(region, current, true));
        }

        match self.fetch(region).await {
            Ok(fetched) => {
                let retained = entry.as_ref().map(|e| e.retained.as_slice()).unwrap_or(&[]);
                let fetched_count = fetched.len();
                let merged = merge_and_filter(retained, fetched, now, self.policy.retention);

                tracing::info!(
                    %region,
                    fetched = fetched_count,
                    visible = merged.len(),
                    "refreshed event cache"
                );

                let fresh = CacheEntry {
                    events: merged.clone(),
                    retained: merged,
                    last_updated: now,
                    expires_at: now + self.policy.ttl,
                };
                let snapshot = EventsSnapshot::from_entry(region, &fresh, false);
                *entry = Some(fresh);

                Ok(snapshot)
            }
            Err(err) => match entry.as_ref() {
                Some(previous) => {
                    tracing::warn!(%region, error = %err, "upstream unavailable, serving stale events");
                    Ok(EventsSnapshot::stale(region, previous))
                }
                None => {
                    tracing::error!(%region, error = %err, "upstream unavailable and nothing cached");
                    Err(VatcalError::NoDataAvailable(region))
                }
            },
        }
    }

    async fn fetch(&self, region: Region) -> VatcalResult<Vec<Event>> {
        let raw = self.feed.fetch(region).await?;
        raw.into_iter().map(Event::try_from).collect()
    }
}

/// Merge freshly fetched events into the retained set and drop expired ones.
///
/// Fetched events replace retained ones with the same id. The result holds
/// every event that has not ended more than `retention` before `now`, sorted
/// by start time.
pub fn merge_and_filter(
    retained: &[Event],
    fetched: Vec<Event>,
    now: DateTime<Utc>,
    retention: TimeDelta,
) -> Vec<Event> {
    let mut by_id: HashMap<i64, Event> = retained.iter().map(|e| (e.id, e.clone())).collect();

    for event in fetched {
        by_id.insert(event.id, event);
    }

    let cutoff = now - retention;
    let mut events: Vec<Event> = by_id
        .into_values()
        .filter(|event| {
            let upcoming = event.start_time > now;
            let ended_recently = event.end_time <= now && event.end_time >= cutoff;
            upcoming || event.is_ongoing_at(now) || ended_recently
        })
        .collect();

    events.sort_by_key(|e| (e.start_time, e.id));
    events
}
