//! Which events fall on which calendar day.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};

use crate::event::Event;

const LAST_SECOND_OF_DAY: i64 = 24 * 60 * 60 - 1;

/// First and last second of `day` in the viewer's zone, as UTC instants.
pub fn day_bounds<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day.and_time(NaiveTime::MIN);
    let end = start + TimeDelta::seconds(LAST_SECOND_OF_DAY);
    (local_instant(tz, start), local_instant(tz, end))
}

/// Whether the event's [start, end] interval touches `day` (00:00:00 to
/// 23:59:59 local, both inclusive). Multi-day events are on every day they span.
pub fn is_event_on_day<Tz: TimeZone>(event: &Event, day: NaiveDate, tz: &Tz) -> bool {
    let (day_start, day_end) = day_bounds(day, tz);
    event.start_time <= day_end && event.end_time >= day_start
}

pub fn events_for_day<'a, Tz: TimeZone>(
    events: &'a [Event],
    day: NaiveDate,
    tz: &Tz,
) -> Vec<&'a Event> {
    events.iter().filter(|e| is_event_on_day(e, day, tz)).collect()
}

/// Resolve a local wall-clock time to an instant.
///
/// Ambiguous times take the earlier instant. Times inside a DST gap move
/// forward an hour.
fn local_instant<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + TimeDelta::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}
