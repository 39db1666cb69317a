//! Calendar layout engine.
//!
//! Pure functions that place events on a day grid: which events fall on a
//! day, how far down the 24-hour timeline they sit, and which column they
//! take when they overlap.

pub mod columns;
pub mod day;
pub mod position;

use std::collections::HashMap;

use chrono::{NaiveDate, TimeZone};
use crate::event::Event;

pub use columns::{EventLayout, layout_overlapping_events};
pub use day::{day_bounds, events_for_day, is_event_on_day};
pub use position::{VerticalPosition, event_vertical_position, time_as_percentage};

/// A timed event with its place on the grid.
#[derive(Debug, Clone)]
pub struct PlacedEvent<'a> {
    pub event: &'a Event,
    pub position: VerticalPosition,
    pub layout: EventLayout,
}

/// Everything needed to draw one day column.
#[derive(Debug, Clone)]
pub struct DayLayout<'a> {
    pub day: NaiveDate,
    /// Events of 23 hours or more, stacked above the timeline in start order
    pub all_day: Vec<&'a Event>,
    pub timed: Vec<PlacedEvent<'a>>,
}

impl DayLayout<'_> {
    pub fn is_empty(&self) -> bool {
        self.all_day.is_empty() && self.timed.is_empty()
    }
}

/// Lay out the events of `day` as seen from `tz`.
pub fn layout_day<'a, Tz: TimeZone>(events: &'a [Event], day: NaiveDate, tz: &Tz) -> DayLayout<'a> {
    let (mut all_day, timed): (Vec<&Event>, Vec<&Event>) = events_for_day(events, day, tz)
        .into_iter()
        .partition(|e| e.is_all_day());
    all_day.sort_by_key(|e| e.start_time);

    let by_id: HashMap<i64, &Event> = timed.iter().map(|e| (e.id, *e)).collect();

    let timed = layout_overlapping_events(timed.iter().copied())
        .into_iter()
        .filter_map(|layout| {
            let event = *by_id.get(&layout.id)?;
            let position = event_vertical_position(
                &event.start_time.with_timezone(tz),
                &event.end_time.with_timezone(tz),
            );
            Some(PlacedEvent {
                event,
                position,
                layout,
            })
        })
        .collect();

    DayLayout { day, all_day, timed }
}

/// An hour gridline on the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct HourSlot {
    pub hour: u32,
    pub label: String,
    pub percentage: f64,
}

pub fn hourly_slots() -> Vec<HourSlot> {
    (0..24)
        .map(|hour| HourSlot {
            hour,
            label: format!("{:02}:00", hour),
            percentage: hour as f64 / 24.0 * 100.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, TimeDelta, Utc};

    fn event(id: i64, start: DateTime<Utc>, end: DateTime<Utc>) -> Event {
        Event {
            id,
            title: format!("Event {}", id),
            description: String::new(),
            short_description: String::new(),
            start_time: start,
            end_time: end,
            link: String::new(),
            banner: String::new(),
            airports: vec![],
            routes: vec![],
            organisers: vec![],
        }
    }

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, h, 0, 0).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn splits_all_day_from_timed() {
        let events = vec![
            event(1, at(20, 0), at(21, 0)),
            event(2, at(20, 10), at(20, 12)),
            event(3, at(20, 11), at(20, 13)),
            event(4, at(22, 10), at(22, 12)),
        ];

        let layout = layout_day(&events, day(20), &Utc);

        assert_eq!(layout.all_day.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(layout.timed.len(), 2);
        assert!(layout.timed.iter().all(|p| p.layout.total_columns == 2));
        assert!(layout.timed.iter().all(|p| !p.position.all_day));
    }

    #[test]
    fn positions_in_viewer_zone() {
        let events = vec![event(1, at(20, 10), at(20, 12))];
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        let layout = layout_day(&events, day(20), &plus_two);
        let placed = &layout.timed[0];

        assert!((placed.position.top - 50.0).abs() < 1e-9);
        assert_eq!(placed.event.id, 1);
    }

    #[test]
    fn empty_day() {
        let events = vec![event(1, at(20, 10), at(20, 12))];
        assert!(layout_day(&events, day(25), &Utc).is_empty());
    }

    #[test]
    fn all_day_lane_is_sorted() {
        let events = vec![
            event(1, at(20, 6), at(20, 6) + TimeDelta::hours(30)),
            event(2, at(19, 12), at(21, 12)),
        ];
        let layout = layout_day(&events, day(20), &Utc);
        assert_eq!(layout.all_day.iter().map(|e| e.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn twenty_four_hourly_slots() {
        let slots = hourly_slots();
        assert_eq!(slots.len(), 24);
        assert_eq!(slots[0].label, "00:00");
        assert_eq!(slots[18].label, "18:00");
        assert_eq!(slots[6].percentage, 25.0);
    }
}
