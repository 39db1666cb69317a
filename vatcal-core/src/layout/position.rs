//! Vertical placement of events on a 24-hour timeline.

use chrono::{DateTime, TimeDelta, TimeZone, Timelike};
use crate::constants::ALL_DAY_THRESHOLD_HOURS;

/// Height of an entry in the all-day lane, in percent.
pub const ALL_DAY_HEIGHT: f64 = 8.0;

/// Shortest rendered height, so brief events stay visible.
pub const MIN_EVENT_HEIGHT: f64 = 2.0;

/// Position of an event in percent of the day's height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalPosition {
    pub top: f64,
    pub height: f64,
    pub start_percentage: f64,
    pub end_percentage: f64,
    pub all_day: bool,
}

/// Share of the day elapsed at `instant`, in [0, 100). Sub-second precision is dropped.
pub fn time_as_percentage<Tz: TimeZone>(instant: &DateTime<Tz>) -> f64 {
    let minutes = instant.hour() as f64 * 60.0
        + instant.minute() as f64
        + instant.second() as f64 / 60.0;
    minutes / (24.0 * 60.0) * 100.0
}

/// Where to draw an event running from `start` to `end`.
///
/// Events of 23 hours or more get a fixed slot in the all-day lane. Others
/// run from their start to their end, or to the bottom of the day when they
/// cross midnight, and are never shorter than `MIN_EVENT_HEIGHT`.
pub fn event_vertical_position<Tz: TimeZone>(
    start: &DateTime<Tz>,
    end: &DateTime<Tz>,
) -> VerticalPosition {
    let duration = end.clone().signed_duration_since(start);

    if duration >= TimeDelta::hours(ALL_DAY_THRESHOLD_HOURS) {
        return VerticalPosition {
            top: 0.0,
            height: ALL_DAY_HEIGHT,
            start_percentage: 0.0,
            end_percentage: 100.0,
            all_day: true,
        };
    }

    let start_percentage = time_as_percentage(start);
    let mut end_percentage = time_as_percentage(end);
    if end_percentage < start_percentage {
        end_percentage = 100.0;
    }

    VerticalPosition {
        top: start_percentage,
        height: (end_percentage - start_percentage).max(MIN_EVENT_HEIGHT),
        start_percentage,
        end_percentage,
        all_day: false,
    }
}
