//! Visible day ranges and navigation between them.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use chrono::{Datelike, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::constants::TRANSITION_DELAY;
use crate::error::VatcalError;

/// How many days the calendar shows at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewMode {
    #[serde(rename = "day")]
    Day,
    #[serde(rename = "3day")]
    ThreeDay,
    #[default]
    #[serde(rename = "week")]
    Week,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Week, ViewMode::ThreeDay, ViewMode::Day];

    pub fn id(&self) -> &'static str {
        match self {
            ViewMode::Day => "day",
            ViewMode::ThreeDay => "3day",
            ViewMode::Week => "week",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Day => "Day",
            ViewMode::ThreeDay => "3 Days",
            ViewMode::Week => "Week",
        }
    }

    /// Days moved by one step of prev/next navigation.
    pub fn step_days(&self) -> i64 {
        match self {
            ViewMode::Day => 1,
            ViewMode::ThreeDay => 3,
            ViewMode::Week => 7,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ViewMode {
    type Err = VatcalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewMode::ALL
            .into_iter()
            .find(|v| v.id() == s)
            .ok_or_else(|| VatcalError::Config(format!("Unknown view '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - TimeDelta::days(date.weekday().num_days_from_monday() as i64)
}

/// Monday through Sunday of the week containing `date`.
pub fn week_days(date: NaiveDate) -> Vec<NaiveDate> {
    let monday = week_start(date);
    (0..7).map(|i| monday + TimeDelta::days(i)).collect()
}

/// The days shown for `anchor` in `mode`.
///
/// The 3-day view starts at the anchor but never later than the Friday of
/// its week, so weekends show Friday to Sunday.
pub fn view_days(anchor: NaiveDate, mode: ViewMode) -> Vec<NaiveDate> {
    match mode {
        ViewMode::Day => vec![anchor],
        ViewMode::ThreeDay => {
            let offset = anchor.weekday().num_days_from_monday().min(4) as i64;
            let start = week_start(anchor) + TimeDelta::days(offset);
            (0..3).map(|i| start + TimeDelta::days(i)).collect()
        }
        ViewMode::Week => week_days(anchor),
    }
}

pub fn navigate_view(anchor: NaiveDate, direction: Direction, mode: ViewMode) -> NaiveDate {
    let step = TimeDelta::days(mode.step_days());
    match direction {
        Direction::Prev => anchor - step,
        Direction::Next => anchor + step,
    }
}

/// Header label for a visible range, e.g. "Mar 18 - Mar 24, 2024".
pub fn format_view_range(days: &[NaiveDate], mode: ViewMode) -> String {
    let (Some(start), Some(end)) = (days.first(), days.last()) else {
        return String::new();
    };

    match mode {
        ViewMode::Day => start.format("%A, %B %-d, %Y").to_string(),
        ViewMode::ThreeDay => format!("{} - {}", start.format("%b %-d"), end.format("%b %-d")),
        ViewMode::Week => format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y")),
    }
}

/// Anchor date and view mode of an interactive calendar.
///
/// Every move starts a transition; further moves are refused until the
/// transition delay has passed.
#[derive(Debug, Clone)]
pub struct Navigator {
    anchor: NaiveDate,
    mode: ViewMode,
    delay: Duration,
    transition_started: Option<Instant>,
}

impl Navigator {
    pub fn new(anchor: NaiveDate, mode: ViewMode) -> Self {
        Navigator {
            anchor,
            mode,
            delay: TRANSITION_DELAY,
            transition_started: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn days(&self) -> Vec<NaiveDate> {
        view_days(self.anchor, self.mode)
    }

    pub fn range_label(&self) -> String {
        format_view_range(&self.days(), self.mode)
    }

    /// Switch the view mode. The anchor stays where it is.
    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn is_transitioning_at(&self, now: Instant) -> bool {
        self.transition_started
            .is_some_and(|started| now.saturating_duration_since(started) < self.delay)
    }

    pub fn navigate(&mut self, direction: Direction) -> bool {
        self.navigate_at(direction, Instant::now())
    }

    /// Move one step. Returns `false`, leaving the anchor alone, while a
    /// transition is still running.
    pub fn navigate_at(&mut self, direction: Direction, now: Instant) -> bool {
        let target = navigate_view(self.anchor, direction, self.mode);
        self.move_to(target, now)
    }

    pub fn today(&mut self, today: NaiveDate) -> bool {
        self.today_at(today, Instant::now())
    }

    pub fn today_at(&mut self, today: NaiveDate, now: Instant) -> bool {
        self.move_to(today, now)
    }

    fn move_to(&mut self, target: NaiveDate, now: Instant) -> bool {
        if self.is_transitioning_at(now) {
            return false;
        }
        self.anchor = target;
        self.transition_started = Some(now);
        true
    }
}
