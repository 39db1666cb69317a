//! Terminal rendering of calendar views.
//!
//! Extension trait and helpers that turn vatcal-core layouts into colored
//! lines using owo_colors.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use owo_colors::OwoColorize;
use vatcal_core::api::RegionInfo;
use vatcal_core::layout::{DayLayout, PlacedEvent, hourly_slots, time_as_percentage};
use vatcal_core::{Event, Region, ViewMode};

use crate::client::EventsPage;

/// Number of cells the 24-hour timeline is drawn with (one per 30 minutes).
const TRACK_WIDTH: usize = 48;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for RegionInfo {
    fn render(&self) -> String {
        format!("{:<6} {}", self.id.id().bold(), self.name)
    }
}

/// Status line: last update in the viewer's zone, cache marker and any server warning.
pub fn render_status(page: &EventsPage, tz: &Tz) -> String {
    let updated = match page.last_updated {
        Some(t) => format!("Updated {}", t.with_timezone(tz).format("%Y-%m-%d %H:%M:%S %Z")),
        None => "Never updated".to_string(),
    };
    let source = match (page.cached, page.stale) {
        (_, true) => "cached (stale)",
        (true, false) => "cached",
        (false, false) => "live",
    };

    let mut line = format!("{} · {}", updated, source).dimmed().to_string();
    if let Some(warning) = &page.warning {
        line.push_str(&format!("\n{} {}", "⚠".yellow(), warning.yellow()));
    }
    line
}

/// Header above the day list, e.g. "Mar 18 - Mar 24, 2024 · Europe, Middle East & Africa (Week)".
pub fn render_header(range_label: &str, region: Region, mode: ViewMode) -> String {
    format!(
        "{} · {} {}",
        range_label.bold(),
        region.display_name(),
        format!("({})", mode.label()).dimmed()
    )
}

pub fn render_day_heading(day: NaiveDate, today: NaiveDate) -> String {
    let label = day.format("%a %b %-d").to_string();
    if day == today {
        format!("{} {}", label.cyan().bold(), "(today)".cyan())
    } else if matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
        label.dimmed().to_string()
    } else {
        label.bold().to_string()
    }
}

/// Hour labels positioned over the timeline track.
pub fn render_ruler() -> String {
    let mut ruler = vec![' '; TRACK_WIDTH + 5];
    for slot in hourly_slots().into_iter().filter(|s| s.hour % 6 == 0) {
        let start = cell(slot.percentage);
        for (i, c) in slot.label.chars().enumerate() {
            if let Some(pos) = ruler.get_mut(start + i) {
                *pos = c;
            }
        }
    }
    let ruler: String = ruler.into_iter().collect();
    format!("{:13}{}", "", ruler.trim_end().dimmed())
}

/// One day: all-day lane first, then the timed events in column order.
/// Today also gets a current-time row among its timed events.
pub fn render_day(layout: &DayLayout<'_>, tz: &Tz, now: DateTime<Utc>) -> Vec<String> {
    let local_now = now.with_timezone(tz);
    let is_today = layout.day == local_now.date_naive();
    let mut lines = vec![render_day_heading(layout.day, local_now.date_naive())];

    if layout.is_empty() {
        lines.push(format!("  {}", "No events".dimmed()));
        if !is_today {
            return lines;
        }
    }

    for event in &layout.all_day {
        lines.push(render_all_day(event, tz));
    }

    let now_percentage = time_as_percentage(&local_now);
    let mut now_pending = is_today;
    for placed in &layout.timed {
        if now_pending && placed.position.top > now_percentage {
            lines.push(render_now(&local_now, now_percentage));
            now_pending = false;
        }
        lines.push(render_timed(placed, layout.day, tz));
    }
    if now_pending {
        lines.push(render_now(&local_now, now_percentage));
    }

    lines
}

/// Current-time marker on the timeline track.
fn render_now(now: &DateTime<Tz>, percentage: f64) -> String {
    let at = cell(percentage).min(TRACK_WIDTH - 1);
    format!(
        "  {:<11}{}{}{} {}",
        now.format("%H:%M").to_string().red(),
        "─".repeat(at).red(),
        "┃".red().bold(),
        "─".repeat(TRACK_WIDTH - at - 1).red(),
        "now".red()
    )
}

fn render_all_day(event: &Event, tz: &Tz) -> String {
    let start = event.start_time.with_timezone(tz);
    let end = event.end_time.with_timezone(tz);
    let span = format!("{} - {}", start.format("%b %-d %H:%M"), end.format("%b %-d %H:%M"));

    format!(
        "  {:<11}{} {} {}",
        "all day".magenta(),
        event.title.bold(),
        format!("#{}", event.id).dimmed(),
        format!("({})", span).dimmed()
    )
}

fn render_timed(placed: &PlacedEvent<'_>, day: NaiveDate, tz: &Tz) -> String {
    let event = placed.event;
    let start = event.start_time.with_timezone(tz);
    let end = event.end_time.with_timezone(tz);

    let mut time = format!("{}-{}", start.format("%H:%M"), end.format("%H:%M"));
    if end.date_naive() > day {
        time.push('+');
    }

    let column = if placed.layout.total_columns > 1 {
        format!(
            " [{}/{}]",
            placed.layout.column + 1,
            placed.layout.total_columns
        )
    } else {
        String::new()
    };

    format!(
        "  {:<11}{} {} {}{}",
        time.green(),
        render_track(placed.position.top, placed.position.height),
        event.title.bold(),
        format!("#{}", event.id).dimmed(),
        column.yellow()
    )
}

/// Timeline cell for a vertical percentage.
fn cell(percentage: f64) -> usize {
    ((percentage / 100.0) * TRACK_WIDTH as f64).floor().clamp(0.0, TRACK_WIDTH as f64) as usize
}

/// Draw the vertical placement as a filled range on a 24-hour track.
fn render_track(top: f64, height: f64) -> String {
    let start = cell(top).min(TRACK_WIDTH - 1);
    let end = ((top + height) / 100.0 * TRACK_WIDTH as f64)
        .ceil()
        .clamp(0.0, TRACK_WIDTH as f64) as usize;
    let end = end.max(start + 1);

    format!(
        "{}{}{}",
        "·".repeat(start).dimmed(),
        "█".repeat(end - start).blue(),
        "·".repeat(TRACK_WIDTH - end).dimmed()
    )
}

/// Every field of a single event.
pub fn render_event_details(event: &Event, tz: &Tz) -> String {
    let start = event.start_time.with_timezone(tz);
    let end = event.end_time.with_timezone(tz);

    let mut lines = vec![
        format!("{} {}", event.title.bold(), format!("#{}", event.id).dimmed()),
        format!(
            "{} - {}",
            start.format("%a %b %-d %Y %H:%M"),
            end.format("%a %b %-d %Y %H:%M %Z")
        )
        .green()
        .to_string(),
    ];

    if !event.short_description.is_empty() {
        lines.push(String::new());
        lines.push(event.short_description.italic().to_string());
    }
    if !event.description.is_empty() && event.description != event.short_description {
        lines.push(String::new());
        lines.push(event.description.clone());
    }

    lines.push(String::new());
    if !event.airports.is_empty() {
        lines.push(field("Airports", &event.airports.join(", ")));
    }
    for (i, route) in event.routes.iter().enumerate() {
        let label = if i == 0 { "Routes" } else { "" };
        let text = format!("{} → {}  {}", route.departure, route.arrival, route.route);
        lines.push(field(label, text.trim_end()));
    }
    if !event.organisers.is_empty() {
        lines.push(field("Organisers", &event.organisers.join(", ")));
    }
    if !event.link.is_empty() {
        lines.push(field("Link", &event.link.underline().to_string()));
    }
    if !event.banner.is_empty() {
        lines.push(field("Banner", &event.banner));
    }

    lines.join("\n")
}

fn field(label: &str, value: &str) -> String {
    let label = if label.is_empty() {
        String::new()
    } else {
        format!("{}:", label)
    };
    format!("{:<12} {}", label.dimmed(), value)
}

/// Banner for a failed load, with what to do next.
pub fn render_error_banner(err: &anyhow::Error, hint: &str) -> String {
    format!(
        "{} {}\n  {}",
        "✗".red(),
        format!("{:#}", err).red(),
        hint.dimmed()
    )
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use vatcal_core::Route;
    use vatcal_core::layout::layout_day;

    fn event(id: i64, title: &str, start: (u32, u32), end: (u32, u32)) -> Event {
        Event {
            id,
            title: title.to_string(),
            description: String::new(),
            short_description: String::new(),
            start_time: Utc.with_ymd_and_hms(2024, 3, start.0, start.1, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2024, 3, end.0, end.1, 0, 0).unwrap(),
            link: String::new(),
            banner: String::new(),
            airports: Vec::new(),
            routes: Vec::new(),
            organisers: Vec::new(),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn at(d: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, h, m, 0).unwrap()
    }

    #[test]
    fn track_covers_event_range() {
        // 06:00 - 12:00
        let track = render_track(25.0, 25.0);
        assert_eq!(track.matches('█').count(), 12);
        assert_eq!(track.matches('·').count(), 36);
    }

    #[test]
    fn short_events_get_at_least_one_cell() {
        let track = render_track(99.9, 2.0);
        assert_eq!(track.matches('█').count(), 1);
        assert_eq!(track.matches('·').count(), TRACK_WIDTH - 1);
    }

    #[test]
    fn day_lists_all_day_then_timed_events() {
        let events = vec![
            event(1, "Adriatic Overload", (20, 18), (20, 21)),
            event(2, "Cross the Pond", (20, 10), (21, 10)),
            event(3, "Friday Night Ops", (20, 19), (20, 22)),
        ];
        let layout = layout_day(&events, day(20), &Tz::UTC);
        let lines = render_day(&layout, &Tz::UTC, at(19, 12, 0));

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Wed Mar 20"));
        assert!(lines[1].contains("all day"));
        assert!(lines[1].contains("Cross the Pond"));
        assert!(lines[2].contains("18:00-21:00"));
        assert!(lines[2].contains("[1/2]"));
        assert!(lines[3].contains("19:00-22:00"));
        assert!(lines[3].contains("[2/2]"));
    }

    #[test]
    fn empty_day_says_so() {
        let layout = layout_day(&[], day(20), &Tz::UTC);
        let lines = render_day(&layout, &Tz::UTC, at(21, 12, 0));

        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("No events"));
    }

    #[test]
    fn today_gets_a_now_marker_between_events() {
        let events = vec![
            event(1, "Adriatic Overload", (20, 18), (20, 21)),
            event(3, "Friday Night Ops", (20, 19), (20, 22)),
        ];
        let layout = layout_day(&events, day(20), &Tz::UTC);
        let lines = render_day(&layout, &Tz::UTC, at(20, 18, 30));

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("(today)"));
        assert!(lines[1].contains("Adriatic Overload"));
        assert!(lines[2].contains("18:30"));
        assert!(lines[2].contains("now"));
        assert!(lines[3].contains("Friday Night Ops"));
    }

    #[test]
    fn now_marker_sits_at_current_time() {
        // 12:00 is the middle of the track
        let line = render_now(&at(20, 12, 0).with_timezone(&Tz::UTC), 50.0);
        let before = line.split('┃').next().unwrap();
        assert_eq!(before.matches('─').count(), TRACK_WIDTH / 2);
    }

    #[test]
    fn empty_today_still_shows_now() {
        let layout = layout_day(&[], day(20), &Tz::UTC);
        let lines = render_day(&layout, &Tz::UTC, at(20, 9, 15));

        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("No events"));
        assert!(lines[2].contains("09:15"));
    }

    #[test]
    fn times_follow_viewer_zone() {
        let events = vec![event(1, "Adriatic Overload", (20, 18), (20, 21))];
        let tz: Tz = "Europe/Zagreb".parse().unwrap();
        let layout = layout_day(&events, day(20), &tz);
        let lines = render_day(&layout, &tz, at(19, 12, 0));

        assert!(lines[1].contains("19:00-22:00"));
    }

    #[test]
    fn crossing_midnight_is_marked() {
        let events = vec![event(1, "Late Night Ops", (20, 22), (21, 2))];
        let layout = layout_day(&events, day(20), &Tz::UTC);
        let lines = render_day(&layout, &Tz::UTC, at(19, 12, 0));

        assert!(lines[1].contains("22:00-02:00+"));
    }

    #[test]
    fn details_include_routes_and_organisers() {
        let mut e = event(42, "Adriatic Overload", (20, 18), (20, 21));
        e.airports = vec!["LDZA".to_string(), "LDSP".to_string()];
        e.routes = vec![Route {
            departure: "LDZA".to_string(),
            arrival: "LDSP".to_string(),
            route: "ZAG UL607 SPL".to_string(),
        }];
        e.organisers = vec!["ADR (EMEA)".to_string()];

        let details = render_event_details(&e, &Tz::UTC);
        assert!(details.contains("LDZA, LDSP"));
        assert!(details.contains("LDZA → LDSP  ZAG UL607 SPL"));
        assert!(details.contains("ADR (EMEA)"));
    }

    #[test]
    fn status_line_shows_stale_warning() {
        let page = EventsPage {
            region: Region::Emea,
            events: Vec::new(),
            cached: true,
            stale: true,
            last_updated: Some(Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap()),
            warning: Some("API unavailable, serving cached data".to_string()),
        };
        let tz: Tz = "Europe/Zagreb".parse().unwrap();
        let status = render_status(&page, &tz);

        assert!(status.contains("cached (stale)"));
        assert!(status.contains("13:00:00 CET"));
        assert!(status.contains("API unavailable, serving cached data"));
    }

    #[test]
    fn pluralizes() {
        assert_eq!(pluralize("event", 1), "event");
        assert_eq!(pluralize("event", 3), "events");
    }
}
