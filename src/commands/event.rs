use anyhow::Result;
use chrono_tz::Tz;
use owo_colors::OwoColorize;
use vatcal_core::{Event, Region};

use super::{RETRY_HINT, load_events};
use crate::client::Client;
use crate::render::{render_error_banner, render_event_details, render_status};

pub async fn run(client: &Client, id: i64, region: Region, tz: Tz) -> Result<()> {
    let page = match load_events(client, region).await {
        Ok(page) => page,
        Err(e) => {
            println!("{}", render_error_banner(&e, RETRY_HINT));
            return Ok(());
        }
    };

    match find_event(&page.events, id) {
        Some(event) => {
            println!("{}", render_event_details(event, &tz));
            println!();
            println!("{}", render_status(&page, &tz));
        }
        None => {
            println!(
                "{}",
                format!("Event #{} not found in {}", id, region.display_name()).red()
            );
            if region != Region::All {
                println!("  {}", "Try again with --region all".dimmed());
            }
        }
    }

    Ok(())
}

fn find_event(events: &[Event], id: i64) -> Option<&Event> {
    events.iter().find(|e| e.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn event(id: i64) -> Event {
        let start_time = Utc.with_ymd_and_hms(2024, 3, 20, 18, 0, 0).unwrap();
        Event {
            id,
            title: format!("Event {}", id),
            description: String::new(),
            short_description: String::new(),
            start_time,
            end_time: start_time + chrono::TimeDelta::hours(2),
            link: String::new(),
            banner: String::new(),
            airports: Vec::new(),
            routes: Vec::new(),
            organisers: Vec::new(),
        }
    }

    #[test]
    fn finds_by_id() {
        let events = vec![event(1), event(42), event(7)];

        assert_eq!(find_event(&events, 42).map(|e| e.title.as_str()), Some("Event 42"));
        assert!(find_event(&events, 99).is_none());
    }
}
