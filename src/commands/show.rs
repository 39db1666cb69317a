use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use vatcal_core::layout::layout_day;
use vatcal_core::view::{format_view_range, view_days};
use vatcal_core::{Region, ViewMode};

use super::{RETRY_HINT, load_events};
use crate::client::{Client, EventsPage};
use crate::render::{
    pluralize, render_day, render_error_banner, render_header, render_ruler, render_status,
};

pub async fn run(client: &Client, region: Region, view: ViewMode, date: Option<NaiveDate>, tz: Tz) -> Result<()> {
    let now = Utc::now();
    let anchor = date.unwrap_or_else(|| now.with_timezone(&tz).date_naive());

    let page = match load_events(client, region).await {
        Ok(page) => page,
        Err(e) => {
            println!("{}", render_error_banner(&e, RETRY_HINT));
            return Ok(());
        }
    };

    for line in render_view(&page, &view_days(anchor, view), view, &tz, now) {
        println!("{}", line);
    }

    Ok(())
}

/// Header, hour ruler, every visible day and the status line.
pub fn render_view(page: &EventsPage, days: &[NaiveDate], mode: ViewMode, tz: &Tz, now: DateTime<Utc>) -> Vec<String> {
    let mut lines = vec![render_header(&format_view_range(days, mode), page.region, mode)];
    lines.push(render_ruler());

    let mut shown = 0;
    for day in days {
        let layout = layout_day(&page.events, *day, tz);
        shown += layout.all_day.len() + layout.timed.len();
        lines.push(String::new());
        lines.extend(render_day(&layout, tz, now));
    }

    lines.push(String::new());
    lines.push(format!(
        "{} {} in view · {}",
        shown,
        pluralize("event", shown),
        tz.name()
    ));
    lines.push(render_status(page, tz));
    lines
}
