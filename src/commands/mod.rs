pub mod browse;
pub mod event;
pub mod prefs;
pub mod regions;
pub mod show;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use vatcal_core::Region;

use crate::client::{Client, EventsPage};

/// Shown under a failed load in one-shot commands.
pub const RETRY_HINT: &str = "Check that vatcal-server is running, then run the command again to retry.";

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["-", "\\", "|", "/"])
        .template("{msg} {spinner}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Fetch the events of a region behind a loading spinner.
pub async fn load_events(client: &Client, region: Region) -> Result<EventsPage> {
    let spinner = create_spinner(format!("Loading {} events", region.display_name()));
    let result = client.events(region).await;
    spinner.finish_and_clear();
    result
}
