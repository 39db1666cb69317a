use anyhow::Result;
use owo_colors::OwoColorize;
use vatcal_core::{Region, ViewMode};

use crate::preferences::Preferences;

pub fn run(region: Option<Region>, view: Option<ViewMode>) -> Result<()> {
    let mut prefs = Preferences::load()?;
    let changed = region.is_some() || view.is_some();

    if let Some(region) = region {
        prefs.region = region;
    }
    if let Some(view) = view {
        prefs.view = view;
    }

    if changed {
        prefs.save()?;
        println!("{}", "Preferences saved".green());
    }

    println!("{:<8} {} ({})", "Region:".dimmed(), prefs.region.display_name(), prefs.region.id());
    println!("{:<8} {}", "View:".dimmed(), prefs.view.label());
    println!("{}", Preferences::path()?.display().to_string().dimmed());

    Ok(())
}
