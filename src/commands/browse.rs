use anyhow::Result;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use dialoguer::Select;
use owo_colors::OwoColorize;
use vatcal_core::view::{Direction, Navigator};
use vatcal_core::{Region, ViewMode};

use super::load_events;
use super::show::render_view;
use crate::client::{Client, EventsPage};
use crate::preferences::Preferences;
use crate::render::render_error_banner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Prev,
    Next,
    Today,
    SwitchView,
    SwitchRegion,
    Refresh,
    Quit,
}

impl Action {
    const ALL: [Action; 7] = [
        Action::Prev,
        Action::Next,
        Action::Today,
        Action::SwitchView,
        Action::SwitchRegion,
        Action::Refresh,
        Action::Quit,
    ];

    fn label(&self) -> &'static str {
        match self {
            Action::Prev => "← Previous",
            Action::Next => "Next →",
            Action::Today => "Today",
            Action::SwitchView => "Switch view",
            Action::SwitchRegion => "Switch region",
            Action::Refresh => "Refresh",
            Action::Quit => "Quit",
        }
    }
}

/// What the loop has to do after an action.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Redraw,
    Reload,
    Ignored,
    Quit,
}

/// Interactive calendar. Events are fetched once per region and reused
/// across moves; only Refresh and a region switch hit the server again.
pub async fn run(client: &Client, mut prefs: Preferences, tz: Tz) -> Result<()> {
    let today = Utc::now().with_timezone(&tz).date_naive();
    let mut nav = Navigator::new(today, prefs.view);
    let mut page: Option<EventsPage> = None;
    let mut cursor = 1;

    loop {
        let current = match page.take() {
            Some(current) => current,
            None => match load_events(client, prefs.region).await {
                Ok(loaded) => loaded,
                Err(e) => {
                    println!("{}", render_error_banner(&e, "Select Retry to try again."));
                    let choice = Select::new()
                        .with_prompt("  Events could not be loaded")
                        .items(&["Retry", "Quit"])
                        .default(0)
                        .interact()?;
                    if choice == 0 {
                        continue;
                    }
                    return Ok(());
                }
            },
        };

        println!();
        for line in render_view(&current, &nav.days(), nav.mode(), &tz, Utc::now()) {
            println!("{}", line);
        }
        println!();

        let labels: Vec<&str> = Action::ALL.iter().map(|a| a.label()).collect();
        cursor = Select::new().items(&labels).default(cursor).interact()?;
        let action = Action::ALL[cursor];

        let outcome = match action {
            Action::SwitchView => {
                let mode = pick_view(nav.mode())?;
                prefs.view = mode;
                save_quietly(&prefs);
                apply(&mut nav, action, today, Some(mode))
            }
            Action::SwitchRegion => {
                let region = pick_region(prefs.region)?;
                if region == prefs.region {
                    Outcome::Redraw
                } else {
                    prefs.region = region;
                    save_quietly(&prefs);
                    Outcome::Reload
                }
            }
            _ => apply(&mut nav, action, today, None),
        };

        match outcome {
            Outcome::Quit => return Ok(()),
            Outcome::Reload => {}
            Outcome::Redraw => page = Some(current),
            Outcome::Ignored => {
                println!("  {}", "Still moving, try again".dimmed());
                page = Some(current);
            }
        }
    }
}

/// Apply a navigation action to the navigator.
fn apply(nav: &mut Navigator, action: Action, today: NaiveDate, mode: Option<ViewMode>) -> Outcome {
    let moved = match action {
        Action::Prev => nav.navigate(Direction::Prev),
        Action::Next => nav.navigate(Direction::Next),
        Action::Today => nav.today(today),
        Action::SwitchView => {
            if let Some(mode) = mode {
                nav.set_mode(mode);
            }
            true
        }
        Action::Refresh | Action::SwitchRegion => return Outcome::Reload,
        Action::Quit => return Outcome::Quit,
    };

    if moved { Outcome::Redraw } else { Outcome::Ignored }
}

fn pick_view(current: ViewMode) -> Result<ViewMode> {
    let labels: Vec<&str> = ViewMode::ALL.iter().map(|v| v.label()).collect();
    let default = ViewMode::ALL.iter().position(|v| *v == current).unwrap_or(0);

    let selection = Select::new()
        .with_prompt("  View")
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(ViewMode::ALL[selection])
}

fn pick_region(current: Region) -> Result<Region> {
    let labels: Vec<&str> = Region::ALL.iter().map(|r| r.display_name()).collect();
    let default = Region::ALL.iter().position(|r| *r == current).unwrap_or(0);

    let selection = Select::new()
        .with_prompt("  Region")
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(Region::ALL[selection])
}

fn save_quietly(prefs: &Preferences) {
    if let Err(e) = prefs.save() {
        eprintln!("  {}", format!("Could not save preferences: {:#}", e).yellow());
    }
}
