mod client;
mod commands;
mod preferences;
mod render;
mod timezone;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use vatcal_core::{Region, ViewMode};

use crate::client::{Client, DEFAULT_SERVER_URL};
use crate::preferences::Preferences;

#[derive(Parser)]
#[command(name = "vatcal")]
#[command(about = "Browse upcoming VATSIM network events on a calendar")]
struct Cli {
    /// Base URL of the vatcal-server to read events from
    #[arg(long, global = true, env = "VATCAL_SERVER", default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Time zone to show times in (e.g. "Europe/Zagreb"); defaults to the system zone
    #[arg(long, global = true)]
    tz: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the calendar for a day, three days or a week
    Show {
        /// Region to show ("EMEA" or "all"); defaults to the saved preference
        #[arg(short, long)]
        region: Option<Region>,

        /// View mode ("day", "3day" or "week"); defaults to the saved preference
        #[arg(short, long)]
        view: Option<ViewMode>,

        /// Show the view containing this date (YYYY-MM-DD) instead of today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Step through the calendar interactively
    Browse,
    /// Show every detail of one event
    Event {
        id: i64,

        /// Region to look the event up in; defaults to the saved preference
        #[arg(short, long)]
        region: Option<Region>,
    },
    /// Show or change saved preferences
    Prefs {
        #[arg(short, long)]
        region: Option<Region>,

        #[arg(short, long)]
        view: Option<ViewMode>,
    },
    /// List the regions events can be shown for
    Regions,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Show { region, view, date } => {
            let prefs = Preferences::load()?;
            let client = Client::new(&cli.server)?;
            let tz = timezone::resolve(cli.tz.as_deref())?;
            commands::show::run(
                &client,
                region.unwrap_or(prefs.region),
                view.unwrap_or(prefs.view),
                date,
                tz,
            )
            .await
        }
        Commands::Browse => {
            let prefs = Preferences::load()?;
            let client = Client::new(&cli.server)?;
            let tz = timezone::resolve(cli.tz.as_deref())?;
            commands::browse::run(&client, prefs, tz).await
        }
        Commands::Event { id, region } => {
            let prefs = Preferences::load()?;
            let client = Client::new(&cli.server)?;
            let tz = timezone::resolve(cli.tz.as_deref())?;
            commands::event::run(&client, id, region.unwrap_or(prefs.region), tz).await
        }
        Commands::Prefs { region, view } => commands::prefs::run(region, view),
        Commands::Regions => {
            let client = Client::new(&cli.server)?;
            commands::regions::run(&client).await
        }
    }
}
