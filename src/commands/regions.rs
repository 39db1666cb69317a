use anyhow::Result;

use super::{RETRY_HINT, create_spinner};
use crate::client::Client;
use crate::preferences::Preferences;
use crate::render::{Render, render_error_banner};

pub async fn run(client: &Client) -> Result<()> {
    let spinner = create_spinner("Loading regions".to_string());
    let result = client.regions().await;
    spinner.finish_and_clear();

    let regions = match result {
        Ok(regions) => regions,
        Err(e) => {
            println!("{}", render_error_banner(&e, RETRY_HINT));
            return Ok(());
        }
    };

    let selected = Preferences::load()?.region;
    for info in regions {
        let marker = if info.id == selected { "*" } else { " " };
        println!("{} {}", marker, info.render());
    }

    Ok(())
}
