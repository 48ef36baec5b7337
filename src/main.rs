use std::sync::Arc;
use std::time::Duration;

use almanac_core::Config;
use almanac_reminders::{samples, ReminderStore};
use almanac_weather::{CityDirectory, OpenWeatherProvider, ProviderSettings};
use anyhow::{Context, Result};
use chrono::Local;

#[tokio::main]
async fn main() -> Result<()> {
    almanac_core::init()?;

    let (config, _warnings) = Config::load_validated()?;

    let provider = OpenWeatherProvider::new(ProviderSettings {
        api_key: config.weather.resolved_api_key(),
        base_url: config.weather.base_url.clone(),
        timeout: Duration::from_secs(config.weather.timeout_secs),
    })
    .context("Failed to create weather provider")?;

    let mut store = ReminderStore::new(Arc::new(provider), CityDirectory::builtin());

    let today = Local::now().date_naive();
    if config.reminders.seed_samples {
        samples::seed(&mut store, today)
            .await
            .context("Failed to seed sample reminders")?;
    }

    tracing::info!("Almanac started with {} reminders", store.len());

    println!("Almanac - reminders for {}", today.format("%A, %B %-d, %Y"));
    let agenda = store.query_by_day(&today);
    if agenda.is_empty() {
        println!("  Nothing scheduled.");
    }
    for reminder in agenda {
        let place = reminder.city().map(|c| c.name()).unwrap_or("-");
        let weather = reminder.weather().unwrap_or("");
        println!(
            "  {}  {:<30}  {}  {} {}",
            reminder.instant().format("%H:%M"),
            reminder.title(),
            reminder.color(),
            place,
            weather
        );
    }

    Ok(())
}
