//! Demo reminders shown on a fresh start.

use chrono::NaiveDate;

use crate::error::ReminderError;
use crate::reminder::{CityInput, ReminderDraft};
use crate::store::ReminderStore;

const SAMPLE_CITY: &str = "New York";
const SAMPLE_WEATHER: &str = "Sunny";

/// (title, time, color, tomorrow)
const SAMPLES: &[(&str, &str, &str, bool)] = &[
    ("Take care of the dog", "10:00", "#ff4444", false),
    ("Walk the cat", "10:08", "#44ff44", false),
    ("Buy groceries", "10:25", "#4444ff", false),
    ("Prepare dinner for 35 people", "10:50", "#ffaa00", false),
    ("Read a book", "11:23", "#aa00ff", false),
    ("Exercise", "12:05", "#00aaff", false),
    ("Build a new lego set", "10:00", "#ff6699", true),
    ("Test Reminder", "11:23", "#99ff66", true),
];

/// Drafts for the demo reminders, spread over `today` and the day after.
///
/// They carry a city by name and a weather label, so adding them never calls
/// the forecast provider.
pub fn demo_drafts(today: NaiveDate) -> Vec<ReminderDraft> {
    let tomorrow = today.succ_opt().unwrap_or(today);

    SAMPLES
        .iter()
        .map(|&(title, time, color, next_day)| {
            let date = if next_day { tomorrow } else { today };
            ReminderDraft::new(title, date, time, color)
                .with_city(CityInput::Name(SAMPLE_CITY.to_string()))
                .with_weather(SAMPLE_WEATHER)
        })
        .collect()
}

/// Add the demo reminders to `store`. Returns how many were added.
pub async fn seed(store: &mut ReminderStore, today: NaiveDate) -> Result<usize, ReminderError> {
    let drafts = demo_drafts(today);
    let count = drafts.len();
    for draft in drafts {
        store.add(draft).await?;
    }
    tracing::info!("Seeded {} sample reminders", count);
    Ok(count)
}
