//! In-memory reminder collection.
//!
//! Mutations run as validate → await the forecast → commit, so a failed or
//! pending call never leaves a partial change behind. `add` and `update` take
//! `&mut self`, which keeps them from overlapping.

use std::sync::Arc;

use almanac_weather::{City, CityDirectory, WeatherProvider};
use chrono::{Datelike, NaiveDateTime};
use tracing::instrument;

use crate::error::ReminderError;
use crate::reminder::{Reminder, ReminderDraft};

/// Reminders in insertion order plus the id counter.
pub struct ReminderStore {
    reminders: Vec<Reminder>,
    next_id: u64,
    provider: Arc<dyn WeatherProvider>,
    cities: CityDirectory,
}

impl ReminderStore {
    pub fn new(provider: Arc<dyn WeatherProvider>, cities: CityDirectory) -> Self {
        Self {
            reminders: Vec::new(),
            next_id: 0,
            provider,
            cities,
        }
    }

    /// Current reminders in insertion order.
    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    /// Directory used to resolve name-only cities.
    pub fn cities(&self) -> &CityDirectory {
        &self.cities
    }

    /// Validate and store a new reminder.
    ///
    /// When the draft has a city and no weather label, the forecast for the
    /// reminder's day is fetched first; a failed lookup stores `"--"`.
    #[instrument(skip(self, draft), fields(title = %draft.title), level = "info")]
    pub async fn add(&mut self, draft: ReminderDraft) -> Result<&Reminder, ReminderError> {
        let instant = draft.validate().inspect_err(|e| {
            tracing::debug!("Rejected new reminder: {}", e);
        })?;
        let city = draft.city.resolve(&self.cities);

        let weather = match (&city, draft.weather) {
            (Some(city), None) => Some(self.forecast(city, instant).await),
            (_, supplied) => supplied,
        };

        let id = self.next_id;
        self.next_id += 1;

        let reminder =
            Reminder::from_validated(id, &draft.title, instant, draft.color, city, weather);
        tracing::info!("Added reminder {} at {}", id, instant);

        let index = self.reminders.len();
        self.reminders.push(reminder);
        Ok(&self.reminders[index])
    }

    /// Replace the reminder with `id` by one built from `draft`, keeping its id.
    ///
    /// The forecast is fetched again only when the city or the date and time
    /// changed; otherwise the current label is kept. Weather labels carried by
    /// the draft are ignored here.
    #[instrument(skip(self, draft), level = "info")]
    pub async fn update(&mut self, id: u64, draft: ReminderDraft) -> Result<&Reminder, ReminderError> {
        let index = self.position(id).ok_or(ReminderError::NotFound(id))?;

        let instant = draft.validate().inspect_err(|e| {
            tracing::debug!("Rejected update of reminder {}: {}", id, e);
        })?;
        let city = draft.city.resolve(&self.cities);

        let existing = &self.reminders[index];
        let moved = city.as_ref() != existing.city() || instant != existing.instant();
        let current_weather = existing.weather().map(str::to_string);

        let weather = if moved {
            match &city {
                Some(city) => Some(self.forecast(city, instant).await),
                None => None,
            }
        } else {
            current_weather
        };

        self.reminders[index] =
            Reminder::from_validated(id, &draft.title, instant, draft.color, city, weather);
        tracing::info!("Updated reminder {}", id);

        Ok(&self.reminders[index])
    }

    /// Remove the reminder with `id`. Returns false when there was none.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.reminders.len();
        self.reminders.retain(|reminder| reminder.id() != id);
        let removed = self.reminders.len() != before;
        if removed {
            tracing::info!("Removed reminder {}", id);
        }
        removed
    }

    /// Reminders on the given calendar day, earliest first. Reminders at the
    /// same time keep their insertion order.
    pub fn query_by_day<D: Datelike>(&self, day: &D) -> Vec<&Reminder> {
        let mut on_day: Vec<&Reminder> = self
            .reminders
            .iter()
            .filter(|reminder| reminder.is_same_calendar_day(day))
            .collect();
        on_day.sort_by_key(|reminder| reminder.instant());
        on_day
    }

    /// Remove every reminder on the given calendar day. Returns how many were removed.
    pub fn remove_all_on_day<D: Datelike>(&mut self, day: &D) -> usize {
        let before = self.reminders.len();
        self.reminders
            .retain(|reminder| !reminder.is_same_calendar_day(day));
        let removed = before - self.reminders.len();
        tracing::info!(
            "Removed {} reminder(s) on {}-{:02}-{:02}",
            removed,
            day.year(),
            day.month(),
            day.day()
        );
        removed
    }

    pub fn get(&self, id: u64) -> Option<&Reminder> {
        self.reminders.iter().find(|reminder| reminder.id() == id)
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.reminders.iter().position(|reminder| reminder.id() == id)
    }

    async fn forecast(&self, city: &City, instant: NaiveDateTime) -> String {
        self.provider
            .fetch(city.latitude(), city.longitude(), instant.date())
            .await
    }
}

impl std::fmt::Debug for ReminderStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReminderStore")
            .field("reminders", &self.reminders)
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}
