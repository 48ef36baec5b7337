//! Reminder entity and form validation.

use std::sync::LazyLock;

use almanac_weather::{City, CityDirectory};
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::Serialize;

use crate::error::ValidationError;

/// Longest accepted title, after trimming.
pub const TITLE_MAX_CHARS: usize = 30;

/// Strict 24-hour `HH:MM`, zero-padded
static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Infallible with a valid static pattern
    Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("Failed to compile time pattern")
});

static COLOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Infallible with a valid static pattern
    Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("Failed to compile color pattern")
});

/// Date shapes accepted besides plain `YYYY-MM-DD` and RFC 3339.
const LOCAL_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// City as supplied by a form or by older data.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CityInput {
    /// A city picked from the directory, carried by value
    Ref(City),
    /// Legacy name-only city, looked up in the directory
    Name(String),
    #[default]
    Absent,
}

impl CityInput {
    /// Resolve to a city. Unknown legacy names resolve to `None`.
    pub fn resolve(&self, directory: &CityDirectory) -> Option<City> {
        match self {
            Self::Ref(city) => Some(city.clone()),
            Self::Name(name) => {
                let city = directory.lookup(name).cloned();
                if city.is_none() {
                    tracing::debug!("Unknown city '{}', storing reminder without a city", name);
                }
                city
            }
            Self::Absent => None,
        }
    }
}

impl From<City> for CityInput {
    fn from(city: City) -> Self {
        Self::Ref(city)
    }
}

impl From<Option<City>> for CityInput {
    fn from(city: Option<City>) -> Self {
        city.map_or(Self::Absent, Self::Ref)
    }
}

/// Raw reminder fields as entered in the reminder form.
#[derive(Debug, Clone, Default)]
pub struct ReminderDraft {
    pub title: String,
    /// Calendar date; `None` or blank means not entered
    pub date: Option<String>,
    /// Time of day, `HH:MM`
    pub time: String,
    /// Hex color, `#RGB` or `#RRGGBB`
    pub color: String,
    pub city: CityInput,
    /// Pre-supplied weather label; skips the forecast lookup on add
    pub weather: Option<String>,
}

impl ReminderDraft {
    pub fn new(
        title: impl Into<String>,
        date: NaiveDate,
        time: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            date: Some(date.format("%Y-%m-%d").to_string()),
            time: time.into(),
            color: color.into(),
            ..Self::default()
        }
    }

    pub fn with_city(mut self, city: impl Into<CityInput>) -> Self {
        self.city = city.into();
        self
    }

    pub fn with_weather(mut self, weather: impl Into<String>) -> Self {
        self.weather = Some(weather.into());
        self
    }

    /// Validate the form fields, returning the merged date and time.
    pub fn validate(&self) -> Result<NaiveDateTime, ValidationError> {
        validate(&self.title, self.date.as_deref(), &self.time, &self.color)
    }
}

/// Validate raw form fields in the order title, date, time, color and stop at
/// the first failure. On success returns the date at the given time of day.
pub fn validate(
    title: &str,
    date: Option<&str>,
    time: &str,
    color: &str,
) -> Result<NaiveDateTime, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(ValidationError::TitleTooLong);
    }

    let date = match date.map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => parse_date(raw).ok_or(ValidationError::DateInvalid)?,
        None => return Err(ValidationError::DateRequired),
    };

    if time.trim().is_empty() {
        return Err(ValidationError::TimeRequired);
    }
    if !TIME_PATTERN.is_match(time) {
        return Err(ValidationError::TimeFormatInvalid);
    }
    let time_of_day =
        NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| ValidationError::TimeFormatInvalid)?;

    if color.trim().is_empty() {
        return Err(ValidationError::ColorRequired);
    }
    if !COLOR_PATTERN.is_match(color) {
        return Err(ValidationError::ColorFormatInvalid);
    }

    Ok(date.and_time(time_of_day))
}

/// Calendar date of a form value. Only the date part of a date-time is kept;
/// values with an offset are converted to local time first.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    LOCAL_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Local).date_naive())
        })
}

/// A validated reminder. Only [`crate::ReminderStore`] creates these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reminder {
    id: u64,
    title: String,
    instant: NaiveDateTime,
    color: String,
    city: Option<City>,
    weather: Option<String>,
}

impl Reminder {
    /// Build from fields that already passed [`validate`].
    pub(crate) fn from_validated(
        id: u64,
        title: &str,
        instant: NaiveDateTime,
        color: String,
        city: Option<City>,
        weather: Option<String>,
    ) -> Self {
        Self {
            id,
            title: title.trim().to_string(),
            instant,
            color,
            city,
            weather,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Local date and time of the reminder
    pub fn instant(&self) -> NaiveDateTime {
        self.instant
    }

    pub fn date(&self) -> NaiveDate {
        self.instant.date()
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn city(&self) -> Option<&City> {
        self.city.as_ref()
    }

    /// Forecast label; `"--"` when the lookup failed, `None` when none was requested
    pub fn weather(&self) -> Option<&str> {
        self.weather.as_deref()
    }

    /// Same year, month and day, ignoring the time of day.
    pub fn is_same_calendar_day<D: Datelike>(&self, other: &D) -> bool {
        self.instant.year() == other.year()
            && self.instant.month() == other.month()
            && self.instant.day() == other.day()
    }
}
