use almanac_core::NetworkError;
use chrono::{Local, NaiveDate, TimeZone};
use serde::Deserialize;

/// Label stored on a reminder when no forecast could be obtained.
pub const WEATHER_UNAVAILABLE: &str = "--";

/// Weather provider errors. These stay inside the provider; callers of
/// [`crate::WeatherProvider::fetch`] only ever see a label.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("OpenWeatherMap API key is not configured")]
    MissingApiKey,
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Forecast contained no daily entries")]
    NoForecast,
    #[error("{0} is beyond the forecast horizon")]
    BeyondHorizon(NaiveDate),
    #[error("{0} is before the first forecast day")]
    InPast(NaiveDate),
    #[error("No forecast entry for {0}")]
    NoMatchingDay(NaiveDate),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::MissingApiKey => "Weather API key is missing. Check settings.",
            WeatherError::Network(e) => e.user_message(),
            WeatherError::Parse(_) => "Weather service returned unexpected data.",
            WeatherError::NoForecast | WeatherError::NoMatchingDay(_) => {
                "No forecast available for that day."
            }
            WeatherError::BeyondHorizon(_) => "That day is too far ahead for a forecast.",
            WeatherError::InPast(_) => "That day is in the past.",
        }
    }
}

/// One Call API response; only the daily block is requested.
#[derive(Debug, Deserialize)]
pub struct OneCallResponse {
    #[serde(default)]
    pub daily: Vec<DailyEntry>,
}

#[derive(Debug, Deserialize)]
pub struct DailyEntry {
    /// Unix timestamp (seconds) somewhere within the forecast day
    pub dt: i64,
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ConditionEntry {
    pub main: String,
}

impl DailyEntry {
    /// The forecast day in host local time.
    pub fn local_date(&self) -> Option<NaiveDate> {
        Local
            .timestamp_opt(self.dt, 0)
            .single()
            .map(|dt| dt.date_naive())
    }
}

impl OneCallResponse {
    /// Condition label of the daily entry falling on `target`.
    pub fn label_for(&self, target: NaiveDate) -> Result<String, WeatherError> {
        let days: Vec<(NaiveDate, &DailyEntry)> = self
            .daily
            .iter()
            .filter_map(|entry| entry.local_date().map(|day| (day, entry)))
            .collect();

        if days.is_empty() {
            return Err(WeatherError::NoForecast);
        }

        if let Some(label) = days
            .iter()
            .find(|(day, _)| *day == target)
            .and_then(|(_, entry)| entry.weather.first())
            .map(|condition| condition.main.clone())
        {
            return Ok(label);
        }

        let first = days.iter().map(|(day, _)| *day).min();
        let last = days.iter().map(|(day, _)| *day).max();

        match (first, last) {
            (_, Some(last)) if target > last => Err(WeatherError::BeyondHorizon(target)),
            (Some(first), _) if target < first => Err(WeatherError::InPast(target)),
            _ => Err(WeatherError::NoMatchingDay(target)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn noon_timestamp(day: NaiveDate) -> i64 {
        Local
            .from_local_datetime(&day.and_hms_opt(12, 0, 0).unwrap())
            .earliest()
            .unwrap()
            .timestamp()
    }

    fn entry(day: NaiveDate, label: Option<&str>) -> DailyEntry {
        DailyEntry {
            dt: noon_timestamp(day),
            weather: label
                .map(|main| vec![ConditionEntry { main: main.to_string() }])
                .unwrap_or_default(),
        }
    }

    fn week_from(start: NaiveDate) -> OneCallResponse {
        let labels = ["Clear", "Clouds", "Rain", "Snow", "Clear", "Drizzle", "Clouds"];
        OneCallResponse {
            daily: labels
                .iter()
                .enumerate()
                .map(|(i, label)| entry(start + Duration::days(i as i64), Some(label)))
                .collect(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_label_for_matching_day() {
        let response = week_from(day(2024, 10, 14));
        assert_eq!(response.label_for(day(2024, 10, 16)).unwrap(), "Rain");
        assert_eq!(response.label_for(day(2024, 10, 14)).unwrap(), "Clear");
    }

    #[test]
    fn test_label_beyond_horizon() {
        let response = week_from(day(2024, 10, 14));
        let err = response.label_for(day(2024, 10, 30)).unwrap_err();
        assert!(matches!(err, WeatherError::BeyondHorizon(_)));
    }

    #[test]
    fn test_label_in_past() {
        let response = week_from(day(2024, 10, 14));
        let err = response.label_for(day(2024, 10, 1)).unwrap_err();
        assert!(matches!(err, WeatherError::InPast(_)));
    }

    #[test]
    fn test_label_gap_in_range() {
        let response = OneCallResponse {
            daily: vec![
                entry(day(2024, 10, 14), Some("Clear")),
                entry(day(2024, 10, 16), Some("Rain")),
            ],
        };
        let err = response.label_for(day(2024, 10, 15)).unwrap_err();
        assert!(matches!(err, WeatherError::NoMatchingDay(_)));
    }

    #[test]
    fn test_label_entry_without_conditions() {
        let response = OneCallResponse {
            daily: vec![entry(day(2024, 10, 14), None)],
        };
        let err = response.label_for(day(2024, 10, 14)).unwrap_err();
        assert!(matches!(err, WeatherError::NoMatchingDay(_)));
    }

    #[test]
    fn test_empty_daily_block() {
        let response: OneCallResponse = serde_json::from_str("{}").unwrap();
        let err = response.label_for(day(2024, 10, 14)).unwrap_err();
        assert!(matches!(err, WeatherError::NoForecast));
    }

    #[test]
    fn test_parses_api_shape() {
        let body = format!(
            r#"{{"lat":40.71,"lon":-74.0,"daily":[{{"dt":{},"temp":{{"day":18.2}},"weather":[{{"id":800,"main":"Clear","description":"clear sky"}}]}}]}}"#,
            noon_timestamp(day(2024, 10, 15))
        );
        let response: OneCallResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(response.label_for(day(2024, 10, 15)).unwrap(), "Clear");
    }

    #[test]
    fn test_user_messages() {
        assert!(WeatherError::MissingApiKey.user_message().contains("API key"));
        assert!(WeatherError::BeyondHorizon(day(2024, 1, 1))
            .user_message()
            .contains("too far"));
    }
}
