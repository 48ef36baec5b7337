//! Forecast providers.

use almanac_core::{NetworkError, ReqwestErrorExt};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use std::time::Duration;
use tracing::instrument;

use crate::types::{OneCallResponse, WeatherError, WEATHER_UNAVAILABLE};

const ONE_CALL_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Source of short weather labels ("Clear", "Rain", ...) for a place and day.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Forecast label for the given coordinates and calendar day.
    async fn forecast_label(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> Result<String, WeatherError>;

    /// Like [`forecast_label`](Self::forecast_label), but any failure is logged and
    /// reported as [`WEATHER_UNAVAILABLE`].
    async fn fetch(&self, latitude: f64, longitude: f64, date: NaiveDate) -> String {
        match self.forecast_label(latitude, longitude, date).await {
            Ok(label) => label,
            Err(e) => {
                tracing::warn!(
                    "Weather unavailable for ({}, {}) on {}: {}",
                    latitude,
                    longitude,
                    date,
                    e
                );
                WEATHER_UNAVAILABLE.to_string()
            }
        }
    }
}

/// Settings for [`OpenWeatherProvider`].
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: ONE_CALL_URL.to_string(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

/// OpenWeatherMap One Call 3.0 provider, matching daily forecasts by calendar day.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl OpenWeatherProvider {
    pub fn new(settings: ProviderSettings) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| WeatherError::Network(e.into_network_error()))?;

        Ok(Self {
            client,
            api_key: settings.api_key,
            base_url: settings.base_url,
        })
    }

    fn api_key(&self) -> Result<&str, WeatherError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != "undefined")
            .ok_or(WeatherError::MissingApiKey)
    }

    async fn fetch_daily(&self, latitude: f64, longitude: f64) -> Result<OneCallResponse, WeatherError> {
        let api_key = self.api_key()?;

        let url = format!(
            "{}?lat={}&lon={}&exclude=minutely,hourly,alerts&appid={}",
            self.base_url, latitude, longitude, api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.into_network_error()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Network(NetworkError::ServerError {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("unknown").to_string(),
            }));
        }

        response
            .json::<OneCallResponse>()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self), level = "debug")]
    async fn forecast_label(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> Result<String, WeatherError> {
        let forecast = self.fetch_daily(latitude, longitude).await?;
        let label = forecast.label_for(date)?;
        tracing::debug!("Forecast for {}: {}", date, label);
        Ok(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 15).unwrap()
    }

    #[test]
    fn test_default_settings() {
        let settings = ProviderSettings::default();
        assert_eq!(settings.base_url, ONE_CALL_URL);
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn test_placeholder_keys_are_missing() {
        for key in [None, Some(""), Some("   "), Some("undefined")] {
            let provider = OpenWeatherProvider::new(ProviderSettings {
                api_key: key.map(str::to_string),
                ..ProviderSettings::default()
            })
            .unwrap();
            assert!(matches!(provider.api_key(), Err(WeatherError::MissingApiKey)));
        }
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_request() {
        let provider = OpenWeatherProvider::new(ProviderSettings {
            base_url: "http://127.0.0.1:9/onecall".to_string(),
            ..ProviderSettings::default()
        })
        .unwrap();

        let err = provider.forecast_label(40.7, -74.0, day()).await.unwrap_err();
        assert!(matches!(err, WeatherError::MissingApiKey));
        assert_eq!(provider.fetch(40.7, -74.0, day()).await, WEATHER_UNAVAILABLE);
    }
}
