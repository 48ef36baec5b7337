//! Integration tests for OpenWeatherProvider using wiremock.

use std::time::Duration;

use almanac_core::NetworkError;
use almanac_weather::{
    OpenWeatherProvider, ProviderSettings, WeatherError, WeatherProvider, WEATHER_UNAVAILABLE,
};
use chrono::{Local, NaiveDate, TimeZone};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ONE_CALL_PATH: &str = "/data/3.0/onecall";

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, d).unwrap()
}

/// Daily entry stamped at local noon, as the API does for each forecast day
fn daily(date: NaiveDate, main: &str) -> serde_json::Value {
    let dt = Local
        .from_local_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
        .earliest()
        .unwrap()
        .timestamp();
    serde_json::json!({
        "dt": dt,
        "temp": { "day": 17.5 },
        "weather": [{ "id": 500, "main": main, "description": "n/a" }]
    })
}

fn provider_for(server: &MockServer, api_key: Option<&str>) -> OpenWeatherProvider {
    OpenWeatherProvider::new(ProviderSettings {
        api_key: api_key.map(str::to_string),
        base_url: format!("{}{}", server.uri(), ONE_CALL_PATH),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetch_matches_calendar_day() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ONE_CALL_PATH))
        .and(query_param("lat", "40.7128"))
        .and(query_param("lon", "-74.006"))
        .and(query_param("exclude", "minutely,hourly,alerts"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "daily": [
                daily(day(14), "Clear"),
                daily(day(15), "Rain"),
                daily(day(16), "Clouds"),
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, Some("test-key"));
    let label = provider.fetch(40.7128, -74.006, day(15)).await;

    assert_eq!(label, "Rain");
}

#[tokio::test]
async fn test_non_success_status_is_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ONE_CALL_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key"
        })))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, Some("bad-key"));

    let err = provider.forecast_label(40.7, -74.0, day(15)).await.unwrap_err();
    assert!(
        matches!(err, WeatherError::Network(NetworkError::ServerError { status: 401, .. })),
        "unexpected error: {err}"
    );

    assert_eq!(provider.fetch(40.7, -74.0, day(15)).await, WEATHER_UNAVAILABLE);
}

#[tokio::test]
async fn test_malformed_body_is_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ONE_CALL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, Some("test-key"));

    let err = provider.forecast_label(40.7, -74.0, day(15)).await.unwrap_err();
    assert!(matches!(err, WeatherError::Parse(_)));
    assert_eq!(provider.fetch(40.7, -74.0, day(15)).await, WEATHER_UNAVAILABLE);
}

#[tokio::test]
async fn test_date_outside_forecast_is_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ONE_CALL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "daily": [daily(day(14), "Clear"), daily(day(15), "Rain")]
        })))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, Some("test-key"));

    let err = provider.forecast_label(40.7, -74.0, day(28)).await.unwrap_err();
    assert!(matches!(err, WeatherError::BeyondHorizon(_)));

    let err = provider.forecast_label(40.7, -74.0, day(2)).await.unwrap_err();
    assert!(matches!(err, WeatherError::InPast(_)));

    assert_eq!(provider.fetch(40.7, -74.0, day(28)).await, WEATHER_UNAVAILABLE);
}

#[tokio::test]
async fn test_missing_key_never_hits_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, None);
    assert_eq!(provider.fetch(40.7, -74.0, day(15)).await, WEATHER_UNAVAILABLE);
}
