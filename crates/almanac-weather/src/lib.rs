//! Weather lookups for reminders.
//!
//! Provides the built-in city directory and a forecast provider backed by the
//! OpenWeatherMap One Call API. Providers never fail past [`WeatherProvider::fetch`];
//! every failure becomes the [`WEATHER_UNAVAILABLE`] label.

pub mod location;
pub mod provider;
pub mod types;

pub use location::{City, CityDirectory};
pub use provider::{OpenWeatherProvider, ProviderSettings, WeatherProvider};
pub use types::{WeatherError, WEATHER_UNAVAILABLE};
