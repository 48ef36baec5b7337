//! City directory: fixed name → coordinates table used for forecasts.

use serde::{Deserialize, Serialize};

/// Built-in cities offered by the reminder form: (name, latitude, longitude).
const BUILTIN_CITIES: &[(&str, f64, f64)] = &[
    ("New York", 40.7128, -74.0060),
    ("Los Angeles", 34.0522, -118.2437),
    ("Chicago", 41.8781, -87.6298),
    ("Toronto", 43.6532, -79.3832),
    ("Mexico City", 19.4326, -99.1332),
    ("São Paulo", -23.5505, -46.6333),
    ("Buenos Aires", -34.6037, -58.3816),
    ("London", 51.5074, -0.1278),
    ("Paris", 48.8566, 2.3522),
    ("Berlin", 52.5200, 13.4050),
    ("Madrid", 40.4168, -3.7038),
    ("Rome", 41.9028, 12.4964),
    ("Cairo", 30.0444, 31.2357),
    ("Lagos", 6.5244, 3.3792),
    ("Dubai", 25.2048, 55.2708),
    ("Mumbai", 19.0760, 72.8777),
    ("Singapore", 1.3521, 103.8198),
    ("Beijing", 39.9042, 116.4074),
    ("Tokyo", 35.6762, 139.6503),
    ("Sydney", -33.8688, 151.2093),
];

/// A named place with coordinates in degrees. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    name: String,
    latitude: f64,
    longitude: f64,
}

impl City {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Lookup table from city name to [`City`].
#[derive(Debug, Clone)]
pub struct CityDirectory {
    cities: Vec<City>,
}

impl CityDirectory {
    /// Directory with the built-in list of major cities
    pub fn builtin() -> Self {
        let cities = BUILTIN_CITIES
            .iter()
            .map(|&(name, lat, lon)| City::new(name, lat, lon))
            .collect();
        Self { cities }
    }

    pub fn from_cities(cities: Vec<City>) -> Self {
        Self { cities }
    }

    /// Exact, case-sensitive match on the city name.
    pub fn lookup(&self, name: &str) -> Option<&City> {
        self.cities.iter().find(|city| city.name == name)
    }

    /// All cities in table order, for pickers.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }
}

impl Default for CityDirectory {
    fn default() -> Self {
        Self::builtin()
    }
}
