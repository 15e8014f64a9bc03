use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Current conditions at a named place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: String,
    pub description: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
}

/// One rendered day of a forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub description: String,
    pub temperature_c: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Raw forecast slot as returned by the provider, in provider order.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    /// Combined date-time text, e.g. `2024-05-01 12:00:00`.
    pub dt_txt: String,
    pub description: String,
    pub temperature_c: f64,
}
