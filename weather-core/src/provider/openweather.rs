use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    ProviderError,
    model::{ForecastEntry, GeoCoordinate, WeatherSnapshot},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const CURRENT_PATH: &str = "/data/2.5/weather";
const GEOCODE_PATH: &str = "/geo/1.0/direct";
const FORECAST_PATH: &str = "/data/2.5/forecast";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    lang: &'static str,
    http: Client,
}

pub struct OpenWeatherProviderBuilder {
    api_key: String,
    base_url: String,
    lang: &'static str,
    timeout: Duration,
}

impl OpenWeatherProviderBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn lang(mut self, lang: &'static str) -> Self {
        self.lang = lang;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<OpenWeatherProvider> {
        let http = Client::builder()
            .timeout(self.timeout)
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;

        Ok(OpenWeatherProvider {
            api_key: self.api_key,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            lang: self.lang,
            http,
        })
    }
}

impl OpenWeatherProvider {
    pub fn builder(api_key: String) -> OpenWeatherProviderBuilder {
        OpenWeatherProviderBuilder {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            lang: "ru",
            timeout: DEFAULT_TIMEOUT,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, ?query, "OpenWeather request");

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                endpoint,
                source: source.without_url(),
            })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| ProviderError::Transport {
                endpoint,
                source: source.without_url(),
            })?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| ProviderError::Decode { endpoint, source })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwGeoEntry {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn first_description(weather: Vec<OwWeather>) -> String {
    weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .unwrap_or_default()
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, place: &str) -> Result<WeatherSnapshot, ProviderError> {
        let parsed: OwCurrentResponse = self
            .get_json(
                "current weather",
                CURRENT_PATH,
                &[("q", place), ("units", "metric"), ("lang", self.lang)],
            )
            .await?;

        Ok(WeatherSnapshot {
            location: place.to_string(),
            description: first_description(parsed.weather),
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
        })
    }

    async fn geocode(&self, place: &str) -> Result<GeoCoordinate, ProviderError> {
        let parsed: Vec<OwGeoEntry> = self
            .get_json("geocoding", GEOCODE_PATH, &[("q", place), ("limit", "1")])
            .await?;

        parsed
            .into_iter()
            .next()
            .map(|e| GeoCoordinate { latitude: e.lat, longitude: e.lon })
            .ok_or(ProviderError::PlaceNotFound)
    }

    async fn forecast(&self, at: GeoCoordinate) -> Result<Vec<ForecastEntry>, ProviderError> {
        let lat = at.latitude.to_string();
        let lon = at.longitude.to_string();

        let parsed: OwForecastResponse = self
            .get_json(
                "forecast",
                FORECAST_PATH,
                &[
                    ("lat", lat.as_str()),
                    ("lon", lon.as_str()),
                    ("units", "metric"),
                    ("lang", self.lang),
                ],
            )
            .await?;

        Ok(parsed
            .list
            .into_iter()
            .map(|e| ForecastEntry {
                dt_txt: e.dt_txt,
                description: first_description(e.weather),
                temperature_c: e.main.temp,
            })
            .collect())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
