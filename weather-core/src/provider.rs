use crate::{
    Config, ProviderError,
    model::{ForecastEntry, GeoCoordinate, WeatherSnapshot},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current conditions, geocoding and forecasts.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a free-text place name.
    async fn current(&self, place: &str) -> Result<WeatherSnapshot, ProviderError>;

    /// Resolve a place name to the first matching coordinate.
    async fn geocode(&self, place: &str) -> Result<GeoCoordinate, ProviderError>;

    /// Forecast slots for a coordinate, in the provider's chronological order.
    async fn forecast(&self, at: GeoCoordinate) -> Result<Vec<ForecastEntry>, ProviderError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.openweather_api_key.as_deref().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: set OPENWEATHER_API_KEY or run `weather-bot configure`."
        )
    })?;

    OpenWeatherProvider::builder(api_key.to_owned())
        .base_url(config.openweather_base_url.clone())
        .lang(config.language.api_lang())
        .timeout(config.request_timeout())
        .build()
}
