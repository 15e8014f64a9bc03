//! Core library for the weather chat bot.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider abstraction and its OpenWeather implementation
//! - Report rendering and command routing
//!
//! It is used by `weather-bot`, which owns the chat gateway.

pub mod config;
pub mod emoji;
pub mod error;
pub mod locale;
pub mod model;
pub mod provider;
pub mod render;
pub mod report;
pub mod router;

pub use config::Config;
pub use error::ProviderError;
pub use locale::Locale;
pub use model::{ForecastDay, ForecastEntry, GeoCoordinate, WeatherSnapshot};
pub use provider::{WeatherProvider, provider_from_config};
pub use router::{Intent, Reply, Router};
