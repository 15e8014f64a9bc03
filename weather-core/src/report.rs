//! Weather and forecast reports.
//!
//! Every provider failure is turned into a fixed reply string here, so callers
//! always get text to send back to the user.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    ProviderError,
    locale::Locale,
    model::{ForecastDay, ForecastEntry},
    provider::WeatherProvider,
    render::{render_current, render_forecast},
};

/// Number of distinct days shown in a forecast.
pub const FORECAST_DAYS: usize = 3;

const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current conditions for `place`, or the fixed "could not retrieve" reply.
pub async fn weather_report(provider: &dyn WeatherProvider, locale: Locale, place: &str) -> String {
    match provider.current(place).await {
        Ok(snapshot) => render_current(&snapshot, locale),
        Err(err) => {
            tracing::warn!(%place, error = %err, "current weather unavailable");
            locale.weather_unavailable().to_string()
        }
    }
}

/// Up to three days of forecast for `place`, or one of the fixed failure replies.
pub async fn forecast_report(provider: &dyn WeatherProvider, locale: Locale, place: &str) -> String {
    let coord = match provider.geocode(place).await {
        Ok(coord) => coord,
        Err(ProviderError::PlaceNotFound) => {
            tracing::info!(%place, "place not found");
            return locale.place_not_found().to_string();
        }
        Err(err) => {
            tracing::warn!(%place, error = %err, "geocoding failed");
            return locale.coordinates_unavailable().to_string();
        }
    };

    match provider.forecast(coord).await {
        Ok(entries) => render_forecast(place, &collect_days(&entries, FORECAST_DAYS), locale),
        Err(err) => {
            tracing::warn!(%place, error = %err, "forecast unavailable");
            locale.forecast_unavailable().to_string()
        }
    }
}

/// Keep the first entry of each calendar day, in list order, stopping once
/// `max_days` distinct days are collected.
pub fn collect_days(entries: &[ForecastEntry], max_days: usize) -> Vec<ForecastDay> {
    let mut seen: HashSet<NaiveDate> = HashSet::new();
    let mut days = Vec::with_capacity(max_days);

    for entry in entries {
        if days.len() >= max_days {
            break;
        }

        let date = match NaiveDateTime::parse_from_str(&entry.dt_txt, DT_TXT_FORMAT) {
            Ok(dt) => dt.date(),
            Err(err) => {
                tracing::warn!(dt_txt = %entry.dt_txt, error = %err, "skipping forecast entry");
                continue;
            }
        };

        if seen.insert(date) {
            days.push(ForecastDay {
                date,
                description: entry.description.clone(),
                temperature_c: entry.temperature_c,
            });
        }
    }

    days
}
