//! Text rendering for replies sent in the chat's HTML mode.
//!
//! Only two inline markers are used: `<b>` for headers and dates, `<i>` for
//! temperature values.

use std::fmt::Write;

use crate::{
    emoji::weather_emoji,
    locale::Locale,
    model::{ForecastDay, WeatherSnapshot},
};

/// Render current conditions as a multi-line block.
pub fn render_current(snapshot: &WeatherSnapshot, locale: Locale) -> String {
    let l = locale.labels();
    let emoji = weather_emoji(&snapshot.description);

    format!(
        "<b>{} {}:</b>\n\
         {} {}\n\
         {}: <i>{}°C</i> ({} {}°C)\n\
         {}: {}%\n\
         {}: {} {}",
        l.weather_in,
        escape_html(&snapshot.location),
        emoji,
        escape_html(&capitalize(&snapshot.description)),
        l.temperature,
        format_number(snapshot.temperature_c),
        l.feels_like,
        format_number(snapshot.feels_like_c),
        l.humidity,
        snapshot.humidity_pct,
        l.wind_speed,
        format_number(snapshot.wind_speed_mps),
        l.speed_unit,
    )
}

/// Render a forecast header followed by one line per day.
pub fn render_forecast(place: &str, days: &[ForecastDay], locale: Locale) -> String {
    let l = locale.labels();
    let mut out = format!(
        "<b>{} {} {}:</b>\n",
        l.forecast_in,
        escape_html(&title_case(place)),
        l.forecast_days
    );

    for day in days {
        writeln!(
            out,
            "<b>{}</b>: {} {}, <i>{}°C</i>",
            day.date.format("%Y-%m-%d"),
            weather_emoji(&day.description),
            escape_html(&capitalize(&day.description)),
            format_number(day.temperature_c),
        )
        .ok();
    }

    out
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Upper-case every letter that follows a non-letter, lower-case the others.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;

    for c in text.chars() {
        if prev_is_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_is_letter = c.is_alphabetic();
    }

    out
}

/// Print a value the way the provider sent it: whole numbers keep one
/// decimal (`5.0`), fractional ones are printed unchanged (`12.34`).
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            location: "Москва".to_string(),
            description: "пасмурно".to_string(),
            temperature_c: 5.0,
            feels_like_c: 2.37,
            humidity_pct: 81,
            wind_speed_mps: 4.5,
        }
    }

    #[test]
    fn current_report_matches_template() {
        let text = render_current(&snapshot(), Locale::Ru);
        assert_eq!(
            text,
            "<b>Погода в Москва:</b>\n\
             ☁️ Пасмурно\n\
             Температура: <i>5.0°C</i> (ощущается как 2.37°C)\n\
             Влажность: 81%\n\
             Скорость ветра: 4.5 м/с"
        );
    }

    #[test]
    fn forecast_report_has_header_and_day_lines() {
        let days = vec![
            ForecastDay {
                date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                description: "ясно".to_string(),
                temperature_c: 18.2,
            },
            ForecastDay {
                date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
                description: "light rain".to_string(),
                temperature_c: 12.0,
            },
        ];

        let text = render_forecast("new york", &days, Locale::En);
        assert_eq!(
            text,
            "<b>Weather forecast for New York for the next 3 days:</b>\n\
             <b>2024-05-01</b>: ☀️ Ясно, <i>18.2°C</i>\n\
             <b>2024-05-02</b>: 🌦️ Light rain, <i>12.0°C</i>\n"
        );
    }

    #[test]
    fn capitalize_handles_cyrillic_and_empty() {
        assert_eq!(capitalize("небольшой ДОЖДЬ"), "Небольшой дождь");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn title_case_follows_word_boundaries() {
        assert_eq!(title_case("санкт-петербург"), "Санкт-Петербург");
        assert_eq!(title_case("rIO de janeiro"), "Rio De Janeiro");
    }

    #[test]
    fn numbers_keep_received_precision() {
        assert_eq!(format_number(5.0), "5.0");
        assert_eq!(format_number(-0.5), "-0.5");
        assert_eq!(format_number(12.34), "12.34");
    }

    #[test]
    fn user_text_is_escaped() {
        assert_eq!(escape_html("<b>&"), "&lt;b&gt;&amp;");
    }
}
