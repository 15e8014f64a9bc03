/// Symbol used when no keyword matches.
pub const DEFAULT_EMOJI: &str = "🌡️";

/// Keyword to symbol table, checked in order. The first keyword found as a
/// substring wins, so "небольшой дождь" resolves through "дождь".
const WEATHER_EMOJIS: &[(&str, &str)] = &[
    ("ясно", "☀️"),
    ("облачно с прояснениями", "🌤️"),
    ("пасмурно", "☁️"),
    ("дождь", "🌧️"),
    ("небольшой дождь", "🌦️"),
    ("ливень", "🌧️"),
    ("гроза", "⛈️"),
    ("снег", "❄️"),
    ("туман", "🌫️"),
    ("морось", "🌧️"),
    ("clear", "☀️"),
    ("few clouds", "🌤️"),
    ("overcast", "☁️"),
    ("light rain", "🌦️"),
    ("rain", "🌧️"),
    ("shower", "🌧️"),
    ("thunderstorm", "⛈️"),
    ("snow", "❄️"),
    ("mist", "🌫️"),
    ("fog", "🌫️"),
    ("drizzle", "🌧️"),
];

/// Pick a symbol for a free-text weather description.
pub fn weather_emoji(description: &str) -> &'static str {
    let lower = description.to_lowercase();

    WEATHER_EMOJIS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, emoji)| *emoji)
        .unwrap_or(DEFAULT_EMOJI)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_keyword_case_insensitively() {
        assert_eq!(weather_emoji("Ясно"), "☀️");
        assert_eq!(weather_emoji("ПАСМУРНО"), "☁️");
        assert_eq!(weather_emoji("Thunderstorm"), "⛈️");
    }

    #[test]
    fn first_keyword_in_table_wins() {
        // "дождь" precedes "небольшой дождь" in the table.
        assert_eq!(weather_emoji("небольшой дождь"), "🌧️");
        // "light rain" precedes "rain".
        assert_eq!(weather_emoji("light rain"), "🌦️");
        // "rain" precedes "shower".
        assert_eq!(weather_emoji("shower rain"), "🌧️");
    }

    #[test]
    fn unknown_description_falls_back_to_thermometer() {
        assert_eq!(weather_emoji("вулканический пепел"), DEFAULT_EMOJI);
        assert_eq!(weather_emoji(""), DEFAULT_EMOJI);
    }

    #[test]
    fn classification_is_stable() {
        let first = weather_emoji("снег");
        for _ in 0..3 {
            assert_eq!(weather_emoji("снег"), first);
        }
    }
}
