use serde::{Deserialize, Serialize};

/// Reply language. Each variant is a fixed table of strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Ru => "ru",
            Locale::En => "en",
        }
    }

    /// Value of the provider's `lang` query parameter.
    pub fn api_lang(&self) -> &'static str {
        self.as_str()
    }

    /// Trailing word that switches a query to the 3-day forecast.
    pub fn forecast_keyword(&self) -> &'static str {
        match self {
            Locale::Ru => "прогноз",
            Locale::En => "forecast",
        }
    }

    pub fn greeting(&self) -> &'static str {
        match self {
            Locale::Ru => {
                "Привет! Я погодный бот.\n\
                 Напиши название места, и я расскажу, какая там погода.\n\
                 Добавь слово 'прогноз', чтобы получить погоду на 3 дня. Используй /help для справки."
            }
            Locale::En => {
                "Hi! I am a weather bot.\n\
                 Send me a place name and I will tell you the weather there.\n\
                 Add the word 'forecast' to get the weather for 3 days. Use /help for help."
            }
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            Locale::Ru => {
                "Поддерживаемые команды:\n\
                 /start - приветствие и информация о боте\n\
                 /help - список команд\n\
                 Введите название места - получите текущую погоду\n\
                 Добавьте слово 'прогноз' - получите прогноз на 3 дня"
            }
            Locale::En => {
                "Supported commands:\n\
                 /start - greeting and bot information\n\
                 /help - command list\n\
                 Send a place name - get the current weather\n\
                 Add the word 'forecast' - get a 3-day forecast"
            }
        }
    }

    pub fn weather_unavailable(&self) -> &'static str {
        match self {
            Locale::Ru => "Не удалось получить данные. Проверьте название места.",
            Locale::En => "Could not retrieve data. Check the place name.",
        }
    }

    pub fn coordinates_unavailable(&self) -> &'static str {
        match self {
            Locale::Ru => "Не удалось найти координаты места.",
            Locale::En => "Could not find the coordinates of the place.",
        }
    }

    pub fn place_not_found(&self) -> &'static str {
        match self {
            Locale::Ru => "Город не найден.",
            Locale::En => "Place not found.",
        }
    }

    pub fn forecast_unavailable(&self) -> &'static str {
        match self {
            Locale::Ru => "Не удалось получить прогноз.",
            Locale::En => "Could not retrieve the forecast.",
        }
    }

    pub(crate) fn labels(&self) -> &'static Labels {
        match self {
            Locale::Ru => &RU_LABELS,
            Locale::En => &EN_LABELS,
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Locale {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "ru" => Ok(Locale::Ru),
            "en" => Ok(Locale::En),
            _ => Err(anyhow::anyhow!("Unknown language '{value}'. Supported languages: ru, en.")),
        }
    }
}

/// Fragments of the report templates.
pub(crate) struct Labels {
    pub weather_in: &'static str,
    pub forecast_in: &'static str,
    pub forecast_days: &'static str,
    pub temperature: &'static str,
    pub feels_like: &'static str,
    pub humidity: &'static str,
    pub wind_speed: &'static str,
    pub speed_unit: &'static str,
}

static RU_LABELS: Labels = Labels {
    weather_in: "Погода в",
    forecast_in: "Прогноз погоды в",
    forecast_days: "на ближайшие 3 дня",
    temperature: "Температура",
    feels_like: "ощущается как",
    humidity: "Влажность",
    wind_speed: "Скорость ветра",
    speed_unit: "м/с",
};

static EN_LABELS: Labels = Labels {
    weather_in: "Weather in",
    forecast_in: "Weather forecast for",
    forecast_days: "for the next 3 days",
    temperature: "Temperature",
    feels_like: "feels like",
    humidity: "Humidity",
    wind_speed: "Wind speed",
    speed_unit: "m/s",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_as_str_roundtrip() {
        for locale in [Locale::Ru, Locale::En] {
            let parsed = Locale::try_from(locale.as_str()).expect("roundtrip should succeed");
            assert_eq!(locale, parsed);
        }
    }

    #[test]
    fn unknown_locale_error() {
        let err = Locale::try_from("fr").unwrap_err();
        assert!(err.to_string().contains("Unknown language"));
    }

    #[test]
    fn default_is_russian() {
        assert_eq!(Locale::default(), Locale::Ru);
        assert_eq!(Locale::default().forecast_keyword(), "прогноз");
    }
}
