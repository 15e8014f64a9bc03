use std::sync::Arc;

use crate::{
    locale::Locale,
    provider::WeatherProvider,
    report::{forecast_report, weather_report},
};

/// What an inbound chat message asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Start,
    Help,
    Weather(String),
    Forecast(String),
}

impl Intent {
    pub fn parse(text: &str, locale: Locale) -> Self {
        let trimmed = text.trim();

        match command_name(trimmed) {
            Some("start") => return Intent::Start,
            Some("help") => return Intent::Help,
            _ => {}
        }

        match strip_suffix_ignore_case(trimmed, locale.forecast_keyword()) {
            Some(place) => Intent::Forecast(place.trim().to_string()),
            None => Intent::Weather(trimmed.to_string()),
        }
    }
}

/// Name of a bot command such as `/help@weather_bot args`.
fn command_name(text: &str) -> Option<&str> {
    let rest = text.strip_prefix('/')?;
    let word = rest.split_whitespace().next()?;
    word.split('@').next()
}

/// Strip a trailing keyword compared case-insensitively, keeping the
/// original casing of the rest.
fn strip_suffix_ignore_case<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let n = keyword.chars().count();
    if n == 0 {
        return None;
    }

    let (idx, _) = text.char_indices().rev().nth(n - 1)?;
    let (head, tail) = text.split_at(idx);

    (tail.to_lowercase() == keyword).then_some(head)
}

/// Reply to send back, with whether HTML formatting is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub html: bool,
}

impl Reply {
    fn plain(text: &str) -> Self {
        Self { text: text.to_string(), html: false }
    }

    fn html(text: String) -> Self {
        Self { text, html: true }
    }
}

/// Stateless dispatcher from chat text to a reply.
#[derive(Debug, Clone)]
pub struct Router {
    provider: Arc<dyn WeatherProvider>,
    locale: Locale,
}

impl Router {
    pub fn new(provider: Arc<dyn WeatherProvider>, locale: Locale) -> Self {
        Self { provider, locale }
    }

    pub async fn handle(&self, text: &str) -> Reply {
        let intent = Intent::parse(text, self.locale);
        tracing::info!(?intent, "dispatching message");

        match intent {
            Intent::Start => Reply::plain(self.locale.greeting()),
            Intent::Help => Reply::plain(self.locale.help()),
            Intent::Weather(place) => {
                Reply::html(weather_report(self.provider.as_ref(), self.locale, &place).await)
            }
            Intent::Forecast(place) => {
                Reply::html(forecast_report(self.provider.as_ref(), self.locale, &place).await)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::openweather::OpenWeatherProvider;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn commands_are_recognised() {
        assert_eq!(Intent::parse("/start", Locale::Ru), Intent::Start);
        assert_eq!(Intent::parse("  /help  ", Locale::Ru), Intent::Help);
        assert_eq!(Intent::parse("/help@weather_bot", Locale::En), Intent::Help);
        assert_eq!(Intent::parse("/start now", Locale::En), Intent::Start);
    }

    #[test]
    fn plain_text_is_a_weather_query() {
        assert_eq!(
            Intent::parse("  Нижний Новгород \n", Locale::Ru),
            Intent::Weather("Нижний Новгород".to_string())
        );
    }

    #[test]
    fn trailing_keyword_is_a_forecast_query() {
        assert_eq!(
            Intent::parse("Paris forecast", Locale::En),
            Intent::Forecast("Paris".to_string())
        );
        assert_eq!(
            Intent::parse("  Paris   FORECAST ", Locale::En),
            Intent::Forecast("Paris".to_string())
        );
        assert_eq!(
            Intent::parse("Москва Прогноз", Locale::Ru),
            Intent::Forecast("Москва".to_string())
        );
    }

    #[test]
    fn keyword_not_at_end_is_a_weather_query() {
        assert_eq!(
            Intent::parse("forecast Paris", Locale::En),
            Intent::Weather("forecast Paris".to_string())
        );
    }

    #[test]
    fn keyword_only_passes_empty_place() {
        assert_eq!(Intent::parse("прогноз", Locale::Ru), Intent::Forecast(String::new()));
    }

    #[tokio::test]
    async fn test_forecast_query_uses_forecast_endpoints_only() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .and(query_param("q", "Paris"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::builder("test_key".to_string())
            .base_url(mock_server.uri())
            .build()
            .unwrap();
        let router = Router::new(Arc::new(provider), Locale::En);

        let reply = router.handle("Paris forecast").await;
        assert_eq!(reply, Reply { text: "Place not found.".to_string(), html: true });
    }

    #[tokio::test]
    async fn test_commands_do_not_call_provider() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::builder("test_key".to_string())
            .base_url(mock_server.uri())
            .build()
            .unwrap();
        let router = Router::new(Arc::new(provider), Locale::Ru);

        let reply = router.handle("/start").await;
        assert!(!reply.html);
        assert!(reply.text.starts_with("Привет! Я погодный бот."));

        let reply = router.handle("/help").await;
        assert!(reply.text.contains("/help - список команд"));
    }
}
