//! Weather provider backed by wttr.in.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::WeatherConfig;
use crate::error::ProviderError;
use crate::provider::WeatherProvider;
use crate::types::{CurrentConditions, DailyForecast, Forecast, ForecastQuery};

/// Hourly slot used as the representative daytime condition (12:00).
const MIDDAY_SLOT: usize = 4;

#[derive(Debug, Deserialize)]
struct J1Response {
    #[serde(default)]
    current_condition: Vec<J1Current>,
    #[serde(default)]
    weather: Vec<J1Day>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct J1Current {
    #[serde(rename = "temp_C")]
    temp_c: String,
    humidity: Option<String>,
    windspeed_kmph: Option<String>,
    #[serde(default)]
    weather_desc: Vec<J1Text>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct J1Day {
    date: String,
    #[serde(rename = "maxtempC")]
    max_temp_c: String,
    #[serde(rename = "mintempC")]
    min_temp_c: String,
    #[serde(default)]
    hourly: Vec<J1Hour>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct J1Hour {
    #[serde(default)]
    chanceofrain: Option<String>,
    #[serde(default)]
    weather_desc: Vec<J1Text>,
}

#[derive(Debug, Deserialize)]
struct J1Text {
    value: String,
}

/// Weather provider that fetches forecasts from wttr.in.
///
/// The service is free and needs no API key. It returns at most three days.
pub struct WttrWeather {
    client: Client,
    config: WeatherConfig,
}

impl WttrWeather {
    /// Create a new wttr.in provider.
    pub fn new(config: WeatherConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent("curl/8.0.0") // wttr.in serves different content based on user agent
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl WeatherProvider for WttrWeather {
    async fn forecast(&self, query: ForecastQuery) -> Result<Forecast, ProviderError> {
        let url = self.config.forecast_url(&query.location);
        debug!("Fetching weather from: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            warn!("wttr.in returned status {}", response.status());
            return Err(ProviderError::Status {
                service: "wttr.in",
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;

        if body.contains("Unknown location") {
            return Err(ProviderError::NotFound(query.location));
        }

        let mut forecast = parse_j1(&query.location, &body)?;
        if let Some(days) = query.days {
            forecast.daily.truncate(days as usize);
        }
        Ok(forecast)
    }
}

/// Parse a wttr.in `format=j1` body into a [`Forecast`].
pub fn parse_j1(location: &str, body: &str) -> Result<Forecast, ProviderError> {
    let raw: J1Response = serde_json::from_str(body)?;

    let current = raw.current_condition.into_iter().next().map(|c| CurrentConditions {
        temperature: number(&c.temp_c),
        condition: first_text(&c.weather_desc),
        humidity: c.humidity.as_deref().and_then(|h| h.trim().parse().ok()),
        wind_speed: c.windspeed_kmph.as_deref().and_then(|w| w.trim().parse().ok()),
    });

    let daily = raw
        .weather
        .into_iter()
        .map(|day| {
            let description = day
                .hourly
                .get(MIDDAY_SLOT)
                .or_else(|| day.hourly.first())
                .map(|h| first_text(&h.weather_desc))
                .unwrap_or_default();
            let rain_chance = day
                .hourly
                .iter()
                .filter_map(|h| h.chanceofrain.as_deref())
                .filter_map(|c| c.trim().parse::<u32>().ok())
                .max()
                .unwrap_or(0);

            DailyForecast {
                date: day.date,
                temperature_high: number(&day.max_temp_c),
                temperature_low: number(&day.min_temp_c),
                description,
                rain_chance,
            }
        })
        .collect();

    Ok(Forecast {
        location: location.to_string(),
        current,
        daily,
    })
}

fn number(text: &str) -> f64 {
    text.trim().parse().unwrap_or_default()
}

fn first_text(texts: &[J1Text]) -> String {
    texts
        .first()
        .map(|t| t.value.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = include_str!("../tests/fixtures/wttr_london.json");

    #[test]
    fn test_parse_j1_sample() {
        let forecast = parse_j1("London", SAMPLE).unwrap();
        assert_eq!(forecast.location, "London");

        let current = forecast.current.unwrap();
        assert_eq!(current.temperature, 12.0);
        assert_eq!(current.condition, "Partly cloudy");
        assert_eq!(current.humidity, Some(82));

        assert_eq!(forecast.daily.len(), 3);
        let first = &forecast.daily[0];
        assert_eq!(first.date, "2024-11-02");
        assert_eq!(first.temperature_high, 14.0);
        assert_eq!(first.temperature_low, 8.0);
        assert_eq!(first.description, "Light rain");
        assert_eq!(first.rain_chance, 85);
    }

    #[test]
    fn test_parse_j1_rejects_garbage() {
        assert!(parse_j1("London", "Unknown location; please try ~52.5,13.4").is_err());
    }

    #[tokio::test]
    #[ignore] // Run with: cargo test -- --ignored
    async fn test_wttr_live() {
        let weather = WttrWeather::new(WeatherConfig::default()).unwrap();
        let forecast = weather
            .forecast(ForecastQuery {
                location: "London".to_string(),
                days: Some(2),
            })
            .await
            .unwrap();
        assert!(forecast.daily.len() <= 2);
    }
}
