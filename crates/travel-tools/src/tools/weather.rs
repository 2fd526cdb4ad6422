//! Weather forecast tool.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use travel_providers::{DailyForecast, Forecast, ForecastQuery, WeatherProvider};

use crate::error::ToolError;
use crate::format::number;
use crate::mapping::ArgMapping;
use crate::schema::{ParamSpec, ToolSpec};
use crate::tool::{Tool, ToolArgs};

const DEFAULT_DAYS: i64 = 5;

const MAPPINGS: &[ArgMapping] = &[ArgMapping::to::<ForecastQuery>(&[
    ("location", "location"),
    ("days", "days"),
])];

/// Forecast for a destination with travel tips.
///
/// # Parameters
///
/// - `location` (required): City or location name.
/// - `days` (optional): Number of forecast days, 1-7. Defaults to 5.
///
/// Rain chance is only shown when above 30%. Each day gets a short tip,
/// and the whole forecast gets packing advice based on the current
/// temperature and rain over the next three days.
pub struct Weather {
    provider: Arc<dyn WeatherProvider>,
    spec: ToolSpec,
}

impl Weather {
    /// Create a new weather tool.
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        let spec = ToolSpec::new(
            "get_weather",
            "Get detailed weather forecasts for travel destinations with travel-specific insights.",
        )
        .param(
            ParamSpec::string("location")
                .required()
                .description("City or location name"),
        )
        .param(
            ParamSpec::integer("days")
                .default_value(json!(DEFAULT_DAYS))
                .range(1.0, 7.0)
                .description("Number of forecast days (1-7)"),
        );

        Self { provider, spec }
    }
}

#[async_trait]
impl Tool for Weather {
    type Output = Forecast;

    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    fn mappings(&self) -> &[ArgMapping] {
        MAPPINGS
    }

    async fn call(&self, args: &ToolArgs) -> Result<Forecast, ToolError> {
        let query: ForecastQuery = MAPPINGS[0].query(args)?;
        let days = query.days.map(|d| d as usize).unwrap_or(DEFAULT_DAYS as usize);

        let mut forecast = self.provider.forecast(query).await?;
        forecast.daily.truncate(days);
        Ok(forecast)
    }

    fn format(&self, args: &ToolArgs, forecast: &Forecast) -> Result<String, ToolError> {
        let location = args.get_string("location")?;
        let mut response = format!("**Weather Forecast for {}**\n\n", location);

        if let Some(current) = &forecast.current {
            response.push_str("**Current Conditions:**\n");
            response.push_str(&format!(
                "{}°C, {}\n",
                number(current.temperature),
                current.condition
            ));
            let mut details = Vec::new();
            if let Some(humidity) = current.humidity {
                details.push(format!("Humidity: {}%", humidity));
            }
            if let Some(wind) = current.wind_speed {
                details.push(format!("Wind: {} km/h", number(wind)));
            }
            if !details.is_empty() {
                response.push_str(&details.join(" | "));
                response.push('\n');
            }
            response.push('\n');
        }

        if !forecast.daily.is_empty() {
            response.push_str(&format!("**{}-Day Forecast:**\n", forecast.daily.len()));
            for day in &forecast.daily {
                response.push_str(&format!(
                    "**{}**: {}°/{}° - {}",
                    day.date,
                    number(day.temperature_high),
                    number(day.temperature_low),
                    day.description
                ));
                if day.rain_chance > 30 {
                    response.push_str(&format!(" | {}% chance of rain", day.rain_chance));
                }
                response.push('\n');
                if let Some(tip) = day_tip(day) {
                    response.push_str(&format!("  _{}_\n", tip));
                }
            }
        }

        let tips = travel_tips(forecast);
        if !tips.is_empty() {
            response.push_str("\n**Travel Tips:**\n");
            for tip in tips {
                response.push_str(&format!("- {}\n", tip));
            }
        }

        Ok(response)
    }

    fn is_empty(&self, forecast: &Forecast) -> bool {
        forecast.daily.is_empty() && forecast.current.is_none()
    }

    fn no_results(&self, args: &ToolArgs) -> String {
        format!(
            "No weather forecast available for {}",
            args.get_string_opt("location").unwrap_or_default()
        )
    }
}

fn day_tip(day: &DailyForecast) -> Option<&'static str> {
    let description = day.description.to_lowercase();
    if description.contains("rain") || description.contains("storm") {
        Some("Recommend indoor activities")
    } else if description.contains("snow") {
        Some("Pack warm clothes, check transport")
    } else if description.contains("sun") || description.contains("clear") {
        Some("Perfect for outdoor activities")
    } else {
        None
    }
}

fn travel_tips(forecast: &Forecast) -> Vec<&'static str> {
    let mut tips = Vec::new();

    if let Some(current) = &forecast.current {
        if current.temperature < 10.0 {
            tips.push("Pack warm clothing and layers");
        } else if current.temperature > 30.0 {
            tips.push("Stay hydrated and wear sun protection");
        }
    }

    if forecast.daily.iter().take(3).any(|d| d.rain_chance > 50) {
        tips.push("Bring rain gear or umbrella");
    }

    tips
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_args;
    use mock_providers::{sample_forecast, FixedProviders};
    use travel_providers::CurrentConditions;

    fn tool(stub: FixedProviders) -> Weather {
        Weather::new(Arc::new(stub))
    }

    #[tokio::test]
    async fn test_days_limit_detail() {
        let weather = tool(FixedProviders::sample());
        let args = test_args(weather.spec(), json!({"location": "London", "days": 3}));

        let forecast = weather.call(&args).await.unwrap();
        assert_eq!(forecast.daily.len(), 3);

        let text = weather.format(&args, &forecast).unwrap();
        assert!(text.contains("**3-Day Forecast:**"));
        assert!(text.contains("2024-12-17"));
        assert!(!text.contains("2024-12-18"));
    }

    #[tokio::test]
    async fn test_default_days_forwarded() {
        let stub = FixedProviders::sample().with_forecast(sample_forecast(7));
        let calls = stub.calls();
        let weather = tool(stub);
        let args = test_args(weather.spec(), json!({"location": "London"}));

        let forecast = weather.call(&args).await.unwrap();
        assert_eq!(forecast.daily.len(), 5);
        assert_eq!(
            calls.last_query("get_forecast").unwrap(),
            json!({"location": "London", "days": 5})
        );
    }

    #[tokio::test]
    async fn test_tips() {
        let weather = tool(FixedProviders::sample());
        let args = test_args(weather.spec(), json!({"location": "London"}));
        let forecast = weather.call(&args).await.unwrap();
        let text = weather.format(&args, &forecast).unwrap();

        // sample: 8°C now, day 2 light rain at 70%
        assert!(text.contains("Pack warm clothing and layers"));
        assert!(text.contains("Bring rain gear or umbrella"));
        assert!(text.contains("| 70% chance of rain"));
        assert!(!text.contains("20% chance of rain"));
        assert!(text.contains("Recommend indoor activities"));
        assert!(text.contains("Pack warm clothes, check transport"));
        assert!(text.contains("Perfect for outdoor activities"));
    }

    #[test]
    fn test_hot_weather_tip() {
        let mut forecast = sample_forecast(1);
        forecast.current = Some(CurrentConditions {
            temperature: 34.0,
            condition: "Sunny".to_string(),
            humidity: None,
            wind_speed: None,
        });
        assert_eq!(
            travel_tips(&forecast),
            vec!["Stay hydrated and wear sun protection"]
        );
    }

    #[test]
    fn test_empty_forecast() {
        let weather = tool(FixedProviders::empty());
        assert!(weather.is_empty(&Forecast::default()));
        assert!(!weather.is_empty(&sample_forecast(1)));
    }
}
