//! Trip planning tool: itinerary plus destination weather.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use travel_providers::{
    Forecast, ForecastQuery, Itinerary, ItineraryProvider, TripQuery, VisaStatus, WeatherProvider,
};

use crate::error::ToolError;
use crate::format::{money, number, rating};
use crate::mapping::ArgMapping;
use crate::schema::{ParamSpec, ToolSpec};
use crate::tool::{Tool, ToolArgs};

const MAPPINGS: &[ArgMapping] = &[
    ArgMapping::to::<TripQuery>(&[
        ("origin", "origin"),
        ("destination", "destination"),
        ("start_date", "start_date"),
        ("end_date", "end_date"),
        ("adults", "adults"),
        ("budget", "budget"),
        ("activities", "activities"),
        ("accommodation_type", "accommodation_type"),
        ("dietary_restrictions", "dietary_restrictions"),
        ("avoid_bad_weather", "avoid_bad_weather"),
        ("language", "language"),
    ]),
    ArgMapping::to::<ForecastQuery>(&[("destination", "location")]),
];

/// A generated itinerary together with the destination forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripPlan {
    pub itinerary: Itinerary,
    pub weather: Forecast,
}

/// Complete trip plan: flights, hotels, daily activities, dining, travel
/// advisories and the weather at the destination.
///
/// Calls the itinerary collaborator, then the weather collaborator. Either
/// failing fails the whole plan.
pub struct PlanTrip {
    itinerary: Arc<dyn ItineraryProvider>,
    weather: Arc<dyn WeatherProvider>,
    spec: ToolSpec,
}

impl PlanTrip {
    /// Create a new trip planning tool.
    pub fn new(itinerary: Arc<dyn ItineraryProvider>, weather: Arc<dyn WeatherProvider>) -> Self {
        let spec = ToolSpec::new(
            "plan_trip",
            "Comprehensive trip planner covering flights, hotels, weather, activities, restaurants, and visa requirements.",
        )
        .param(
            ParamSpec::string("origin")
                .required()
                .description("Starting city or airport code"),
        )
        .param(
            ParamSpec::string("destination")
                .required()
                .description("Destination city or airport code"),
        )
        .param(
            ParamSpec::string("start_date")
                .required()
                .description("Trip start date (YYYY-MM-DD)"),
        )
        .param(
            ParamSpec::string("end_date")
                .required()
                .description("Trip end date (YYYY-MM-DD)"),
        )
        .param(
            ParamSpec::integer("adults")
                .default_value(json!(1))
                .range(1.0, 9.0)
                .description("Number of adult travelers"),
        )
        .param(ParamSpec::number("budget").description("Budget in USD"))
        .param(
            ParamSpec::string_list("activities")
                .description("Preferred activities (e.g. museums, nightlife, outdoor)"),
        )
        .param(ParamSpec::string("accommodation_type").description("hotel, apartment, hostel"))
        .param(
            ParamSpec::string_list("dietary_restrictions")
                .description("Dietary needs (vegetarian, halal, etc.)"),
        )
        .param(
            ParamSpec::boolean("avoid_bad_weather")
                .default_value(json!(true))
                .description("Schedule outdoor activities away from bad-weather days"),
        )
        .param(
            ParamSpec::string("language")
                .default_value(json!("en"))
                .description("Language code for the generated plan"),
        );

        Self {
            itinerary,
            weather,
            spec,
        }
    }
}

#[async_trait]
impl Tool for PlanTrip {
    type Output = TripPlan;

    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    fn mappings(&self) -> &[ArgMapping] {
        MAPPINGS
    }

    async fn call(&self, args: &ToolArgs) -> Result<TripPlan, ToolError> {
        let trip: TripQuery = MAPPINGS[0].query(args)?;
        let forecast: ForecastQuery = MAPPINGS[1].query(args)?;

        let itinerary = self.itinerary.generate_itinerary(trip).await?;
        let weather = self.weather.forecast(forecast).await?;

        Ok(TripPlan { itinerary, weather })
    }

    fn format(&self, args: &ToolArgs, plan: &TripPlan) -> Result<String, ToolError> {
        let origin = args.get_string("origin")?;
        let destination = args.get_string("destination")?;
        let start = args.get_string("start_date")?;
        let end = args.get_string("end_date")?;
        let adults = args.get_i64_opt("adults")?.unwrap_or(1);
        let trip = &plan.itinerary;

        let mut response = format!("**Complete Trip Plan: {} → {}**\n\n", origin, destination);
        response.push_str(&format!("**Dates**: {} to {}\n", start, end));
        response.push_str(&format!("**Travelers**: {} adult(s)\n", adults));
        if let Some(cost) = trip.estimated_cost {
            response.push_str(&format!("**Estimated Cost**: {}\n", money(Some(cost))));
        }
        response.push('\n');

        if !trip.flights.is_empty() {
            response.push_str("**Flight Options:**\n");
            for (i, flight) in trip.flights.iter().take(3).enumerate() {
                response.push_str(&format!(
                    "{}. {} - {} - {}\n",
                    i + 1,
                    flight.airline,
                    money(flight.price),
                    flight.departure_time.as_deref().unwrap_or("TBD")
                ));
            }
            response.push('\n');
        }

        if !trip.hotels.is_empty() {
            response.push_str("**Hotel Options:**\n");
            for (i, hotel) in trip.hotels.iter().take(3).enumerate() {
                response.push_str(&format!(
                    "{}. {} - {}/night - Rating: {}\n",
                    i + 1,
                    hotel.name,
                    money(hotel.price_per_night),
                    rating(hotel.rating)
                ));
            }
            response.push('\n');
        }

        if !trip.days.is_empty() {
            response.push_str("**Daily Itinerary:**\n");
            for day in trip.days.iter().take(5) {
                response.push_str(&format!("**{}:**\n", day.date));
                for activity in day.activities.iter().take(3) {
                    response.push_str(&format!("  - {}\n", activity));
                }
            }
            response.push('\n');
        }

        if !trip.restaurants.is_empty() {
            response.push_str("**Restaurant Recommendations:**\n");
            for restaurant in trip.restaurants.iter().take(5) {
                response.push_str(&format!(
                    "- {} - {} - {}\n",
                    restaurant.name,
                    restaurant.cuisine.as_deref().unwrap_or("Various"),
                    restaurant.price_level.as_deref().unwrap_or("$")
                ));
            }
            response.push('\n');
        }

        let mut info = Vec::new();
        if let Some(visa) = &trip.visa {
            if visa.visa_required == VisaStatus::Required {
                info.push(format!(
                    "Visa Required: {}",
                    visa.visa_type.as_deref().unwrap_or("Check requirements")
                ));
            }
        }
        if let Some(safety) = &trip.safety {
            if !safety.advisories.is_empty() {
                info.push(format!(
                    "Safety Advisory: {}",
                    safety
                        .advisory_level
                        .as_deref()
                        .unwrap_or("Standard precautions")
                ));
            }
        }
        if !info.is_empty() {
            response.push_str("**Important Travel Information:**\n");
            for line in info {
                response.push_str(&format!("- {}\n", line));
            }
            response.push('\n');
        }

        if !trip.events.is_empty() {
            response.push_str("**Events During Your Visit:**\n");
            for event in trip.events.iter().take(3) {
                response.push_str(&format!(
                    "- {} - {}\n",
                    event.name,
                    event.start_time.as_deref().unwrap_or("TBD")
                ));
            }
            response.push('\n');
        }

        if !plan.weather.daily.is_empty() {
            response.push_str(&format!("**Weather in {}:**\n", destination));
            for day in plan.weather.daily.iter().take(3) {
                response.push_str(&format!(
                    "{}: {}°/{}° - {}\n",
                    day.date,
                    number(day.temperature_high),
                    number(day.temperature_low),
                    day.description
                ));
            }
            response.push('\n');
        }

        let links = &trip.booking_links;
        if links.is_empty() {
            response.push_str("**Trip planning complete!**");
        } else {
            response.push_str("**Quick Booking Links:**\n");
            if !links.hotels.is_empty() {
                response.push_str(&format!(
                    "- Hotels: {} options available\n",
                    links.hotels.len()
                ));
            }
            if !links.flights.is_empty() {
                response.push_str(&format!(
                    "- Flights: {} booking options\n",
                    links.flights.len()
                ));
            }
            response.push('\n');
            response.push_str(
                "**Trip planning complete! Use the booking links to reserve your selections.**",
            );
        }
        Ok(response)
    }

    fn is_empty(&self, plan: &TripPlan) -> bool {
        plan.itinerary.is_empty()
    }

    fn no_results(&self, args: &ToolArgs) -> String {
        format!(
            "Could not build a trip plan from {} to {}",
            args.get_string_opt("origin").unwrap_or_default(),
            args.get_string_opt("destination").unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_args;
    use mock_providers::FixedProviders;

    fn args(tool: &PlanTrip) -> ToolArgs {
        test_args(
            tool.spec(),
            json!({
                "origin": "Boston",
                "destination": "Lisbon",
                "start_date": "2024-12-15",
                "end_date": "2024-12-20",
                "activities": "food tours"
            }),
        )
    }

    #[tokio::test]
    async fn test_itinerary_then_weather() {
        let stub = Arc::new(FixedProviders::sample());
        let calls = stub.calls();
        let tool = PlanTrip::new(stub.clone(), stub);

        tool.call(&args(&tool)).await.unwrap();

        assert_eq!(calls.sequence(), vec!["generate_itinerary", "get_forecast"]);
        let trip = calls.last_query("generate_itinerary").unwrap();
        assert_eq!(trip["activities"], json!(["food tours"]));
        assert_eq!(trip["adults"], 1);
        assert_eq!(trip["avoid_bad_weather"], true);
        assert_eq!(trip["language"], "en");
        assert_eq!(
            calls.last_query("get_forecast").unwrap()["location"],
            "Lisbon"
        );
    }

    #[tokio::test]
    async fn test_format() {
        let stub = Arc::new(FixedProviders::sample());
        let tool = PlanTrip::new(stub.clone(), stub);
        let args = args(&tool);

        let plan = tool.call(&args).await.unwrap();
        let text = tool.format(&args, &plan).unwrap();

        assert!(text.contains("**Complete Trip Plan: Boston → Lisbon**"));
        assert!(text.contains("**Estimated Cost**: $2150.00"));
        assert!(text.contains("  - Old town walk"));
        assert!(text.contains("**Weather in Lisbon:**"));
        assert!(text.contains("2024-12-15: 12°/5° - Sunny"));
        assert!(!text.contains("2024-12-18"));

        assert!(text.contains("**Events During Your Visit:**"));
        assert!(text.contains("- Winter Light Festival - 2024-12-16 18:00"));
        assert!(text.contains("- Harbor Jazz Night - TBD"));
        assert!(text.contains("**Quick Booking Links:**"));
        assert!(text.contains("- Hotels: 2 options available"));
        assert!(text.contains("- Flights: 1 booking options"));
        assert!(text.ends_with("Use the booking links to reserve your selections.**"));
    }

    #[tokio::test]
    async fn test_format_without_events_or_links() {
        let mut stub = FixedProviders::sample();
        stub.itinerary.events.clear();
        stub.itinerary.booking_links = Default::default();
        let stub = Arc::new(stub);
        let tool = PlanTrip::new(stub.clone(), stub);
        let args = args(&tool);

        let plan = tool.call(&args).await.unwrap();
        let text = tool.format(&args, &plan).unwrap();

        assert!(!text.contains("Events During Your Visit"));
        assert!(!text.contains("Quick Booking Links"));
        assert!(text.ends_with("**Trip planning complete!**"));
    }

    #[tokio::test]
    async fn test_language_and_weather_preference_forwarded() {
        let stub = Arc::new(FixedProviders::sample());
        let calls = stub.calls();
        let tool = PlanTrip::new(stub.clone(), stub);
        let args = test_args(
            tool.spec(),
            json!({
                "origin": "Boston",
                "destination": "Lisbon",
                "start_date": "2024-12-15",
                "end_date": "2024-12-20",
                "avoid_bad_weather": false,
                "language": "pt"
            }),
        );

        tool.call(&args).await.unwrap();

        let trip = calls.last_query("generate_itinerary").unwrap();
        assert_eq!(trip["avoid_bad_weather"], false);
        assert_eq!(trip["language"], "pt");
    }

    #[test]
    fn test_empty_itinerary() {
        let stub = Arc::new(FixedProviders::empty());
        let tool = PlanTrip::new(stub.clone(), stub);
        let plan = TripPlan {
            itinerary: Itinerary::default(),
            weather: Forecast::default(),
        };
        assert!(tool.is_empty(&plan));
    }
}
