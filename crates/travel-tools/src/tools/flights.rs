//! Flight search tool.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use travel_providers::{Flight, FlightQuery, FlightsProvider};

use crate::error::ToolError;
use crate::format::{money, title_case};
use crate::mapping::ArgMapping;
use crate::schema::{ParamSpec, ToolSpec};
use crate::tool::{Tool, ToolArgs};

const MAX_RESULTS: usize = 6;

// The collaborator calls the departure date `date`.
const MAPPINGS: &[ArgMapping] = &[ArgMapping::to::<FlightQuery>(&[
    ("origin", "origin"),
    ("destination", "destination"),
    ("departure_date", "date"),
    ("return_date", "return_date"),
    ("adults", "adults"),
    ("cabin_class", "cabin_class"),
])];

/// Flight options between two cities or airports.
pub struct Flights {
    provider: Arc<dyn FlightsProvider>,
    spec: ToolSpec,
}

impl Flights {
    /// Create a new flight search tool.
    pub fn new(provider: Arc<dyn FlightsProvider>) -> Self {
        let spec = ToolSpec::new(
            "search_flight_options",
            "Search for flights with options for dates, cabin class, and number of passengers.",
        )
        .param(
            ParamSpec::string("origin")
                .required()
                .description("Origin city or airport code"),
        )
        .param(
            ParamSpec::string("destination")
                .required()
                .description("Destination city or airport code"),
        )
        .param(
            ParamSpec::string("departure_date")
                .required()
                .description("Departure date (YYYY-MM-DD)"),
        )
        .param(ParamSpec::string("return_date").description("Return date for round trip"))
        .param(
            ParamSpec::integer("adults")
                .default_value(json!(1))
                .range(1.0, 9.0)
                .description("Number of adult passengers"),
        )
        .param(
            ParamSpec::string("cabin_class")
                .default_value(json!("economy"))
                .description("economy, business, first"),
        );

        Self { provider, spec }
    }
}

#[async_trait]
impl Tool for Flights {
    type Output = Vec<Flight>;

    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    fn mappings(&self) -> &[ArgMapping] {
        MAPPINGS
    }

    async fn call(&self, args: &ToolArgs) -> Result<Vec<Flight>, ToolError> {
        let query: FlightQuery = MAPPINGS[0].query(args)?;
        let mut flights = self.provider.search_flights(query).await?;
        flights.truncate(MAX_RESULTS);
        Ok(flights)
    }

    fn format(&self, args: &ToolArgs, flights: &Vec<Flight>) -> Result<String, ToolError> {
        let origin = args.get_string("origin")?;
        let destination = args.get_string("destination")?;
        let departure = args.get_string("departure_date")?;
        let adults = args.get_i64_opt("adults")?.unwrap_or(1);
        let cabin = args
            .get_string_opt("cabin_class")
            .unwrap_or_else(|| "economy".to_string());
        let trip_type = match args.get_string_opt("return_date") {
            Some(ret) => format!("Round Trip (return {})", ret),
            None => "One Way".to_string(),
        };

        let mut response = format!("**Flight Options: {} → {}**\n", origin, destination);
        response.push_str(&format!(
            "{} | {} adult(s) | {} | {}\n\n",
            departure,
            adults,
            title_case(&cabin),
            trip_type
        ));

        for (i, flight) in flights.iter().enumerate() {
            response.push_str(&format!("**{}. {}**\n", i + 1, flight.airline));
            response.push_str(&format!(
                "   {} | {} → {} ({})\n",
                money(flight.price),
                flight.departure_time.as_deref().unwrap_or("TBD"),
                flight.arrival_time.as_deref().unwrap_or("TBD"),
                flight.duration.as_deref().unwrap_or("N/A")
            ));
            let stops = match flight.stops {
                0 => "Nonstop".to_string(),
                1 => "1 stop".to_string(),
                n => format!("{} stops", n),
            };
            response.push_str(&format!("   {}\n\n", stops));
        }

        Ok(response)
    }

    fn is_empty(&self, flights: &Vec<Flight>) -> bool {
        flights.is_empty()
    }

    fn no_results(&self, args: &ToolArgs) -> String {
        format!(
            "No flights found from {} to {} on {}",
            args.get_string_opt("origin").unwrap_or_default(),
            args.get_string_opt("destination").unwrap_or_default(),
            args.get_string_opt("departure_date").unwrap_or_default()
        )
    }
}
