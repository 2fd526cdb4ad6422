//! Hotel search tool.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use travel_providers::{Hotel, HotelQuery, HotelsProvider};

use crate::error::ToolError;
use crate::format::{join_first, money, rating};
use crate::mapping::ArgMapping;
use crate::schema::{ParamSpec, ToolSpec};
use crate::tool::{Tool, ToolArgs};

const MAX_RESULTS: usize = 8;

// The collaborator calls the destination `location`.
const MAPPINGS: &[ArgMapping] = &[ArgMapping::to::<HotelQuery>(&[
    ("destination", "location"),
    ("check_in", "check_in"),
    ("check_out", "check_out"),
    ("adults", "adults"),
    ("min_rating", "min_rating"),
    ("accommodation_type", "accommodation_type"),
])];

/// Hotel and accommodation options for a stay.
pub struct Hotels {
    provider: Arc<dyn HotelsProvider>,
    spec: ToolSpec,
}

impl Hotels {
    /// Create a new hotel search tool.
    pub fn new(provider: Arc<dyn HotelsProvider>) -> Self {
        let spec = ToolSpec::new(
            "search_hotel_options",
            "Search for hotels and accommodations with filtering options for dates, rating, and type.",
        )
        .param(
            ParamSpec::string("destination")
                .required()
                .description("Destination city"),
        )
        .param(
            ParamSpec::string("check_in")
                .required()
                .description("Check-in date (YYYY-MM-DD)"),
        )
        .param(
            ParamSpec::string("check_out")
                .required()
                .description("Check-out date (YYYY-MM-DD)"),
        )
        .param(
            ParamSpec::integer("adults")
                .default_value(json!(1))
                .range(1.0, 9.0)
                .description("Number of adults"),
        )
        .param(
            ParamSpec::number("min_rating")
                .range(1.0, 5.0)
                .description("Minimum hotel rating (1.0-5.0)"),
        )
        .param(ParamSpec::string("accommodation_type").description("hotel, apartment, hostel"));

        Self { provider, spec }
    }
}

#[async_trait]
impl Tool for Hotels {
    type Output = Vec<Hotel>;

    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    fn mappings(&self) -> &[ArgMapping] {
        MAPPINGS
    }

    async fn call(&self, args: &ToolArgs) -> Result<Vec<Hotel>, ToolError> {
        let query: HotelQuery = MAPPINGS[0].query(args)?;
        let mut hotels = self.provider.search_hotels(query).await?;
        hotels.truncate(MAX_RESULTS);
        Ok(hotels)
    }

    fn format(&self, args: &ToolArgs, hotels: &Vec<Hotel>) -> Result<String, ToolError> {
        let destination = args.get_string("destination")?;
        let check_in = args.get_string("check_in")?;
        let check_out = args.get_string("check_out")?;
        let adults = args.get_i64_opt("adults")?.unwrap_or(1);

        let mut response = format!("**Hotel Options in {}**\n", destination);
        response.push_str(&format!(
            "{} to {} | {} adult(s)\n\n",
            check_in, check_out, adults
        ));

        for (i, hotel) in hotels.iter().enumerate() {
            response.push_str(&format!("**{}. {}**\n", i + 1, hotel.name));
            response.push_str(&format!(
                "   {}/night | Rating: {} | {}\n",
                money(hotel.price_per_night),
                rating(hotel.rating),
                hotel.address.as_deref().unwrap_or("Address not available")
            ));
            if !hotel.amenities.is_empty() {
                response.push_str(&format!("   {}\n", join_first(&hotel.amenities, 3)));
            }
            response.push('\n');
        }

        Ok(response)
    }

    fn is_empty(&self, hotels: &Vec<Hotel>) -> bool {
        hotels.is_empty()
    }

    fn no_results(&self, args: &ToolArgs) -> String {
        format!(
            "No hotels found for {} from {} to {}",
            args.get_string_opt("destination").unwrap_or_default(),
            args.get_string_opt("check_in").unwrap_or_default(),
            args.get_string_opt("check_out").unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_args;
    use mock_providers::FixedProviders;

    #[tokio::test]
    async fn test_destination_sent_as_location() {
        let stub = FixedProviders::sample();
        let calls = stub.calls();
        let hotels = Hotels::new(Arc::new(stub));

        let args = test_args(
            hotels.spec(),
            json!({
                "destination": "Lisbon",
                "check_in": "2025-05-01",
                "check_out": "2025-05-04",
                "min_rating": 4
            }),
        );
        let found = hotels.call(&args).await.unwrap();

        let query = calls.last_query("search_hotels").unwrap();
        assert_eq!(query["location"], "Lisbon");
        assert_eq!(query["min_rating"], 4.0);
        assert!(query.get("destination").is_none());

        let text = hotels.format(&args, &found).unwrap();
        assert!(text.contains("2025-05-01 to 2025-05-04 | 1 adult(s)"));
        assert!(text.contains("$180.00/night | Rating: 4.4 | 12 Quay Street"));
        assert!(text.contains("WiFi, Breakfast"));
    }
}
