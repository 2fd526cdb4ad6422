//! Points-of-interest discovery tool.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use travel_providers::{Place, PlaceQuery, PlacesProvider};

use crate::error::ToolError;
use crate::format::{join_first, rating, title_case, truncate};
use crate::mapping::ArgMapping;
use crate::schema::{ParamSpec, ToolSpec};
use crate::tool::{Tool, ToolArgs};

const DEFAULT_LIMIT: i64 = 8;
const DEFAULT_CATEGORY: &str = "tourist_attraction";
const DESCRIPTION_CHARS: usize = 150;

const MAPPINGS: &[ArgMapping] = &[ArgMapping::to::<PlaceQuery>(&[
    ("destination", "location"),
    ("category", "category"),
])];

/// Attractions and activities in a destination.
///
/// # Parameters
///
/// - `destination` (required): City or area.
/// - `category` (optional, alias `activity_type`): Kind of place, e.g.
///   "museum" or "park". Defaults to tourist attractions.
/// - `limit` (optional): Maximum entries, 1-20. Defaults to 8.
pub struct Places {
    provider: Arc<dyn PlacesProvider>,
    spec: ToolSpec,
}

impl Places {
    /// Create a new places tool.
    pub fn new(provider: Arc<dyn PlacesProvider>) -> Self {
        let spec = ToolSpec::new(
            "discover_places",
            "Discover places, attractions, and activities in a destination with ratings and details.",
        )
        .param(
            ParamSpec::string("destination")
                .required()
                .description("Destination city or area"),
        )
        .param(
            ParamSpec::string("category")
                .alias("activity_type")
                .default_value(json!(DEFAULT_CATEGORY))
                .description("Category of places (museums, parks, nightlife, shopping, etc.)"),
        )
        .param(
            ParamSpec::integer("limit")
                .default_value(json!(DEFAULT_LIMIT))
                .range(1.0, 20.0)
                .description("Number of results to return (1-20)"),
        );

        Self { provider, spec }
    }
}

#[async_trait]
impl Tool for Places {
    type Output = Vec<Place>;

    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    fn mappings(&self) -> &[ArgMapping] {
        MAPPINGS
    }

    async fn call(&self, args: &ToolArgs) -> Result<Vec<Place>, ToolError> {
        let limit = args.get_i64_opt("limit")?.unwrap_or(DEFAULT_LIMIT) as usize;
        let query: PlaceQuery = MAPPINGS[0].query(args)?;

        let mut places = self.provider.search_places(query).await?;
        places.truncate(limit);
        Ok(places)
    }

    fn format(&self, args: &ToolArgs, places: &Vec<Place>) -> Result<String, ToolError> {
        let destination = args.get_string("destination")?;
        let mut response = format!("**Places to Discover in {}**\n", destination);
        if let Some(category) = args.get_string_opt("category") {
            response.push_str(&format!("Category: {}\n", title_case(&category)));
        }
        response.push('\n');

        for (i, place) in places.iter().enumerate() {
            response.push_str(&format!("**{}. {}**\n", i + 1, place.name));
            response.push_str(&format!(
                "   Rating: {} | {}\n",
                rating(place.rating),
                place.address.as_deref().unwrap_or("Address not available")
            ));

            if let Some(description) = place.description.as_deref().filter(|d| !d.is_empty()) {
                response.push_str(&format!(
                    "   {}\n",
                    truncate(description, DESCRIPTION_CHARS)
                ));
            }

            if !place.types.is_empty() {
                response.push_str(&format!("   Type: {}\n", join_first(&place.types, 2)));
            }

            response.push('\n');
        }

        Ok(response)
    }

    fn is_empty(&self, places: &Vec<Place>) -> bool {
        places.is_empty()
    }

    fn no_results(&self, args: &ToolArgs) -> String {
        format!(
            "No places found in {}",
            args.get_string_opt("destination").unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_args;
    use mock_providers::FixedProviders;

    #[tokio::test]
    async fn test_category_alias_and_default() {
        let stub = FixedProviders::sample();
        let calls = stub.calls();
        let places = Places::new(Arc::new(stub));

        let args = test_args(places.spec(), json!({"destination": "London"}));
        places.call(&args).await.unwrap();
        assert_eq!(
            calls.last_query("search_places").unwrap()["category"],
            "tourist_attraction"
        );

        let args = test_args(
            places.spec(),
            json!({"destination": "London", "activity_type": "museum"}),
        );
        places.call(&args).await.unwrap();
        let query = calls.last_query("search_places").unwrap();
        assert_eq!(query["location"], "London");
        assert_eq!(query["category"], "museum");
    }

    #[tokio::test]
    async fn test_format_listing() {
        let long = "x".repeat(200);
        let mut stub = FixedProviders::sample();
        stub.places[0].description = Some(long);
        stub.places[0].types.push("point_of_interest".to_string());
        let places = Places::new(Arc::new(stub));

        let args = test_args(places.spec(), json!({"destination": "London"}));
        let found = places.call(&args).await.unwrap();
        let text = places.format(&args, &found).unwrap();

        assert!(text.contains("**1. British Museum**"));
        assert!(text.contains("Rating: 4.8 | Great Russell St, London"));
        assert!(text.contains(&format!("{}...", "x".repeat(150))));
        assert!(!text.contains(&"x".repeat(151)));
        assert!(text.contains("Type: museum, tourist_attraction\n"));
        assert!(text.contains("**2. Borough Market**"));
    }

    #[tokio::test]
    async fn test_limit() {
        let places = Places::new(Arc::new(FixedProviders::sample()));
        let args = test_args(places.spec(), json!({"destination": "London", "limit": 1}));
        assert_eq!(places.call(&args).await.unwrap().len(), 1);
    }
}
