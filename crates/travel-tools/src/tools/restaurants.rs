//! Restaurant recommendation tool.

use std::sync::Arc;

use async_trait::async_trait;
use travel_providers::{Restaurant, RestaurantQuery, RestaurantsProvider};

use crate::error::ToolError;
use crate::format::{join_first, rating, title_case};
use crate::mapping::ArgMapping;
use crate::schema::{ParamSpec, ToolSpec};
use crate::tool::{Tool, ToolArgs};

const MAX_RESULTS: usize = 8;

const MAPPINGS: &[ArgMapping] = &[ArgMapping::to::<RestaurantQuery>(&[
    ("location", "location"),
    ("cuisine", "cuisine"),
    ("price_range", "price_range"),
    ("dietary_restrictions", "dietary_restrictions"),
])];

/// Restaurant recommendations with cuisine, price and dietary filters.
///
/// `location` is also accepted as `destination`, and `cuisine` as
/// `cuisine_type` or `cuisine_types`. Cuisine may be a single string or a
/// list.
pub struct Restaurants {
    provider: Arc<dyn RestaurantsProvider>,
    spec: ToolSpec,
}

impl Restaurants {
    /// Create a new restaurants tool.
    pub fn new(provider: Arc<dyn RestaurantsProvider>) -> Self {
        let spec = ToolSpec::new(
            "find_restaurants",
            "Find restaurant recommendations with cuisine types, dietary filters, and price ranges.",
        )
        .param(
            ParamSpec::string("location")
                .alias("destination")
                .required()
                .description("Location to search for restaurants"),
        )
        .param(
            ParamSpec::string_list("cuisine")
                .alias("cuisine_type")
                .alias("cuisine_types")
                .description("Preferred cuisine types (italian, chinese, etc.)"),
        )
        .param(
            ParamSpec::string("price_range")
                .description("Price range (budget, mid-range, upscale or $ to $$$$)"),
        )
        .param(
            ParamSpec::string_list("dietary_restrictions")
                .description("Dietary needs (vegetarian, vegan, halal, kosher, gluten-free)"),
        );

        Self { provider, spec }
    }
}

#[async_trait]
impl Tool for Restaurants {
    type Output = Vec<Restaurant>;

    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    fn mappings(&self) -> &[ArgMapping] {
        MAPPINGS
    }

    async fn call(&self, args: &ToolArgs) -> Result<Vec<Restaurant>, ToolError> {
        let query: RestaurantQuery = MAPPINGS[0].query(args)?;
        let mut restaurants = self.provider.search_restaurants(query).await?;
        restaurants.truncate(MAX_RESULTS);
        Ok(restaurants)
    }

    fn format(&self, args: &ToolArgs, restaurants: &Vec<Restaurant>) -> Result<String, ToolError> {
        let location = args.get_string("location")?;
        let mut response = format!("**Restaurant Recommendations in {}**\n", location);

        let cuisine = args.get_string_list("cuisine");
        if !cuisine.is_empty() {
            let names: Vec<String> = cuisine.iter().map(|c| title_case(c)).collect();
            response.push_str(&format!("Cuisine: {}\n", names.join(", ")));
        }
        let dietary = args.get_string_list("dietary_restrictions");
        if !dietary.is_empty() {
            response.push_str(&format!("Dietary: {}\n", dietary.join(", ")));
        }
        if let Some(price_range) = args.get_string_opt("price_range") {
            response.push_str(&format!("Price Range: {}\n", title_case(&price_range)));
        }
        response.push('\n');

        for (i, restaurant) in restaurants.iter().enumerate() {
            response.push_str(&format!("**{}. {}**\n", i + 1, restaurant.name));

            let mut line = format!("   Rating: {}", rating(restaurant.rating));
            if let Some(cuisine) = restaurant.cuisine.as_deref().filter(|c| !c.is_empty()) {
                line.push_str(&format!(" | {}", cuisine));
            }
            if let Some(price) = restaurant.price_level.as_deref().filter(|p| !p.is_empty()) {
                line.push_str(&format!(" | {}", price));
            }
            response.push_str(&line);
            response.push('\n');

            if let Some(address) = restaurant.address.as_deref().filter(|a| !a.is_empty()) {
                response.push_str(&format!("   {}\n", address));
            }
            if !restaurant.features.is_empty() {
                response.push_str(&format!("   {}\n", join_first(&restaurant.features, 3)));
            }

            response.push('\n');
        }

        Ok(response)
    }

    fn is_empty(&self, restaurants: &Vec<Restaurant>) -> bool {
        restaurants.is_empty()
    }

    fn no_results(&self, args: &ToolArgs) -> String {
        format!(
            "No restaurants found in {}",
            args.get_string_opt("location").unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_args;
    use mock_providers::FixedProviders;
    use serde_json::json;

    #[tokio::test]
    async fn test_aliases_forwarded() {
        let stub = FixedProviders::sample();
        let calls = stub.calls();
        let tool = Restaurants::new(Arc::new(stub));

        let args = test_args(
            tool.spec(),
            json!({"destination": "London", "cuisine_type": "indian", "price_range": "$$"}),
        );
        tool.call(&args).await.unwrap();

        assert_eq!(
            calls.last_query("search_restaurants").unwrap(),
            json!({
                "location": "London",
                "cuisine": ["indian"],
                "price_range": "$$",
                "dietary_restrictions": []
            })
        );
    }

    #[tokio::test]
    async fn test_format_caps_results_and_features() {
        let mut stub = FixedProviders::sample();
        let template = stub.restaurants[0].clone();
        stub.restaurants = (0..10)
            .map(|i| Restaurant {
                name: format!("Place {}", i),
                features: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                ..template.clone()
            })
            .collect();
        let tool = Restaurants::new(Arc::new(stub));

        let args = test_args(
            tool.spec(),
            json!({"location": "London", "cuisine_types": ["indian", "thai"]}),
        );
        let found = tool.call(&args).await.unwrap();
        assert_eq!(found.len(), 8);

        let text = tool.format(&args, &found).unwrap();
        assert!(text.contains("Cuisine: Indian, Thai"));
        assert!(text.contains("**8. Place 7**"));
        assert!(!text.contains("Place 8"));
        assert!(text.contains("Rating: 4.7 | Indian | $$"));
        assert!(text.contains("   a, b, c\n"));
    }
}
