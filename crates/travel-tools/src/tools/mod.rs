//! Built-in travel tools.

mod flights;
mod health;
mod hotels;
mod places;
mod plan_trip;
mod restaurants;
mod travel_requirements;
mod validate;
mod weather;

pub use flights::Flights;
pub use health::{HealthCheck, HealthStatus};
pub use hotels::Hotels;
pub use places::Places;
pub use plan_trip::{PlanTrip, TripPlan};
pub use restaurants::Restaurants;
pub use travel_requirements::{TravelRequirements, TripRequirements};
pub use validate::Validate;
pub use weather::Weather;

#[cfg(test)]
pub(crate) fn test_args(spec: &crate::schema::ToolSpec, raw: serde_json::Value) -> crate::tool::ToolArgs {
    match raw {
        serde_json::Value::Object(map) => spec.validate(map).unwrap(),
        other => panic!("expected object, got {}", other),
    }
}
