//! Tool registry, invocation adapter and travel tools.
//!
//! This crate turns the collaborators in `travel-providers` into named,
//! schema-validated tools with normalized errors.
//!
//! # Architecture
//!
//! - A [`Tool`] declares a [`ToolSpec`] (its parameters) and one
//!   [`ArgMapping`] per collaborator it calls. The mapping spells out how
//!   tool parameter names translate to collaborator argument names.
//! - The [`ToolRegistry`] checks both when a tool is registered, so a
//!   tool whose arguments cannot reach its collaborator never gets served.
//! - The [`Adapter`] runs a [`ToolRequest`]: validate, invoke, format. It
//!   always returns a [`ToolResult`], never a raw lower-level error.
//!
//! # Built-in Tools
//!
//! Essential set:
//! - [`Weather`] (`get_weather`) - Forecast with travel tips.
//! - [`Places`] (`discover_places`) - Attractions and activities.
//! - [`Restaurants`] (`find_restaurants`) - Dining recommendations.
//! - [`TravelRequirements`] (`check_travel_requirements`) - Visa and safety.
//!
//! Extended set adds [`Flights`], [`Hotels`], [`PlanTrip`] and
//! [`HealthCheck`]. [`Validate`] is added whenever an owner number is
//! configured.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use travel_tools::{default_registry, Adapter, ToolRequest, ToolsConfig};
//!
//! let registry = default_registry(&providers, &ToolsConfig::default())?;
//! let adapter = Adapter::new(Arc::new(registry));
//!
//! let result = adapter
//!     .invoke(ToolRequest::new("get_weather").arg("location", "London"))
//!     .await;
//! ```

mod adapter;
mod error;
pub mod format;
mod mapping;
mod registry;
mod schema;
mod tool;
pub mod tools;

pub use adapter::{Adapter, AdapterOptions};
pub use error::{ErrorKind, RegistryError, ToolError};
pub use mapping::ArgMapping;
pub use registry::ToolRegistry;
pub use schema::{ParamSpec, ParamType, ToolSpec};
pub use tool::{OutputMode, Payload, RegisteredTool, Tool, ToolArgs, ToolRequest, ToolResult};
pub use tools::{
    Flights, HealthCheck, Hotels, Places, PlanTrip, Restaurants, TravelRequirements, Validate,
    Weather,
};

// Re-export async_trait for convenience
pub use async_trait::async_trait;

use std::fmt;
use std::str::FromStr;

use travel_providers::Providers;

/// Which tools a server exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Toolset {
    /// Weather, places, restaurants and travel requirements.
    #[default]
    Essential,
    /// The essential set plus flights, hotels, trip planning and health check.
    Extended,
}

impl FromStr for Toolset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "essential" | "minimal" => Ok(Toolset::Essential),
            "extended" | "full" => Ok(Toolset::Extended),
            other => Err(format!(
                "unknown toolset '{}' (expected essential or extended)",
                other
            )),
        }
    }
}

impl fmt::Display for Toolset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Toolset::Essential => f.write_str("essential"),
            Toolset::Extended => f.write_str("extended"),
        }
    }
}

/// Options for [`default_registry`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolsConfig {
    pub toolset: Toolset,
    /// Owner number returned by `validate`. The tool is only registered
    /// when this is set.
    pub owner_number: Option<String>,
}

/// Create a registry with the built-in tools wired to `providers`.
pub fn default_registry(
    providers: &Providers,
    config: &ToolsConfig,
) -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();

    registry.register(Weather::new(providers.weather.clone()))?;
    registry.register(Places::new(providers.places.clone()))?;
    registry.register(Restaurants::new(providers.restaurants.clone()))?;
    registry.register(TravelRequirements::new(
        providers.visa.clone(),
        providers.safety.clone(),
    ))?;

    if config.toolset == Toolset::Extended {
        registry.register(Flights::new(providers.flights.clone()))?;
        registry.register(Hotels::new(providers.hotels.clone()))?;
        registry.register(PlanTrip::new(
            providers.itinerary.clone(),
            providers.weather.clone(),
        ))?;
        let names: Vec<String> = registry.names().into_iter().map(String::from).collect();
        registry.register(HealthCheck::new(names))?;
    }

    if let Some(number) = &config.owner_number {
        registry.register(Validate::new(number.clone()))?;
    }

    Ok(registry)
}
