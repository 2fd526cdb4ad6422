//! Travel data collaborators for the travel MCP server.
//!
//! Each travel domain (weather, places, restaurants, visa, safety, flights,
//! hotels, itineraries) is an async trait taking a typed query. Query types
//! carry a static [`ProviderSignature`] naming the arguments they accept, so
//! tool definitions can be checked against them before any request is served.
//!
//! # Implementations
//!
//! - [`WttrWeather`] - Forecasts via wttr.in (no API key needed).
//! - [`TravelApiClient`] - Everything else, via a REST travel data backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use travel_providers::{ForecastQuery, WeatherConfig, WeatherProvider, WttrWeather};
//!
//! let weather = WttrWeather::new(WeatherConfig::default())?;
//! let forecast = weather
//!     .forecast(ForecastQuery { location: "London".into(), days: Some(3) })
//!     .await?;
//! ```

mod client;
mod config;
mod error;
mod provider;
mod signature;
mod types;
mod wttr;

pub use client::TravelApiClient;
pub use config::{TravelApiConfig, WeatherConfig, DEFAULT_TRAVEL_API_URL, DEFAULT_WEATHER_API_URL};
pub use error::ProviderError;
pub use provider::{
    FlightsProvider, HotelsProvider, ItineraryProvider, PlacesProvider, Providers,
    RestaurantsProvider, SafetyProvider, VisaProvider, WeatherProvider,
};
pub use signature::{ProviderCall, ProviderParam, ProviderQuery, ProviderSignature};
pub use types::{
    BookingLinks, CurrentConditions, DailyForecast, Event, Flight, FlightQuery, Forecast,
    ForecastQuery, Hotel, HotelQuery, Itinerary, ItineraryDay, Place, PlaceQuery, Restaurant, RestaurantQuery,
    SafetyAdvisory, SafetyQuery, TripQuery, VisaQuery, VisaRequirement, VisaStatus,
};
pub use wttr::{parse_j1, WttrWeather};

// Re-export async_trait for convenience
pub use async_trait::async_trait;

use std::sync::Arc;

/// Build the production provider set.
pub fn http_providers(
    travel_api: TravelApiConfig,
    weather: WeatherConfig,
) -> Result<Providers, ProviderError> {
    let client = Arc::new(TravelApiClient::new(travel_api)?);
    let weather = Arc::new(WttrWeather::new(weather)?);

    Ok(Providers {
        weather,
        places: client.clone(),
        restaurants: client.clone(),
        visa: client.clone(),
        safety: client.clone(),
        flights: client.clone(),
        hotels: client.clone(),
        itinerary: client,
    })
}
