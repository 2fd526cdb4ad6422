//! Provider collaborator traits.
//!
//! One trait per travel domain. Implementations are opaque to the tool
//! layer: they receive a typed query and either return data or fail.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::types::{
    Flight, FlightQuery, Forecast, ForecastQuery, Hotel, HotelQuery, Itinerary, Place, PlaceQuery,
    Restaurant, RestaurantQuery, SafetyAdvisory, SafetyQuery, TripQuery, VisaQuery,
    VisaRequirement,
};

/// Weather forecasts.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn forecast(&self, query: ForecastQuery) -> Result<Forecast, ProviderError>;
}

/// Points of interest.
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    async fn search_places(&self, query: PlaceQuery) -> Result<Vec<Place>, ProviderError>;
}

/// Restaurant listings.
#[async_trait]
pub trait RestaurantsProvider: Send + Sync {
    async fn search_restaurants(
        &self,
        query: RestaurantQuery,
    ) -> Result<Vec<Restaurant>, ProviderError>;
}

/// Visa requirements.
#[async_trait]
pub trait VisaProvider: Send + Sync {
    async fn check_visa_requirements(
        &self,
        query: VisaQuery,
    ) -> Result<VisaRequirement, ProviderError>;
}

/// Travel safety advisories.
#[async_trait]
pub trait SafetyProvider: Send + Sync {
    async fn get_safety_advisories(
        &self,
        query: SafetyQuery,
    ) -> Result<SafetyAdvisory, ProviderError>;
}

/// Flight search.
#[async_trait]
pub trait FlightsProvider: Send + Sync {
    async fn search_flights(&self, query: FlightQuery) -> Result<Vec<Flight>, ProviderError>;
}

/// Hotel search.
#[async_trait]
pub trait HotelsProvider: Send + Sync {
    async fn search_hotels(&self, query: HotelQuery) -> Result<Vec<Hotel>, ProviderError>;
}

/// Itinerary generation.
#[async_trait]
pub trait ItineraryProvider: Send + Sync {
    async fn generate_itinerary(&self, query: TripQuery) -> Result<Itinerary, ProviderError>;
}

/// The full set of collaborators a tool registry is built from.
#[derive(Clone)]
pub struct Providers {
    pub weather: Arc<dyn WeatherProvider>,
    pub places: Arc<dyn PlacesProvider>,
    pub restaurants: Arc<dyn RestaurantsProvider>,
    pub visa: Arc<dyn VisaProvider>,
    pub safety: Arc<dyn SafetyProvider>,
    pub flights: Arc<dyn FlightsProvider>,
    pub hotels: Arc<dyn HotelsProvider>,
    pub itinerary: Arc<dyn ItineraryProvider>,
}

impl Providers {
    /// Use one value for every domain it implements.
    pub fn from_shared<P>(provider: Arc<P>) -> Self
    where
        P: WeatherProvider
            + PlacesProvider
            + RestaurantsProvider
            + VisaProvider
            + SafetyProvider
            + FlightsProvider
            + HotelsProvider
            + ItineraryProvider
            + 'static,
    {
        Self {
            weather: provider.clone(),
            places: provider.clone(),
            restaurants: provider.clone(),
            visa: provider.clone(),
            safety: provider.clone(),
            flights: provider.clone(),
            hotels: provider.clone(),
            itinerary: provider,
        }
    }

    /// Replace the weather provider.
    pub fn with_weather(mut self, weather: Arc<dyn WeatherProvider>) -> Self {
        self.weather = weather;
        self
    }
}
