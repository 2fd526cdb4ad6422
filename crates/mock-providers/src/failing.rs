//! Failing providers - every call errors.

use travel_providers::{
    async_trait, Flight, FlightQuery, FlightsProvider, Forecast, ForecastQuery, Hotel, HotelQuery,
    HotelsProvider, Itinerary, ItineraryProvider, Place, PlaceQuery, PlacesProvider,
    ProviderError, ProviderQuery, Restaurant, RestaurantQuery, RestaurantsProvider,
    SafetyAdvisory, SafetyProvider, SafetyQuery, TripQuery, VisaProvider, VisaQuery,
    VisaRequirement, WeatherProvider,
};

use crate::calls::CallLog;

/// Providers that fail every call with [`ProviderError::Unavailable`].
#[derive(Debug, Clone)]
pub struct FailingProviders {
    reason: String,
    calls: CallLog,
}

impl FailingProviders {
    /// Create failing providers with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            calls: CallLog::new(),
        }
    }

    /// Get a handle on the call log.
    pub fn calls(&self) -> CallLog {
        self.calls.clone()
    }

    fn fail<T, Q: serde::Serialize>(
        &self,
        provider: &'static str,
        query: &Q,
    ) -> Result<T, ProviderError> {
        self.calls.record(provider, query);
        Err(ProviderError::Unavailable(self.reason.clone()))
    }
}

impl Default for FailingProviders {
    fn default() -> Self {
        Self::new("upstream unreachable")
    }
}

#[async_trait]
impl WeatherProvider for FailingProviders {
    async fn forecast(&self, query: ForecastQuery) -> Result<Forecast, ProviderError> {
        self.fail(ForecastQuery::SIGNATURE.name, &query)
    }
}

#[async_trait]
impl PlacesProvider for FailingProviders {
    async fn search_places(&self, query: PlaceQuery) -> Result<Vec<Place>, ProviderError> {
        self.fail(PlaceQuery::SIGNATURE.name, &query)
    }
}

#[async_trait]
impl RestaurantsProvider for FailingProviders {
    async fn search_restaurants(
        &self,
        query: RestaurantQuery,
    ) -> Result<Vec<Restaurant>, ProviderError> {
        self.fail(RestaurantQuery::SIGNATURE.name, &query)
    }
}

#[async_trait]
impl VisaProvider for FailingProviders {
    async fn check_visa_requirements(
        &self,
        query: VisaQuery,
    ) -> Result<VisaRequirement, ProviderError> {
        self.fail(VisaQuery::SIGNATURE.name, &query)
    }
}

#[async_trait]
impl SafetyProvider for FailingProviders {
    async fn get_safety_advisories(
        &self,
        query: SafetyQuery,
    ) -> Result<SafetyAdvisory, ProviderError> {
        self.fail(SafetyQuery::SIGNATURE.name, &query)
    }
}

#[async_trait]
impl FlightsProvider for FailingProviders {
    async fn search_flights(&self, query: FlightQuery) -> Result<Vec<Flight>, ProviderError> {
        self.fail(FlightQuery::SIGNATURE.name, &query)
    }
}

#[async_trait]
impl HotelsProvider for FailingProviders {
    async fn search_hotels(&self, query: HotelQuery) -> Result<Vec<Hotel>, ProviderError> {
        self.fail(HotelQuery::SIGNATURE.name, &query)
    }
}

#[async_trait]
impl ItineraryProvider for FailingProviders {
    async fn generate_itinerary(&self, query: TripQuery) -> Result<Itinerary, ProviderError> {
        self.fail(TripQuery::SIGNATURE.name, &query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_failing_provider() {
        let providers = FailingProviders::new("boom");
        let result = providers
            .get_safety_advisories(SafetyQuery {
                country: "Japan".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ProviderError::Unavailable(ref r)) if r == "boom"));
        assert_eq!(providers.calls().count("get_safety_advisories"), 1);
    }
}
