//! Fixed providers - return canned data and log every call.

use travel_providers::{
    async_trait, BookingLinks, CurrentConditions, DailyForecast, Event, Flight, FlightQuery,
    FlightsProvider, Forecast, ForecastQuery, Hotel, HotelQuery, HotelsProvider, Itinerary,
    ItineraryDay, ItineraryProvider, Place, PlaceQuery, PlacesProvider, ProviderError,
    ProviderQuery, Restaurant, RestaurantQuery, RestaurantsProvider, SafetyAdvisory,
    SafetyProvider, SafetyQuery, TripQuery, VisaProvider, VisaQuery, VisaRequirement, VisaStatus,
    WeatherProvider,
};

use crate::calls::CallLog;

/// Providers that answer every query with the same canned data.
///
/// Fields are public so tests can replace individual answers. Every call
/// is recorded in [`FixedProviders::calls`].
#[derive(Debug, Clone)]
pub struct FixedProviders {
    pub forecast: Forecast,
    pub places: Vec<Place>,
    pub restaurants: Vec<Restaurant>,
    pub visa: VisaRequirement,
    pub safety: SafetyAdvisory,
    pub flights: Vec<Flight>,
    pub hotels: Vec<Hotel>,
    pub itinerary: Itinerary,
    pub calls: CallLog,
}

impl FixedProviders {
    /// Providers with a small, realistic sample data set.
    pub fn sample() -> Self {
        Self {
            forecast: sample_forecast(5),
            places: sample_places(),
            restaurants: sample_restaurants(),
            visa: VisaRequirement {
                visa_required: VisaStatus::NotRequired,
                visa_type: None,
                max_stay: Some("90 days".to_string()),
                processing_time: None,
                fee: None,
                requirements: vec![
                    "Passport valid for duration of stay".to_string(),
                    "Return ticket".to_string(),
                ],
            },
            safety: SafetyAdvisory {
                advisory_level: Some("Level 1: Low risk".to_string()),
                summary: Some("Exercise normal precautions.".to_string()),
                advisories: vec!["Earthquakes can occur without warning".to_string()],
                last_updated: Some("2024-10-01".to_string()),
                recommended_vaccines: vec!["Routine vaccines".to_string()],
            },
            flights: vec![Flight {
                airline: "Skyway".to_string(),
                price: Some(420.0),
                departure_time: Some("08:15".to_string()),
                arrival_time: Some("11:40".to_string()),
                duration: Some("5h 25m".to_string()),
                stops: 0,
            }],
            hotels: vec![Hotel {
                name: "Harbor View Inn".to_string(),
                price_per_night: Some(180.0),
                rating: Some(4.4),
                address: Some("12 Quay Street".to_string()),
                amenities: vec!["WiFi".to_string(), "Breakfast".to_string()],
            }],
            itinerary: Itinerary {
                estimated_cost: Some(2150.0),
                days: vec![ItineraryDay {
                    date: "2024-12-15".to_string(),
                    activities: vec!["Arrive and check in".to_string(), "Old town walk".to_string()],
                }],
                events: vec![
                    Event {
                        name: "Winter Light Festival".to_string(),
                        start_time: Some("2024-12-16 18:00".to_string()),
                        venue: Some("Riverside Park".to_string()),
                    },
                    Event {
                        name: "Harbor Jazz Night".to_string(),
                        start_time: None,
                        venue: None,
                    },
                ],
                booking_links: BookingLinks {
                    flights: vec!["https://book.example/flights/skyway-420".to_string()],
                    hotels: vec![
                        "https://book.example/hotels/harbor-view".to_string(),
                        "https://book.example/hotels/old-town-suites".to_string(),
                    ],
                },
                ..Default::default()
            },
            calls: CallLog::new(),
        }
    }

    /// Providers that find nothing: empty lists and an empty forecast.
    pub fn empty() -> Self {
        Self {
            forecast: Forecast::default(),
            places: Vec::new(),
            restaurants: Vec::new(),
            flights: Vec::new(),
            hotels: Vec::new(),
            itinerary: Itinerary::default(),
            ..Self::sample()
        }
    }

    /// Replace the places answer.
    pub fn with_places(mut self, places: Vec<Place>) -> Self {
        self.places = places;
        self
    }

    /// Replace the forecast answer.
    pub fn with_forecast(mut self, forecast: Forecast) -> Self {
        self.forecast = forecast;
        self
    }

    /// Replace the visa answer.
    pub fn with_visa(mut self, visa: VisaRequirement) -> Self {
        self.visa = visa;
        self
    }

    /// Replace the safety answer.
    pub fn with_safety(mut self, safety: SafetyAdvisory) -> Self {
        self.safety = safety;
        self
    }

    /// Get a handle on the call log.
    pub fn calls(&self) -> CallLog {
        self.calls.clone()
    }
}

impl Default for FixedProviders {
    fn default() -> Self {
        Self::sample()
    }
}

/// A forecast with the given number of days starting 2024-12-15.
pub fn sample_forecast(days: usize) -> Forecast {
    const CONDITIONS: &[(&str, u32)] = &[
        ("Sunny", 0),
        ("Light rain", 70),
        ("Partly cloudy", 20),
        ("Heavy snow", 40),
        ("Clear", 5),
    ];

    let daily = (0..days)
        .map(|i| {
            let (description, rain_chance) = CONDITIONS[i % CONDITIONS.len()];
            DailyForecast {
                date: format!("2024-12-{:02}", 15 + i),
                temperature_high: 12.0 + i as f64,
                temperature_low: 5.0 + i as f64,
                description: description.to_string(),
                rain_chance,
            }
        })
        .collect();

    Forecast {
        location: "London".to_string(),
        current: Some(CurrentConditions {
            temperature: 8.0,
            condition: "Overcast".to_string(),
            humidity: Some(81),
            wind_speed: Some(14.0),
        }),
        daily,
    }
}

fn sample_places() -> Vec<Place> {
    vec![
        Place {
            name: "British Museum".to_string(),
            rating: Some(4.8),
            address: Some("Great Russell St, London".to_string()),
            description: Some("World history and culture under one roof.".to_string()),
            types: vec!["museum".to_string(), "tourist_attraction".to_string()],
        },
        Place {
            name: "Borough Market".to_string(),
            rating: Some(4.6),
            address: Some("8 Southwark St, London".to_string()),
            description: None,
            types: vec!["market".to_string()],
        },
    ]
}

fn sample_restaurants() -> Vec<Restaurant> {
    vec![Restaurant {
        name: "Dishoom".to_string(),
        rating: Some(4.7),
        cuisine: Some("Indian".to_string()),
        price_level: Some("$$".to_string()),
        address: Some("12 Upper St Martin's Ln, London".to_string()),
        features: vec!["Vegetarian options".to_string(), "Breakfast".to_string()],
    }]
}

#[async_trait]
impl WeatherProvider for FixedProviders {
    async fn forecast(&self, query: ForecastQuery) -> Result<Forecast, ProviderError> {
        self.calls.record(ForecastQuery::SIGNATURE.name, &query);
        Ok(self.forecast.clone())
    }
}

#[async_trait]
impl PlacesProvider for FixedProviders {
    async fn search_places(&self, query: PlaceQuery) -> Result<Vec<Place>, ProviderError> {
        self.calls.record(PlaceQuery::SIGNATURE.name, &query);
        Ok(self.places.clone())
    }
}

#[async_trait]
impl RestaurantsProvider for FixedProviders {
    async fn search_restaurants(
        &self,
        query: RestaurantQuery,
    ) -> Result<Vec<Restaurant>, ProviderError> {
        self.calls.record(RestaurantQuery::SIGNATURE.name, &query);
        Ok(self.restaurants.clone())
    }
}

#[async_trait]
impl VisaProvider for FixedProviders {
    async fn check_visa_requirements(
        &self,
        query: VisaQuery,
    ) -> Result<VisaRequirement, ProviderError> {
        self.calls.record(VisaQuery::SIGNATURE.name, &query);
        Ok(self.visa.clone())
    }
}

#[async_trait]
impl SafetyProvider for FixedProviders {
    async fn get_safety_advisories(
        &self,
        query: SafetyQuery,
    ) -> Result<SafetyAdvisory, ProviderError> {
        self.calls.record(SafetyQuery::SIGNATURE.name, &query);
        Ok(self.safety.clone())
    }
}

#[async_trait]
impl FlightsProvider for FixedProviders {
    async fn search_flights(&self, query: FlightQuery) -> Result<Vec<Flight>, ProviderError> {
        self.calls.record(FlightQuery::SIGNATURE.name, &query);
        Ok(self.flights.clone())
    }
}

#[async_trait]
impl HotelsProvider for FixedProviders {
    async fn search_hotels(&self, query: HotelQuery) -> Result<Vec<Hotel>, ProviderError> {
        self.calls.record(HotelQuery::SIGNATURE.name, &query);
        Ok(self.hotels.clone())
    }
}

#[async_trait]
impl ItineraryProvider for FixedProviders {
    async fn generate_itinerary(&self, query: TripQuery) -> Result<Itinerary, ProviderError> {
        self.calls.record(TripQuery::SIGNATURE.name, &query);
        Ok(self.itinerary.clone())
    }
}
