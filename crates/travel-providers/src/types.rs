//! Query and record types exchanged with travel data providers.

use serde::{Deserialize, Serialize};

use crate::signature::{ProviderParam, ProviderQuery, ProviderSignature};

// ============================================================================
// Queries
// ============================================================================

/// Weather forecast query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastQuery {
    pub location: String,
    #[serde(default)]
    pub days: Option<u32>,
}

impl ProviderQuery for ForecastQuery {
    const SIGNATURE: ProviderSignature = ProviderSignature::new(
        "get_forecast",
        &[
            ProviderParam::required("location"),
            ProviderParam::optional("days"),
        ],
    );
}

/// Places search query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaceQuery {
    pub location: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl ProviderQuery for PlaceQuery {
    const SIGNATURE: ProviderSignature = ProviderSignature::new(
        "search_places",
        &[
            ProviderParam::required("location"),
            ProviderParam::optional("category"),
        ],
    );
}

/// Restaurant search query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RestaurantQuery {
    pub location: String,
    #[serde(default)]
    pub cuisine: Vec<String>,
    #[serde(default)]
    pub price_range: Option<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
}

impl ProviderQuery for RestaurantQuery {
    const SIGNATURE: ProviderSignature = ProviderSignature::new(
        "search_restaurants",
        &[
            ProviderParam::required("location"),
            ProviderParam::optional("cuisine"),
            ProviderParam::optional("price_range"),
            ProviderParam::optional("dietary_restrictions"),
        ],
    );
}

/// Visa requirement lookup for a passport/destination pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VisaQuery {
    pub origin_country: String,
    pub destination_country: String,
}

impl ProviderQuery for VisaQuery {
    const SIGNATURE: ProviderSignature = ProviderSignature::new(
        "check_visa_requirements",
        &[
            ProviderParam::required("origin_country"),
            ProviderParam::required("destination_country"),
        ],
    );
}

/// Safety advisory lookup for a destination country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SafetyQuery {
    pub country: String,
}

impl ProviderQuery for SafetyQuery {
    const SIGNATURE: ProviderSignature = ProviderSignature::new(
        "get_safety_advisories",
        &[ProviderParam::required("country")],
    );
}

/// Flight search query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlightQuery {
    pub origin: String,
    pub destination: String,
    pub date: String,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default)]
    pub cabin_class: Option<String>,
}

impl ProviderQuery for FlightQuery {
    const SIGNATURE: ProviderSignature = ProviderSignature::new(
        "search_flights",
        &[
            ProviderParam::required("origin"),
            ProviderParam::required("destination"),
            ProviderParam::required("date"),
            ProviderParam::optional("return_date"),
            ProviderParam::optional("adults"),
            ProviderParam::optional("cabin_class"),
        ],
    );
}

/// Hotel search query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HotelQuery {
    pub location: String,
    pub check_in: String,
    pub check_out: String,
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default)]
    pub min_rating: Option<f64>,
    #[serde(default)]
    pub accommodation_type: Option<String>,
}

impl ProviderQuery for HotelQuery {
    const SIGNATURE: ProviderSignature = ProviderSignature::new(
        "search_hotels",
        &[
            ProviderParam::required("location"),
            ProviderParam::required("check_in"),
            ProviderParam::required("check_out"),
            ProviderParam::optional("adults"),
            ProviderParam::optional("min_rating"),
            ProviderParam::optional("accommodation_type"),
        ],
    );
}

/// Itinerary generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TripQuery {
    pub origin: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub accommodation_type: Option<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    /// Let the generator move outdoor activities away from bad-weather days.
    #[serde(default = "default_avoid_bad_weather")]
    pub avoid_bad_weather: bool,
    /// Language code for generated descriptions.
    #[serde(default = "default_language")]
    pub language: String,
}

impl ProviderQuery for TripQuery {
    const SIGNATURE: ProviderSignature = ProviderSignature::new(
        "generate_itinerary",
        &[
            ProviderParam::required("origin"),
            ProviderParam::required("destination"),
            ProviderParam::required("start_date"),
            ProviderParam::required("end_date"),
            ProviderParam::optional("adults"),
            ProviderParam::optional("budget"),
            ProviderParam::optional("activities"),
            ProviderParam::optional("accommodation_type"),
            ProviderParam::optional("dietary_restrictions"),
            ProviderParam::optional("avoid_bad_weather"),
            ProviderParam::optional("language"),
        ],
    );
}

fn default_adults() -> u32 {
    1
}

fn default_avoid_bad_weather() -> bool {
    true
}

fn default_language() -> String {
    "en".to_string()
}

// ============================================================================
// Records
// ============================================================================

/// Weather forecast for a location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub location: String,
    #[serde(default)]
    pub current: Option<CurrentConditions>,
    #[serde(default)]
    pub daily: Vec<DailyForecast>,
}

/// Current observed conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Temperature in Celsius.
    pub temperature: f64,
    pub condition: String,
    #[serde(default)]
    pub humidity: Option<u32>,
    /// Wind speed in km/h.
    #[serde(default)]
    pub wind_speed: Option<f64>,
}

/// One day of forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: String,
    pub temperature_high: f64,
    pub temperature_low: f64,
    pub description: String,
    /// Chance of rain in percent.
    #[serde(default)]
    pub rain_chance: u32,
}

/// A point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
}

/// A restaurant listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub price_level: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Whether a visa is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawVisaStatus", into = "String")]
pub enum VisaStatus {
    Required,
    NotRequired,
    /// Anything else the upstream reports (e.g. "visa on arrival").
    Other(String),
}

/// Upstream APIs report visa status either as a boolean or a word.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawVisaStatus {
    Flag(bool),
    Text(String),
}

impl From<RawVisaStatus> for VisaStatus {
    fn from(raw: RawVisaStatus) -> Self {
        match raw {
            RawVisaStatus::Flag(true) => VisaStatus::Required,
            RawVisaStatus::Flag(false) => VisaStatus::NotRequired,
            RawVisaStatus::Text(text) => match text.trim().to_lowercase().as_str() {
                "yes" | "required" | "true" => VisaStatus::Required,
                "no" | "not_required" | "not required" | "false" => VisaStatus::NotRequired,
                _ => VisaStatus::Other(text),
            },
        }
    }
}

impl From<VisaStatus> for String {
    fn from(status: VisaStatus) -> Self {
        match status {
            VisaStatus::Required => "yes".to_string(),
            VisaStatus::NotRequired => "no".to_string(),
            VisaStatus::Other(text) => text,
        }
    }
}

/// Visa requirements for a passport/destination pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisaRequirement {
    pub visa_required: VisaStatus,
    #[serde(default)]
    pub visa_type: Option<String>,
    #[serde(default)]
    pub max_stay: Option<String>,
    #[serde(default)]
    pub processing_time: Option<String>,
    #[serde(default)]
    pub fee: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
}

/// Safety advisory for a destination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SafetyAdvisory {
    #[serde(default)]
    pub advisory_level: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub advisories: Vec<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub recommended_vaccines: Vec<String>,
}

/// A flight offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub airline: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub departure_time: Option<String>,
    #[serde(default)]
    pub arrival_time: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub stops: u32,
}

/// A hotel offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub name: String,
    #[serde(default)]
    pub price_per_night: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

/// One day of a generated itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDay {
    pub date: String,
    #[serde(default)]
    pub activities: Vec<String>,
}

/// An event happening at the destination during the trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
}

/// Booking URLs returned alongside a generated itinerary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingLinks {
    #[serde(default)]
    pub flights: Vec<String>,
    #[serde(default)]
    pub hotels: Vec<String>,
}

impl BookingLinks {
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty() && self.hotels.is_empty()
    }
}

/// A generated trip plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    #[serde(default)]
    pub estimated_cost: Option<f64>,
    #[serde(default)]
    pub days: Vec<ItineraryDay>,
    #[serde(default)]
    pub flights: Vec<Flight>,
    #[serde(default)]
    pub hotels: Vec<Hotel>,
    #[serde(default)]
    pub restaurants: Vec<Restaurant>,
    #[serde(default)]
    pub visa: Option<VisaRequirement>,
    #[serde(default)]
    pub safety: Option<SafetyAdvisory>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub booking_links: BookingLinks,
}

impl Itinerary {
    /// Whether the generator produced nothing usable.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
            && self.flights.is_empty()
            && self.hotels.is_empty()
            && self.restaurants.is_empty()
            && self.events.is_empty()
            && self.booking_links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::ProviderCall;
    use serde_json::{json, Value};
    use std::collections::BTreeSet;

    /// Check a fully populated query against its declared signature.
    ///
    /// The serialized field names must equal the signature's names, a call
    /// carrying every signature argument must decode back to the same
    /// query, and a call carrying only the required arguments must decode.
    fn assert_matches_signature<Q>(full: Q)
    where
        Q: ProviderQuery + Serialize + PartialEq + std::fmt::Debug,
    {
        let signature = Q::SIGNATURE;
        let Value::Object(fields) = serde_json::to_value(&full).unwrap() else {
            panic!("{} query does not serialize to an object", signature.name);
        };

        let field_names: BTreeSet<&str> = fields.keys().map(String::as_str).collect();
        let declared: BTreeSet<&str> = signature.params.iter().map(|p| p.name).collect();
        assert_eq!(field_names, declared, "{} signature is stale", signature.name);

        let call = signature
            .params
            .iter()
            .fold(ProviderCall::new(signature.name), |call, param| {
                call.with_arg(param.name, fields[param.name].clone())
            });
        assert_eq!(Q::from_call(call).unwrap(), full);

        let minimal = signature
            .required()
            .fold(ProviderCall::new(signature.name), |call, name| {
                call.with_arg(name, fields[name].clone())
            });
        if let Err(e) = Q::from_call(minimal) {
            panic!("{} needs more than its required arguments: {}", signature.name, e);
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    // ========================================================================
    // Signatures
    // ========================================================================

    mod signatures {
        use super::*;

        #[test]
        fn test_forecast_query() {
            assert_matches_signature(ForecastQuery {
                location: "London".to_string(),
                days: Some(3),
            });
        }

        #[test]
        fn test_place_query() {
            assert_matches_signature(PlaceQuery {
                location: "Paris".to_string(),
                category: Some("museum".to_string()),
            });
        }

        #[test]
        fn test_restaurant_query() {
            assert_matches_signature(RestaurantQuery {
                location: "Rome".to_string(),
                cuisine: strings(&["italian"]),
                price_range: Some("$$".to_string()),
                dietary_restrictions: strings(&["vegetarian"]),
            });
        }

        #[test]
        fn test_visa_query() {
            assert_matches_signature(VisaQuery {
                origin_country: "United States".to_string(),
                destination_country: "Japan".to_string(),
            });
        }

        #[test]
        fn test_safety_query() {
            assert_matches_signature(SafetyQuery {
                country: "Japan".to_string(),
            });
        }

        #[test]
        fn test_flight_query() {
            assert_matches_signature(FlightQuery {
                origin: "NYC".to_string(),
                destination: "LAX".to_string(),
                date: "2024-12-15".to_string(),
                return_date: Some("2024-12-20".to_string()),
                adults: 2,
                cabin_class: Some("business".to_string()),
            });
        }

        #[test]
        fn test_hotel_query() {
            assert_matches_signature(HotelQuery {
                location: "New York".to_string(),
                check_in: "2024-12-15".to_string(),
                check_out: "2024-12-18".to_string(),
                adults: 2,
                min_rating: Some(4.0),
                accommodation_type: Some("hotel".to_string()),
            });
        }

        #[test]
        fn test_trip_query() {
            assert_matches_signature(TripQuery {
                origin: "Boston".to_string(),
                destination: "Lisbon".to_string(),
                start_date: "2024-12-15".to_string(),
                end_date: "2024-12-20".to_string(),
                adults: 2,
                budget: Some(3000.0),
                activities: strings(&["museums"]),
                accommodation_type: Some("apartment".to_string()),
                dietary_restrictions: strings(&["halal"]),
                avoid_bad_weather: false,
                language: "pt".to_string(),
            });
        }
    }

    #[test]
    fn test_visa_status_forms() {
        let flag: VisaRequirement = serde_json::from_value(json!({"visa_required": true})).unwrap();
        assert_eq!(flag.visa_required, VisaStatus::Required);

        let word: VisaRequirement = serde_json::from_value(json!({"visa_required": "no"})).unwrap();
        assert_eq!(word.visa_required, VisaStatus::NotRequired);

        let other: VisaRequirement =
            serde_json::from_value(json!({"visa_required": "visa on arrival"})).unwrap();
        assert_eq!(other.visa_required, VisaStatus::Other("visa on arrival".to_string()));
    }

    #[test]
    fn test_flight_query_defaults() {
        let call = ProviderCall::new("search_flights")
            .with_arg("origin", json!("NYC"))
            .with_arg("destination", json!("LAX"))
            .with_arg("date", json!("2024-12-15"));
        let query = FlightQuery::from_call(call).unwrap();
        assert_eq!(query.adults, 1);
        assert!(query.cabin_class.is_none());
    }

    #[test]
    fn test_flight_query_rejects_departure_date() {
        let call = ProviderCall::new("search_flights")
            .with_arg("origin", json!("NYC"))
            .with_arg("destination", json!("LAX"))
            .with_arg("departure_date", json!("2024-12-15"));
        assert!(FlightQuery::from_call(call).is_err());
    }

    #[test]
    fn test_hotel_query_rejects_destination() {
        let call = ProviderCall::new("search_hotels")
            .with_arg("destination", json!("New York"))
            .with_arg("check_in", json!("2024-12-15"))
            .with_arg("check_out", json!("2024-12-18"));
        assert!(HotelQuery::from_call(call).is_err());
    }

    #[test]
    fn test_itinerary_is_empty() {
        assert!(Itinerary::default().is_empty());
        let itinerary = Itinerary {
            days: vec![ItineraryDay {
                date: "2024-12-15".to_string(),
                activities: vec!["Museum".to_string()],
            }],
            ..Default::default()
        };
        assert!(!itinerary.is_empty());

        let links_only = Itinerary {
            booking_links: BookingLinks {
                flights: strings(&["https://book.example/f/1"]),
                hotels: Vec::new(),
            },
            ..Default::default()
        };
        assert!(!links_only.is_empty());

        let events_only = Itinerary {
            events: vec![Event {
                name: "Fado night".to_string(),
                start_time: None,
                venue: None,
            }],
            ..Default::default()
        };
        assert!(!events_only.is_empty());
    }

    #[test]
    fn test_trip_query_defaults() {
        let call = ProviderCall::new("generate_itinerary")
            .with_arg("origin", json!("Boston"))
            .with_arg("destination", json!("Lisbon"))
            .with_arg("start_date", json!("2024-12-15"))
            .with_arg("end_date", json!("2024-12-20"));
        let query = TripQuery::from_call(call).unwrap();
        assert!(query.avoid_bad_weather);
        assert_eq!(query.language, "en");
        assert_eq!(query.adults, 1);
    }
}
