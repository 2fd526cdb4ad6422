//! HTTP client for the REST travel data backend.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::TravelApiConfig;
use crate::error::ProviderError;
use crate::provider::{
    FlightsProvider, HotelsProvider, ItineraryProvider, PlacesProvider, RestaurantsProvider,
    SafetyProvider, VisaProvider,
};
use crate::types::{
    Flight, FlightQuery, Hotel, HotelQuery, Itinerary, Place, PlaceQuery, Restaurant,
    RestaurantQuery, SafetyAdvisory, SafetyQuery, TripQuery, VisaQuery, VisaRequirement,
};

const SERVICE: &str = "Travel API";

/// List endpoints answer either with a bare array or `{"results": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListResponse<T> {
    Wrapped { results: Vec<T> },
    Bare(Vec<T>),
}

impl<T> ListResponse<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            ListResponse::Wrapped { results } => results,
            ListResponse::Bare(items) => items,
        }
    }
}

/// Client for the travel data backend.
///
/// Implements every provider trait except weather.
#[derive(Clone)]
pub struct TravelApiClient {
    http: Client,
    config: TravelApiConfig,
}

impl TravelApiClient {
    /// Create a client for the given backend.
    pub fn new(config: TravelApiConfig) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .user_agent(concat!("travel-mcp/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self { http, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &TravelApiConfig {
        &self.config
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let url = self.config.endpoint(path);
        debug!("GET {} ({} params)", url, params.len());

        let response = self
            .authorize(self.http.get(&url).query(params))
            .send()
            .await?;

        Self::decode(path, response).await
    }

    async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ProviderError> {
        let url = self.config.endpoint(path);
        debug!("POST {}", url);

        let response = self
            .authorize(self.http.post(&url).json(body))
            .send()
            .await?;

        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, ProviderError> {
        let status = response.status();
        let body = response.text().await?;
        decode_body(path, status, &body)
    }
}

/// Map a backend answer to a result: 404 is `NotFound`, any other
/// non-2xx is `Status`, and a 2xx body must decode as `T`.
fn decode_body<T: DeserializeOwned>(
    path: &str,
    status: StatusCode,
    body: &str,
) -> Result<T, ProviderError> {
    if status == StatusCode::NOT_FOUND {
        return Err(ProviderError::NotFound(path.trim_start_matches('/').to_string()));
    }
    if !status.is_success() {
        debug!("{} answered {}: {}", path, status, body);
        return Err(ProviderError::Status {
            service: SERVICE,
            status: status.as_u16(),
        });
    }

    Ok(serde_json::from_str(body)?)
}

/// Build a query string parameter list, skipping absent values.
fn query_params<'a>(
    pairs: impl IntoIterator<Item = (&'a str, Option<String>)>,
) -> Vec<(&'a str, String)> {
    pairs
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
}

fn join(values: &[String]) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(values.join(","))
    }
}

#[async_trait]
impl PlacesProvider for TravelApiClient {
    async fn search_places(&self, query: PlaceQuery) -> Result<Vec<Place>, ProviderError> {
        let params = query_params([
            ("location", Some(query.location)),
            ("category", query.category),
        ]);
        let list: ListResponse<Place> = self.get_json("places", &params).await?;
        Ok(list.into_vec())
    }
}

#[async_trait]
impl RestaurantsProvider for TravelApiClient {
    async fn search_restaurants(
        &self,
        query: RestaurantQuery,
    ) -> Result<Vec<Restaurant>, ProviderError> {
        let params = query_params([
            ("location", Some(query.location)),
            ("cuisine", join(&query.cuisine)),
            ("price_range", query.price_range),
            ("dietary_restrictions", join(&query.dietary_restrictions)),
        ]);
        let list: ListResponse<Restaurant> = self.get_json("restaurants", &params).await?;
        Ok(list.into_vec())
    }
}

#[async_trait]
impl VisaProvider for TravelApiClient {
    async fn check_visa_requirements(
        &self,
        query: VisaQuery,
    ) -> Result<VisaRequirement, ProviderError> {
        let params = query_params([
            ("origin_country", Some(query.origin_country)),
            ("destination_country", Some(query.destination_country)),
        ]);
        self.get_json("visa", &params).await
    }
}

#[async_trait]
impl SafetyProvider for TravelApiClient {
    async fn get_safety_advisories(
        &self,
        query: SafetyQuery,
    ) -> Result<SafetyAdvisory, ProviderError> {
        let params = query_params([("country", Some(query.country))]);
        self.get_json("safety", &params).await
    }
}

#[async_trait]
impl FlightsProvider for TravelApiClient {
    async fn search_flights(&self, query: FlightQuery) -> Result<Vec<Flight>, ProviderError> {
        let params = query_params([
            ("origin", Some(query.origin)),
            ("destination", Some(query.destination)),
            ("date", Some(query.date)),
            ("return_date", query.return_date),
            ("adults", Some(query.adults.to_string())),
            ("cabin_class", query.cabin_class),
        ]);
        let list: ListResponse<Flight> = self.get_json("flights", &params).await?;
        Ok(list.into_vec())
    }
}

#[async_trait]
impl HotelsProvider for TravelApiClient {
    async fn search_hotels(&self, query: HotelQuery) -> Result<Vec<Hotel>, ProviderError> {
        let params = query_params([
            ("location", Some(query.location)),
            ("check_in", Some(query.check_in)),
            ("check_out", Some(query.check_out)),
            ("adults", Some(query.adults.to_string())),
            ("min_rating", query.min_rating.map(|r| r.to_string())),
            ("accommodation_type", query.accommodation_type),
        ]);
        let list: ListResponse<Hotel> = self.get_json("hotels", &params).await?;
        Ok(list.into_vec())
    }
}

#[async_trait]
impl ItineraryProvider for TravelApiClient {
    async fn generate_itinerary(&self, query: TripQuery) -> Result<Itinerary, ProviderError> {
        self.post_json("itinerary", &query).await
    }
}
