//! Delayed weather provider - wraps another provider with artificial delay.

use std::time::Duration;

use tokio::time::sleep;
use travel_providers::{async_trait, Forecast, ForecastQuery, ProviderError, WeatherProvider};

/// A weather provider that waits before delegating.
///
/// Useful for testing deadline handling in the adapter and transports.
pub struct DelayedWeather<P: WeatherProvider> {
    inner: P,
    delay: Duration,
}

impl<P: WeatherProvider> DelayedWeather<P> {
    /// Wrap `inner` with the specified delay.
    pub fn new(inner: P, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Wrap `inner` with a delay in milliseconds.
    pub fn with_millis(inner: P, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }
}

#[async_trait]
impl<P: WeatherProvider> WeatherProvider for DelayedWeather<P> {
    async fn forecast(&self, query: ForecastQuery) -> Result<Forecast, ProviderError> {
        sleep(self.delay).await;
        self.inner.forecast(query).await
    }
}
