//! Stub travel data providers for testing.
//!
//! This crate provides stand-ins for the collaborators in `travel-providers`:
//! - `FixedProviders` - Canned answers for every domain, with a call log
//! - `FailingProviders` - Every call fails
//! - `DelayedWeather` - Wraps a weather provider with artificial delay
//!
//! For real data, use `travel_providers::http_providers` instead.
//!
//! # Example
//!
//! ```rust
//! use mock_providers::FixedProviders;
//!
//! let stub = FixedProviders::sample();
//! let calls = stub.calls();
//! let providers = stub.into_providers();
//! assert_eq!(calls.total(), 0);
//! # drop(providers);
//! ```

mod calls;
mod delayed;
mod failing;
mod fixed;

use std::sync::Arc;

use travel_providers::Providers;

pub use calls::{CallLog, RecordedCall};
pub use delayed::DelayedWeather;
pub use failing::FailingProviders;
pub use fixed::{sample_forecast, FixedProviders};

impl FixedProviders {
    /// Use this stub for every provider domain.
    pub fn into_providers(self) -> Providers {
        Providers::from_shared(Arc::new(self))
    }
}

impl FailingProviders {
    /// Use this stub for every provider domain.
    pub fn into_providers(self) -> Providers {
        Providers::from_shared(Arc::new(self))
    }
}
