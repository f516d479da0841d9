//! Weather lookups for Nimbus
//!
//! Provides current conditions via the OpenWeatherMap API, a provider
//! trait for callers that must not depend on the HTTP mechanism, and a
//! cancellable periodic refresh task.

pub mod provider;
pub mod refresh;
pub mod types;

pub use provider::{OpenWeatherClient, WeatherProvider};
pub use refresh::RefreshTask;
pub use types::*;
