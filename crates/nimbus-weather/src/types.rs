use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Weather condition categories mapped from provider condition labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConditionCategory {
    #[default]
    Clear,
    Clouds,
    Rain,
    Thunderstorm,
    Snow,
    Fog,
    Other,
}

impl ConditionCategory {
    /// Classify a provider condition label (e.g. `weather[0].main`).
    ///
    /// Substring checks run in a fixed order and the first match wins:
    /// clear, cloud, rain/drizzle, thunderstorm, snow, mist/fog/haze.
    /// A label containing both "cloud" and "rain" therefore resolves to
    /// `Clouds` - the order is part of the contract.
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("clear") {
            Self::Clear
        } else if label.contains("cloud") {
            Self::Clouds
        } else if label.contains("rain") || label.contains("drizzle") {
            Self::Rain
        } else if label.contains("thunderstorm") {
            Self::Thunderstorm
        } else if label.contains("snow") {
            Self::Snow
        } else if label.contains("mist") || label.contains("fog") || label.contains("haze") {
            Self::Fog
        } else {
            Self::Other
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Clouds => "Cloudy",
            Self::Rain => "Rain",
            Self::Thunderstorm => "Thunderstorm",
            Self::Snow => "Snow",
            Self::Fog => "Fog",
            Self::Other => "Unknown",
        }
    }

    /// Get icon name for the presentation layer
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Clear => "sun",
            Self::Clouds => "cloud",
            Self::Rain => "cloud_rain",
            Self::Thunderstorm => "cloud_lightning",
            Self::Snow => "cloud_snow",
            Self::Fog => "cloud_fog",
            Self::Other => "cloud_question",
        }
    }
}

/// Normalized current conditions returned by a provider.
///
/// Transient by design: every query re-fetches, nothing is cached
/// across conversation turns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub country: Option<String>,
    pub category: ConditionCategory,
    /// Raw provider description, e.g. "light rain"
    pub description: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherSnapshot {
    /// Whether the current description indicates rain.
    pub fn will_rain(&self) -> bool {
        self.description.to_lowercase().contains("rain")
    }
}

/// One day of the daily forecast, reduced from the provider's
/// 3-hourly entries (the midday entry where available).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub temperature_c: f64,
    pub category: ConditionCategory,
    /// Raw provider description for the chosen entry
    pub description: String,
}

/// What to look up: a named city or geographic coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    City(String),
    Coords { lat: f64, lon: f64 },
}

impl std::fmt::Display for WeatherQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::City(city) => write!(f, "{}", city),
            Self::Coords { lat, lon } => write!(f, "{:.2},{:.2}", lat, lon),
        }
    }
}

/// Errors constructing a provider client. Distinct from
/// [`ProviderError`]: these are configuration problems, not response
/// outcomes.
#[derive(Debug, thiserror::Error)]
pub enum ProviderConfigError {
    #[error("Invalid provider base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("No weather data for: {0}")]
    NotFound(String),
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
    #[error("Network failure: {0}")]
    NetworkFailure(String),
}

impl ProviderError {
    /// User-friendly message for UI display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "Location not found. Check and try again.",
            Self::MalformedResponse(_) => "Weather service returned unexpected data.",
            Self::NetworkFailure(_) => "Weather service unavailable. Please try again later.",
        }
    }

    /// Whether the failure is something the user can correct (bad city)
    /// rather than a systemic problem.
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::MalformedResponse(_))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::NetworkFailure("request timed out".to_string())
        } else if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::NetworkFailure(err.to_string())
        }
    }
}
