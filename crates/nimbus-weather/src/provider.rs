//! OpenWeatherMap client for current conditions and daily forecasts.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use crate::types::{
    ConditionCategory, DailyForecast, ProviderConfigError, ProviderError, WeatherQuery,
    WeatherSnapshot,
};

const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org";
const CURRENT_PATH: &str = "/data/2.5/weather";
const FORECAST_PATH: &str = "/data/2.5/forecast";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// How many days of forecast to keep.
const FORECAST_DAYS: usize = 7;

/// Capability interface for current-conditions lookups.
///
/// The chat session depends only on this trait so it never touches the
/// HTTP machinery directly. One call yields exactly one outcome; no
/// retries are performed at this layer.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch_current(
        &self,
        query: &WeatherQuery,
    ) -> Result<WeatherSnapshot, ProviderError>;
}

/// OpenWeatherMap API client
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Arc<Client>,
    base_url: Url,
    api_key: String,
}

impl OpenWeatherClient {
    /// Create a client against the production OpenWeatherMap host.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderConfigError> {
        Self::with_base_url(OPENWEATHER_API_BASE, api_key)
    }

    /// Create a client against an explicit base URL (used by tests to
    /// point at a stub server).
    pub fn with_base_url(
        base_url: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, ProviderConfigError> {
        Self::with_base_url_and_timeout(
            base_url,
            api_key,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        )
    }

    /// Same as [`Self::with_base_url`] with an explicit request
    /// timeout. Non-response within the window surfaces as
    /// [`ProviderError::NetworkFailure`].
    pub fn with_base_url_and_timeout(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderConfigError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = Url::parse(base_url)?;

        Ok(Self {
            client: Arc::new(client),
            base_url,
            api_key: api_key.into(),
        })
    }

    fn request_url(&self, path: &str, query: &WeatherQuery) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("appid", &self.api_key);
            pairs.append_pair("units", "metric");
            match query {
                WeatherQuery::City(city) => {
                    pairs.append_pair("q", city);
                }
                WeatherQuery::Coords { lat, lon } => {
                    pairs.append_pair("lat", &lat.to_string());
                    pairs.append_pair("lon", &lon.to_string());
                }
            }
        }
        url
    }

    async fn get_checked(
        &self,
        path: &str,
        query: &WeatherQuery,
    ) -> Result<reqwest::Response, ProviderError> {
        let url = self.request_url(path, query);
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            tracing::debug!("No weather match for {}", query);
            return Err(ProviderError::NotFound(query.to_string()));
        }
        if !status.is_success() {
            return Err(ProviderError::NetworkFailure(format!(
                "provider returned HTTP {}",
                status
            )));
        }

        Ok(response)
    }

    #[instrument(skip(self), level = "debug")]
    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherSnapshot, ProviderError> {
        let response = self.get_checked(CURRENT_PATH, query).await?;
        let body: CurrentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        snapshot_from_response(query, body)
    }

    /// Fetch the daily forecast: the provider's 3-hourly entries are
    /// grouped by date, the midday entry represents each day, and the
    /// first seven days are kept.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_forecast(
        &self,
        query: &WeatherQuery,
    ) -> Result<Vec<DailyForecast>, ProviderError> {
        let response = self.get_checked(FORECAST_PATH, query).await?;
        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        forecast_from_response(query, body)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch_current(
        &self,
        query: &WeatherQuery,
    ) -> Result<WeatherSnapshot, ProviderError> {
        self.fetch(query).await
    }
}

/// Raw OpenWeatherMap current-weather response. Fields are optional so
/// a structurally broken body surfaces as `MalformedResponse` rather
/// than a generic decode failure.
#[derive(Debug, Deserialize)]
struct CurrentResponse {
    #[serde(default)]
    cod: serde_json::Value,
    name: Option<String>,
    main: Option<MainFields>,
    weather: Option<Vec<ConditionFields>>,
    sys: Option<SysFields>,
}

#[derive(Debug, Deserialize)]
struct MainFields {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct ConditionFields {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct SysFields {
    country: Option<String>,
}

/// Raw OpenWeatherMap 5-day/3-hour forecast response.
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    cod: serde_json::Value,
    list: Option<Vec<ForecastEntry>>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    /// Local timestamp, "YYYY-MM-DD HH:MM:SS"
    dt_txt: String,
    main: ForecastMain,
    weather: Vec<ConditionFields>,
}

#[derive(Debug, Deserialize)]
struct ForecastMain {
    temp: f64,
}

/// OWM reports cod as a number on success and a string on errors.
fn check_cod(cod: &serde_json::Value, query: &WeatherQuery) -> Result<(), ProviderError> {
    match (cod.as_u64(), cod.as_str()) {
        (Some(200), _) | (_, Some("200")) => Ok(()),
        (None, None) if cod.is_null() => Err(ProviderError::MalformedResponse(
            "missing `cod` field".to_string(),
        )),
        _ => Err(ProviderError::NotFound(query.to_string())),
    }
}

fn snapshot_from_response(
    query: &WeatherQuery,
    body: CurrentResponse,
) -> Result<WeatherSnapshot, ProviderError> {
    check_cod(&body.cod, query)?;

    let main = body
        .main
        .ok_or_else(|| ProviderError::MalformedResponse("missing `main` block".to_string()))?;
    let condition = body
        .weather
        .and_then(|w| w.into_iter().next())
        .ok_or_else(|| ProviderError::MalformedResponse("missing `weather` block".to_string()))?;

    let city = body
        .name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| query.to_string());

    Ok(WeatherSnapshot {
        city,
        country: body.sys.and_then(|s| s.country),
        category: ConditionCategory::from_label(&condition.main),
        description: condition.description,
        temperature_c: main.temp,
        humidity_pct: main.humidity,
        fetched_at: Utc::now(),
    })
}

fn forecast_from_response(
    query: &WeatherQuery,
    body: ForecastResponse,
) -> Result<Vec<DailyForecast>, ProviderError> {
    check_cod(&body.cod, query)?;

    let list = body
        .list
        .ok_or_else(|| ProviderError::MalformedResponse("missing `list` block".to_string()))?;

    // Group 3-hourly entries by calendar date, preserving order
    let mut days: Vec<(&str, Vec<&ForecastEntry>)> = Vec::new();
    for entry in &list {
        let date = entry.dt_txt.split(' ').next().unwrap_or("");
        if let Some((_, group)) = days.iter_mut().find(|(d, _)| *d == date) {
            group.push(entry);
        } else {
            days.push((date, vec![entry]));
        }
    }

    days.into_iter()
        .take(FORECAST_DAYS)
        .map(|(date, group)| {
            // The midday entry best represents the day; fall back to
            // the first entry for partial days
            let pick = group
                .iter()
                .find(|e| e.dt_txt.contains("12:00:00"))
                .or_else(|| group.first())
                .ok_or_else(|| {
                    ProviderError::MalformedResponse("empty forecast day".to_string())
                })?;

            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
                ProviderError::MalformedResponse(format!("bad `dt_txt` date: {}", e))
            })?;
            let condition = pick.weather.first().ok_or_else(|| {
                ProviderError::MalformedResponse("missing `weather` block".to_string())
            })?;

            Ok(DailyForecast {
                date,
                temperature_c: pick.main.temp,
                category: ConditionCategory::from_label(&condition.main),
                description: condition.description.clone(),
            })
        })
        .collect()
}
