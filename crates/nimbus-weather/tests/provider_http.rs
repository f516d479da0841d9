//! Integration tests for OpenWeatherClient against a stub HTTP server.

use nimbus_weather::{
    ConditionCategory, OpenWeatherClient, ProviderError, WeatherProvider, WeatherQuery,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn current_weather_body() -> serde_json::Value {
    serde_json::json!({
        "cod": 200,
        "name": "Paris",
        "sys": { "country": "FR" },
        "main": { "temp": 20.0, "humidity": 50 },
        "weather": [{ "main": "Clear", "description": "clear sky" }]
    })
}

async fn client_for(server: &MockServer) -> OpenWeatherClient {
    OpenWeatherClient::with_base_url(&server.uri(), "test-key").unwrap()
}

#[tokio::test]
async fn test_fetch_by_city_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "paris"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let snap = client
        .fetch_current(&WeatherQuery::City("paris".into()))
        .await
        .unwrap();

    assert_eq!(snap.city, "Paris");
    assert_eq!(snap.country.as_deref(), Some("FR"));
    assert_eq!(snap.category, ConditionCategory::Clear);
    assert_eq!(snap.temperature_c, 20.0);
    assert_eq!(snap.humidity_pct, 50);
}

#[tokio::test]
async fn test_fetch_by_coords_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "28.67"))
        .and(query_param("lon", "77.22"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let snap = client
        .fetch_current(&WeatherQuery::Coords {
            lat: 28.67,
            lon: 77.22,
        })
        .await
        .unwrap();

    assert_eq!(snap.city, "Paris");
}

#[tokio::test]
async fn test_http_404_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .fetch_current(&WeatherQuery::City("nowhereville".into()))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::NotFound(_)));
    assert!(err.is_user_correctable());
}

#[tokio::test]
async fn test_body_level_error_cod_is_not_found() {
    // OWM sometimes reports failures in the body with HTTP 200
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .fetch_current(&WeatherQuery::City("nowhereville".into()))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::NotFound(_)));
}

#[tokio::test]
async fn test_missing_fields_is_malformed() {
    let server = MockServer::start().await;

    let mut body = current_weather_body();
    body.as_object_mut().unwrap().remove("main");

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .fetch_current(&WeatherQuery::City("paris".into()))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .fetch_current(&WeatherQuery::City("paris".into()))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_timeout_is_network_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(current_weather_body())
                .set_delay(std::time::Duration::from_millis(400)),
        )
        .mount(&server)
        .await;

    let client = OpenWeatherClient::with_base_url_and_timeout(
        &server.uri(),
        "test-key",
        std::time::Duration::from_millis(100),
    )
    .unwrap();
    let err = client
        .fetch_current(&WeatherQuery::City("paris".into()))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::NetworkFailure(_)));
    assert!(!err.is_user_correctable());
}

#[tokio::test]
async fn test_server_error_is_network_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .fetch_current(&WeatherQuery::City("paris".into()))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::NetworkFailure(_)));
    assert!(!err.is_user_correctable());
}

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "cod": "200",
        "list": [
            {
                "dt_txt": "2026-08-29 09:00:00",
                "main": { "temp": 17.0 },
                "weather": [{ "main": "Clouds", "description": "scattered clouds" }]
            },
            {
                "dt_txt": "2026-08-29 12:00:00",
                "main": { "temp": 22.0 },
                "weather": [{ "main": "Clear", "description": "clear sky" }]
            },
            {
                "dt_txt": "2026-08-30 12:00:00",
                "main": { "temp": 15.0 },
                "weather": [{ "main": "Rain", "description": "light rain" }]
            }
        ]
    })
}

#[tokio::test]
async fn test_fetch_forecast_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("q", "paris"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let daily = client
        .fetch_forecast(&WeatherQuery::City("paris".into()))
        .await
        .unwrap();

    assert_eq!(daily.len(), 2);
    // Midday entry represents the first day
    assert_eq!(daily[0].temperature_c, 22.0);
    assert_eq!(daily[0].category, ConditionCategory::Clear);
    assert_eq!(daily[1].category, ConditionCategory::Rain);
}

#[tokio::test]
async fn test_fetch_forecast_unknown_city_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .fetch_forecast(&WeatherQuery::City("nowhereville".into()))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::NotFound(_)));
}
