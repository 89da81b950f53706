use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::WeatherError;

pub const DEFAULT_API_URL: &str = "https://api.weather.gov";
pub const DEFAULT_USER_AGENT: &str = "Weather Tool (your-email@example.com)";

/// Properties of a single active alert. Absent fields decode as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertProperties {
    pub event: String,
    pub area_desc: String,
    pub severity: String,
    pub status: String,
    pub headline: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertFeature {
    #[serde(default)]
    pub properties: AlertProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForecastPeriod {
    pub name: String,
    pub temperature: i64,
    pub temperature_unit: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub short_forecast: String,
}

#[derive(Deserialize)]
struct AlertsResponse {
    #[serde(default)]
    features: Vec<AlertFeature>,
}

#[derive(Default, Deserialize)]
struct PointsProperties {
    #[serde(default)]
    forecast: String,
}

#[derive(Deserialize)]
struct PointsResponse {
    #[serde(default)]
    properties: PointsProperties,
}

#[derive(Default, Deserialize)]
struct ForecastProperties {
    #[serde(default)]
    periods: Vec<ForecastPeriod>,
}

#[derive(Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    properties: ForecastProperties,
}

/// Client for the National Weather Service API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct NwsClient {
    http: Client,
    base_url: String,
    user_agent: String,
}

impl Default for NwsClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, DEFAULT_USER_AGENT)
    }
}

impl NwsClient {
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_agent: user_agent.into(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch active alerts for a state or zone code.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-200 status, or a body
    /// that is not an alerts collection.
    pub async fn alerts(&self, area: &str) -> Result<Vec<AlertFeature>, WeatherError> {
        let url = format!("{}/alerts", self.base_url);
        let resp: AlertsResponse = self.get_json(&url, &[("area", area)]).await?;
        Ok(resp.features)
    }

    /// Fetch the forecast periods for a coordinate pair.
    ///
    /// Resolves the gridpoint forecast URL through `/points` first.
    ///
    /// # Errors
    ///
    /// Returns an error if either request fails, or the points response has
    /// no forecast URL.
    pub async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<ForecastPeriod>, WeatherError> {
        let points_url = format!("{}/points/{latitude:.4},{longitude:.4}", self.base_url);
        let points: PointsResponse = self.get_json(&points_url, &[]).await?;

        let forecast_url = points.properties.forecast;
        if forecast_url.is_empty() {
            return Err(WeatherError::MissingForecastUrl);
        }

        let forecast: ForecastResponse = self.get_json(&forecast_url, &[]).await?;
        Ok(forecast.properties.periods)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, WeatherError> {
        tracing::debug!(%url, "requesting NWS resource");

        let resp = self
            .http
            .get(url)
            .query(query)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "application/geo+json")
            .send()
            .await?;

        if resp.status() != StatusCode::OK {
            return Err(WeatherError::Status(resp.status()));
        }

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use axum::{
        extract::{Path, Query},
        http::{HeaderMap, StatusCode},
        routing::get,
        Json, Router,
    };
    use serde_json::{json, Value};

    use super::*;

    /// Serve a fake NWS API on an ephemeral port and return its base URL.
    pub(crate) async fn fake_nws() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base = format!("http://{addr}");
        let forecast_url = format!("{base}/gridpoints/MTR/85,105/forecast");

        let app = Router::new()
            .route("/alerts", get(alerts))
            .route(
                "/points/{coords}",
                get(move |Path(coords): Path<String>| {
                    let forecast_url = forecast_url.clone();
                    async move {
                        if coords == "0.0000,0.0000" {
                            Json(json!({"properties": {}}))
                        } else {
                            Json(json!({"properties": {"forecast": forecast_url}}))
                        }
                    }
                }),
            )
            .route("/gridpoints/MTR/85,105/forecast", get(forecast));

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        base
    }

    async fn alerts(
        headers: HeaderMap,
        Query(query): Query<std::collections::HashMap<String, String>>,
    ) -> Result<Json<Value>, StatusCode> {
        if headers.get("user-agent").is_none() {
            return Err(StatusCode::FORBIDDEN);
        }
        match query.get("area").map(String::as_str) {
            Some("CA") => Ok(Json(json!({
                "features": [
                    {"properties": {
                        "event": "Wind Advisory",
                        "areaDesc": "San Francisco",
                        "severity": "Moderate",
                        "status": "Actual",
                        "headline": "Wind Advisory until 6PM"
                    }},
                    {"properties": {"event": "Heat Advisory"}}
                ]
            }))),
            Some("XX") => Err(StatusCode::INTERNAL_SERVER_ERROR),
            _ => Ok(Json(json!({"features": []}))),
        }
    }

    async fn forecast() -> Json<Value> {
        let periods: Vec<Value> = (1..=7)
            .map(|i| {
                json!({
                    "name": format!("Period {i}"),
                    "temperature": 60 + i,
                    "temperatureUnit": "F",
                    "windSpeed": "10 mph",
                    "windDirection": "W",
                    "shortForecast": "Sunny"
                })
            })
            .collect();
        Json(json!({"properties": {"periods": periods}}))
    }

    #[tokio::test]
    async fn fetches_alerts_for_area() {
        let client = NwsClient::new(fake_nws().await, DEFAULT_USER_AGENT);
        let alerts = client.alerts("CA").await.unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].properties.area_desc, "San Francisco");
        assert!(alerts[1].properties.headline.is_empty());
    }

    #[tokio::test]
    async fn non_ok_status_is_an_error() {
        let client = NwsClient::new(fake_nws().await, DEFAULT_USER_AGENT);
        let err = client.alerts("XX").await.unwrap_err();
        assert!(matches!(err, WeatherError::Status(s) if s == StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    async fn forecast_follows_points_link() {
        let client = NwsClient::new(fake_nws().await, DEFAULT_USER_AGENT);
        let periods = client.forecast(37.7749, -122.4194).await.unwrap();
        assert_eq!(periods.len(), 7);
        assert_eq!(periods[0].name, "Period 1");
        assert_eq!(periods[0].temperature, 61);
    }

    #[tokio::test]
    async fn forecast_without_link_is_an_error() {
        let client = NwsClient::new(fake_nws().await, DEFAULT_USER_AGENT);
        let err = client.forecast(0.0, 0.0).await.unwrap_err();
        assert!(matches!(err, WeatherError::MissingForecastUrl));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = NwsClient::new("https://api.weather.gov/", DEFAULT_USER_AGENT);
        assert_eq!(client.base_url(), "https://api.weather.gov");
    }
}
