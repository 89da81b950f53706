/// Errors talking to the National Weather Service API.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("error making request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error! status: {0}")]
    Status(reqwest::StatusCode),

    #[error("error parsing JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no forecast URL found in points response")]
    MissingForecastUrl,
}
