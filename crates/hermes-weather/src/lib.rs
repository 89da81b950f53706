pub mod client;
pub mod error;
pub mod format;
pub mod tools;

pub use client::{NwsClient, DEFAULT_API_URL, DEFAULT_USER_AGENT};
pub use error::WeatherError;
pub use tools::{alerts_tool, forecast_tool, weather_tools};
