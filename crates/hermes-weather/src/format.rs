//! Plain-text rendering of NWS data for tool output.

use crate::client::{AlertFeature, ForecastPeriod};

/// Forecast periods included in a forecast summary.
pub const FORECAST_PERIODS: usize = 5;

fn or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

#[must_use]
pub fn format_alert(feature: &AlertFeature) -> String {
    let props = &feature.properties;
    [
        format!("Event: {}", or(&props.event, "Unknown")),
        format!("Area: {}", or(&props.area_desc, "Unknown")),
        format!("Severity: {}", or(&props.severity, "Unknown")),
        format!("Status: {}", or(&props.status, "Unknown")),
        format!("Headline: {}", or(&props.headline, "No headline")),
        "---".to_string(),
    ]
    .join("\n")
}

#[must_use]
pub fn format_period(period: &ForecastPeriod) -> String {
    format!(
        "{}:\nTemperature: {}°{}\nWind: {} {}\n{}\n---",
        period.name,
        period.temperature,
        period.temperature_unit,
        period.wind_speed,
        period.wind_direction,
        period.short_forecast,
    )
}

#[must_use]
pub fn alerts_text(state: &str, alerts: &[AlertFeature]) -> String {
    if alerts.is_empty() {
        return format!("No active alerts for {state}");
    }
    let formatted: Vec<String> = alerts.iter().map(format_alert).collect();
    format!("Active alerts for {state}:\n\n{}", formatted.join("\n"))
}

#[must_use]
pub fn forecast_text(periods: &[ForecastPeriod]) -> String {
    if periods.is_empty() {
        return "No forecast periods available".to_string();
    }
    periods
        .iter()
        .take(FORECAST_PERIODS)
        .map(format_period)
        .collect::<Vec<_>>()
        .join("\n")
}
