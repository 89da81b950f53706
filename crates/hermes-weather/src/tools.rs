use async_trait::async_trait;
use hermes_core::{
    HandlerError, InputSchema, PropertySchema, SchemaType, Tool, ToolContext, ToolHandler,
    ToolResult, ToolRunParams,
};

use crate::client::NwsClient;
use crate::format;

/// Looks up active alerts for a US state.
#[derive(Debug, Clone)]
pub struct AlertsHandler {
    client: NwsClient,
}

#[async_trait]
impl ToolHandler for AlertsHandler {
    async fn invoke(
        &self,
        ctx: &ToolContext,
        params: ToolRunParams,
    ) -> Result<ToolResult, HandlerError> {
        let state = params.str_arg("state")?;

        let fetched = tokio::select! {
            biased;
            () = ctx.cancelled() => return Err(HandlerError::cancelled()),
            fetched = self.client.alerts(state) => fetched,
        };

        match fetched {
            Ok(alerts) => Ok(ToolResult::text(format::alerts_text(state, &alerts))),
            Err(err) => {
                tracing::error!(error = %err, state, "error getting alerts");
                Ok(ToolResult::text("Failed to retrieve alerts data"))
            }
        }
    }
}

/// Looks up the forecast for a coordinate pair.
#[derive(Debug, Clone)]
pub struct ForecastHandler {
    client: NwsClient,
}

#[async_trait]
impl ToolHandler for ForecastHandler {
    async fn invoke(
        &self,
        ctx: &ToolContext,
        params: ToolRunParams,
    ) -> Result<ToolResult, HandlerError> {
        let latitude = params.f64_arg("latitude")?;
        let longitude = params.f64_arg("longitude")?;

        let fetched = tokio::select! {
            biased;
            () = ctx.cancelled() => return Err(HandlerError::cancelled()),
            fetched = self.client.forecast(latitude, longitude) => fetched,
        };

        match fetched {
            Ok(periods) => Ok(ToolResult::text(format::forecast_text(&periods))),
            Err(err) => {
                tracing::error!(error = %err, latitude, longitude, "error getting forecast");
                Ok(ToolResult::text("Failed to retrieve forecast data"))
            }
        }
    }
}

/// The `get-alerts` tool.
pub fn alerts_tool(client: NwsClient) -> Tool {
    Tool::new(
        "get-alerts",
        "Get weather alerts for a state",
        InputSchema::object()
            .property(
                "state",
                PropertySchema::new(SchemaType::String)
                    .with_description("Two-letter US state code (e.g. CA, NY)"),
            )
            .required("state"),
        AlertsHandler { client },
    )
}

/// The `get-forecast` tool.
pub fn forecast_tool(client: NwsClient) -> Tool {
    Tool::new(
        "get-forecast",
        "Get weather forecast for a location",
        InputSchema::object()
            .property(
                "latitude",
                PropertySchema::new(SchemaType::Number)
                    .with_description("Latitude of the location"),
            )
            .property(
                "longitude",
                PropertySchema::new(SchemaType::Number)
                    .with_description("Longitude of the location"),
            )
            .required("latitude")
            .required("longitude"),
        ForecastHandler { client },
    )
}

/// Every weather tool, sharing one client.
pub fn weather_tools(client: &NwsClient) -> Vec<Tool> {
    vec![alerts_tool(client.clone()), forecast_tool(client.clone())]
}

#[cfg(test)]
mod tests {
    use hermes_core::{ArgumentBag, Error};
    use serde_json::{json, Value};

    use super::*;
    use crate::client::tests::fake_nws;
    use crate::client::DEFAULT_USER_AGENT;

    fn params(name: &str, args: Value) -> ToolRunParams {
        let Value::Object(arguments) = args else {
            panic!("expected object");
        };
        ToolRunParams::new(name, arguments)
    }

    fn text(result: &ToolResult) -> &str {
        result.content[0].as_text().unwrap()
    }

    #[tokio::test]
    async fn alerts_tool_formats_alerts() {
        let tool = alerts_tool(NwsClient::new(fake_nws().await, DEFAULT_USER_AGENT));
        let result = tool
            .run(&ToolContext::new(), params("get-alerts", json!({"state": "CA"})))
            .await
            .unwrap();
        let text = text(&result);
        assert!(text.starts_with("Active alerts for CA:"));
        assert!(text.contains("Event: Wind Advisory"));
        assert!(text.contains("Headline: No headline"));
    }

    #[tokio::test]
    async fn alerts_tool_reports_empty_state() {
        let tool = alerts_tool(NwsClient::new(fake_nws().await, DEFAULT_USER_AGENT));
        let result = tool
            .run(&ToolContext::new(), params("get-alerts", json!({"state": "WY"})))
            .await
            .unwrap();
        assert_eq!(text(&result), "No active alerts for WY");
    }

    #[tokio::test]
    async fn upstream_failure_becomes_text_result() {
        let tool = alerts_tool(NwsClient::new(fake_nws().await, DEFAULT_USER_AGENT));
        let result = tool
            .run(&ToolContext::new(), params("get-alerts", json!({"state": "XX"})))
            .await
            .unwrap();
        assert_eq!(text(&result), "Failed to retrieve alerts data");
    }

    #[tokio::test]
    async fn forecast_tool_accepts_integer_coordinates() {
        let tool = forecast_tool(NwsClient::new(fake_nws().await, DEFAULT_USER_AGENT));
        let result = tool
            .run(
                &ToolContext::new(),
                params("get-forecast", json!({"latitude": 37, "longitude": -122.42})),
            )
            .await
            .unwrap();
        let text = text(&result);
        assert!(text.starts_with("Period 1:\nTemperature: 61°F"));
        assert!(!text.contains("Period 6"));
    }

    #[tokio::test]
    async fn forecast_tool_validates_coordinates() {
        let tool = forecast_tool(NwsClient::default());
        let err = tool
            .run(
                &ToolContext::new(),
                params("get-forecast", json!({"latitude": "37", "longitude": 1})),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { ref field, .. } if field == "latitude"));

        let err = tool
            .run(&ToolContext::new(), ToolRunParams::new("get-forecast", ArgumentBag::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingRequiredField(_)));
    }

    #[tokio::test]
    async fn cancelled_context_aborts_handler() {
        // Nothing listens here; the cancelled branch must win regardless.
        let tool = alerts_tool(NwsClient::new("http://127.0.0.1:9", DEFAULT_USER_AGENT));
        let ctx = ToolContext::new();
        ctx.cancel();

        let err = tool
            .run(&ctx, params("get-alerts", json!({"state": "CA"})))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "request cancelled");
    }

    #[test]
    fn tool_set_names() {
        let tools = weather_tools(&NwsClient::default());
        let names: Vec<&str> = tools.iter().map(Tool::name).collect();
        assert_eq!(names, vec!["get-alerts", "get-forecast"]);
        assert!(tools.iter().all(|t| t.input_schema().undeclared_required().is_empty()));
    }
}
