use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use hermes_core::{ArgumentBag, Error, ErrorKind, HandlerError, ToolContext, ToolResult};
use hermes_mcp::jsonrpc::{INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR};
use hermes_mcp::{JsonRpcRequest, JsonRpcResponse};

use crate::app_state::AppState;

/// Request body for `POST /mcp/tools/call`.
#[derive(Debug, Deserialize)]
pub struct CallRequest {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<ArgumentBag>,
}

type ErrorResponse = (StatusCode, Json<Value>);

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Configuration | ErrorKind::Handler => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: &Error) -> ErrorResponse {
    let kind = err.kind();
    let mut body = json!({ "error": err.to_string(), "kind": kind });
    if let Some(field) = err.field() {
        body["field"] = Value::String(field.to_string());
    }
    (status_for(kind), Json(body))
}

/// Run one tool call under a fresh context.
///
/// The context is cancelled when this future is dropped (client went away)
/// or when the configured call timeout elapses.
async fn call_tool(
    state: &AppState,
    name: &str,
    arguments: ArgumentBag,
) -> Result<ToolResult, Error> {
    let ctx = ToolContext::new();
    let _cancel_on_drop = ctx.cancellation().clone().drop_guard();

    if let Ok(outcome) = tokio::time::timeout(
        state.call_timeout,
        state.registry.dispatch(name, &ctx, arguments),
    )
    .await
    {
        outcome
    } else {
        ctx.cancel();
        tracing::warn!(tool = name, call_id = %ctx.call_id(), "tool call timed out");
        Err(Error::HandlerFailure {
            tool: name.to_string(),
            source: HandlerError::new(format!(
                "tool call timed out after {:?}",
                state.call_timeout
            )),
        })
    }
}

/// Static server descriptor, unrelated to which tools are registered.
pub async fn initialize(State(state): State<AppState>) -> Json<JsonRpcResponse> {
    Json(state.registry.descriptor().initialize_response(json!(1)))
}

/// List every registered tool in registration order.
pub async fn tools_list(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "tools": state.registry.definitions() }))
}

/// Invoke a tool by name.
///
/// The body is decoded as JSON whatever its declared content type.
#[allow(clippy::missing_errors_doc)]
pub async fn tools_call(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ErrorResponse> {
    let Ok(req) = serde_json::from_slice::<CallRequest>(&body) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid request format" })),
        ));
    };

    let arguments = req.arguments.unwrap_or_default();
    let result = call_tool(&state, &req.name, arguments)
        .await
        .map_err(|err| error_response(&err))?;

    Ok(Json(json!({
        "status": "success",
        "result": result.content,
    })))
}

/// Handle JSON-RPC 2.0 requests on `POST /mcp`.
///
/// Notifications are acknowledged with 202 and no body. Bodies that are not
/// JSON, or not a request object, get a parse or invalid-request envelope.
pub async fn mcp_request(State(state): State<AppState>, body: Bytes) -> Response {
    let Ok(raw) = serde_json::from_slice::<Value>(&body) else {
        return Json(JsonRpcResponse::error(Value::Null, PARSE_ERROR, "Parse error"))
            .into_response();
    };

    let id = raw.get("id").cloned().unwrap_or(Value::Null);
    let req = match serde_json::from_value::<JsonRpcRequest>(raw) {
        Ok(req) => req,
        Err(err) => {
            tracing::debug!(error = %err, "rejected malformed JSON-RPC request");
            return Json(JsonRpcResponse::error(id, INVALID_REQUEST, "Invalid Request"))
                .into_response();
        }
    };

    if req.is_notification() {
        tracing::info!("Received MCP notification: {}", req.method);
        return StatusCode::ACCEPTED.into_response();
    }

    let response = match req.method.as_str() {
        "initialize" => state.registry.descriptor().initialize_response(req.id),
        "tools/list" => JsonRpcResponse::success(
            req.id,
            json!({ "tools": state.registry.definitions() }),
        ),
        "tools/call" => handle_tools_call(&state, req).await,
        _ => JsonRpcResponse::error(req.id, METHOD_NOT_FOUND, "Method not found"),
    };

    Json(response).into_response()
}

async fn handle_tools_call(state: &AppState, req: JsonRpcRequest) -> JsonRpcResponse {
    let Some(params) = req.params else {
        return JsonRpcResponse::error(req.id, INVALID_PARAMS, "Missing params");
    };

    let Some(name) = params.get("name").and_then(Value::as_str) else {
        return JsonRpcResponse::error(req.id, INVALID_PARAMS, "Missing tool name");
    };

    let arguments = match params.get("arguments") {
        None | Some(Value::Null) => ArgumentBag::new(),
        Some(Value::Object(map)) => map.clone(),
        Some(_) => {
            return JsonRpcResponse::error(req.id, INVALID_PARAMS, "arguments must be an object")
        }
    };

    match call_tool(state, name, arguments).await {
        Ok(result) => JsonRpcResponse::success(req.id, json!(result)),
        Err(err) => JsonRpcResponse::tool_error(req.id, &err),
    }
}
