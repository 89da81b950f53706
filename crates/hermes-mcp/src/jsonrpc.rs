use hermes_core::{Error, ErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON-RPC 2.0 request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Notifications carry no id and expect no response.
    #[must_use]
    pub fn is_notification(&self) -> bool {
        self.id.is_null()
    }
}

/// A JSON-RPC 2.0 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Create an error response for a failed tool call.
    ///
    /// `data` carries the error kind and, for validation failures, the field.
    pub fn tool_error(id: Value, err: &Error) -> Self {
        let kind = err.kind();
        let mut data = serde_json::json!({ "kind": kind });
        if let Some(field) = err.field() {
            data["field"] = Value::String(field.to_string());
        }
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code: code_for(kind),
                message: err.to_string(),
                data: Some(data),
            }),
        }
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Standard JSON-RPC error codes.
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

/// Map a tool error kind onto a JSON-RPC error code.
#[must_use]
pub fn code_for(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::InvalidInput => INVALID_PARAMS,
        ErrorKind::NotFound => METHOD_NOT_FOUND,
        ErrorKind::Configuration | ErrorKind::Handler => INTERNAL_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_request() {
        let json = r#"{
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/list",
            "params": null
        }"#;
        let req: JsonRpcRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.method, "tools/list");
        assert_eq!(req.id, serde_json::json!(1));
        assert!(!req.is_notification());
    }

    #[test]
    fn parse_notification_without_id() {
        let json = r#"{"jsonrpc": "2.0", "method": "notifications/initialized"}"#;
        let req: JsonRpcRequest = serde_json::from_str(json).unwrap();
        assert!(req.is_notification());
        assert!(req.params.is_none());
    }

    #[test]
    fn success_response() {
        let resp = JsonRpcResponse::success(
            serde_json::json!(1),
            serde_json::json!({"tools": []}),
        );
        assert!(resp.error.is_none());
        assert!(resp.result.is_some());

        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("error"));
    }

    #[test]
    fn error_response() {
        let resp = JsonRpcResponse::error(
            serde_json::json!(1),
            METHOD_NOT_FOUND,
            "Method not found",
        );
        assert!(resp.result.is_none());

        let err = resp.error.unwrap();
        assert_eq!(err.code, METHOD_NOT_FOUND);
        assert_eq!(err.message, "Method not found");
    }

    #[test]
    fn tool_error_carries_kind_and_field() {
        let err = Error::MissingRequiredField("state".to_string());
        let resp = JsonRpcResponse::tool_error(serde_json::json!("abc"), &err);

        let body = resp.error.unwrap();
        assert_eq!(body.code, INVALID_PARAMS);
        assert_eq!(body.message, "missing required field: state");
        let data = body.data.unwrap();
        assert_eq!(data["kind"], "invalid_input");
        assert_eq!(data["field"], "state");
    }

    #[test]
    fn codes_per_kind() {
        assert_eq!(code_for(ErrorKind::InvalidInput), INVALID_PARAMS);
        assert_eq!(code_for(ErrorKind::NotFound), METHOD_NOT_FOUND);
        assert_eq!(code_for(ErrorKind::Configuration), INTERNAL_ERROR);
        assert_eq!(code_for(ErrorKind::Handler), INTERNAL_ERROR);
    }

    #[test]
    fn request_with_params() {
        let json = r#"{
            "jsonrpc": "2.0",
            "id": "abc",
            "method": "tools/call",
            "params": {
                "name": "get-alerts",
                "arguments": {
                    "state": "CA"
                }
            }
        }"#;
        let req: JsonRpcRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.method, "tools/call");

        let params = req.params.unwrap();
        assert_eq!(params["name"], "get-alerts");
        assert_eq!(params["arguments"]["state"], "CA");
    }
}
