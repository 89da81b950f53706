use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::jsonrpc::JsonRpcResponse;

/// Protocol version reported by `initialize` unless configured otherwise.
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

/// Capability flags advertised by `initialize`.
///
/// Fixed at configuration time; not derived from the registered tools.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub logging: Map<String, Value>,
    pub prompts: ListChanged,
    pub resources: ResourceCapabilities,
    pub tools: ListChanged,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListChanged {
    pub list_changed: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCapabilities {
    pub subscribe: bool,
    pub list_changed: bool,
}

/// Server identity reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

/// Static description of this server, returned verbatim by `initialize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerDescriptor {
    pub protocol_version: String,
    pub capabilities: Capabilities,
    pub server_info: ServerInfo,
}

impl ServerDescriptor {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            protocol_version: DEFAULT_PROTOCOL_VERSION.to_string(),
            capabilities: Capabilities::default(),
            server_info: ServerInfo {
                name: name.into(),
                version: version.into(),
            },
        }
    }

    #[must_use]
    pub fn with_protocol_version(mut self, version: impl Into<String>) -> Self {
        self.protocol_version = version.into();
        self
    }

    /// The `initialize` result wrapped in a JSON-RPC envelope.
    pub fn initialize_response(&self, id: Value) -> JsonRpcResponse {
        JsonRpcResponse::success(id, serde_json::to_value(self).unwrap_or_default())
    }
}

impl Default for ServerDescriptor {
    fn default() -> Self {
        Self::new("hermes-planner", "0.0.1")
    }
}
