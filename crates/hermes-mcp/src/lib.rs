pub mod descriptor;
pub mod jsonrpc;
pub mod tools;

pub use descriptor::{Capabilities, ServerDescriptor, ServerInfo};
pub use jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use tools::{ToolDefinition, ToolRegistry};
