mod health;
mod mcp;

pub use health::health;
pub use mcp::{initialize, mcp_request, tools_call, tools_list};
