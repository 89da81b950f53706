use async_trait::async_trait;

use crate::error::HandlerError;
use crate::types::{ToolContext, ToolResult, ToolRunParams};

/// The work behind a tool, run only after its arguments validated.
///
/// Implementations may be invoked concurrently and must make any shared
/// state safe for that. Long-running handlers should watch
/// [`ToolContext::cancelled`] and give up once it fires.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the tool with validated arguments.
    async fn invoke(
        &self,
        ctx: &ToolContext,
        params: ToolRunParams,
    ) -> Result<ToolResult, HandlerError>;
}
