use std::sync::Arc;
use std::time::Duration;

use hermes_mcp::ToolRegistry;

/// Shared application state with injected dependencies.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ToolRegistry>,
    /// Upper bound on a single tool call; the call context is cancelled
    /// once it elapses.
    pub call_timeout: Duration,
}

impl AppState {
    #[must_use]
    pub fn new(registry: ToolRegistry, call_timeout: Duration) -> Self {
        Self {
            registry: Arc::new(registry),
            call_timeout,
        }
    }
}
