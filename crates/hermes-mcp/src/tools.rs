use std::collections::HashMap;

use hermes_core::{
    ArgumentBag, Error, ErrorKind, InputSchema, Tool, ToolContext, ToolResult, ToolRunParams,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn, Instrument};

use crate::descriptor::ServerDescriptor;

/// Definition of a tool as exposed by `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: InputSchema,
}

impl From<&Tool> for ToolDefinition {
    fn from(tool: &Tool) -> Self {
        Self {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            input_schema: tool.input_schema().clone(),
        }
    }
}

/// Read-only set of tools, keyed by name, plus the server descriptor.
///
/// Built once; every method takes `&self`, so one registry can serve any
/// number of concurrent calls.
#[derive(Debug)]
pub struct ToolRegistry {
    descriptor: ServerDescriptor,
    tools: Vec<Tool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Build a registry. When two tools share a name the later one replaces
    /// the earlier one in place.
    pub fn new(descriptor: ServerDescriptor, tools: impl IntoIterator<Item = Tool>) -> Self {
        let mut slots: Vec<Tool> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for tool in tools {
            for name in tool.input_schema().undeclared_required() {
                warn!(
                    tool = tool.name(),
                    field = name,
                    "required field is not declared in schema properties"
                );
            }

            if let Some(&slot) = index.get(tool.name()) {
                warn!(tool = tool.name(), "duplicate tool name; last registration wins");
                slots[slot] = tool;
            } else {
                index.insert(tool.name().to_string(), slots.len());
                slots.push(tool);
            }
        }

        Self {
            descriptor,
            tools: slots,
            index,
        }
    }

    #[must_use]
    pub fn descriptor(&self) -> &ServerDescriptor {
        &self.descriptor
    }

    /// Return the list of tool definitions for the `tools/list` method.
    #[must_use]
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(ToolDefinition::from).collect()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.index.get(name).map(|&slot| &self.tools[slot])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Route a call to the named tool and return its outcome as-is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToolNotFound`] for an unknown name, otherwise whatever
    /// [`Tool::run`] returns.
    pub async fn dispatch(
        &self,
        name: &str,
        ctx: &ToolContext,
        arguments: ArgumentBag,
    ) -> Result<ToolResult, Error> {
        let Some(tool) = self.get(name) else {
            debug!(tool = name, "call for unknown tool");
            return Err(Error::ToolNotFound(name.to_string()));
        };

        let span = tracing::info_span!("tool_call", tool = name, call_id = %ctx.call_id());
        let outcome = tool
            .run(ctx, ToolRunParams::new(name, arguments))
            .instrument(span.clone())
            .await;

        let _entered = span.enter();
        match &outcome {
            Ok(_) => debug!("tool call succeeded"),
            Err(err) => match err.kind() {
                ErrorKind::Configuration => error!(error = %err, "tool schema is misconfigured"),
                ErrorKind::Handler => warn!(error = %err, "tool handler failed"),
                ErrorKind::InvalidInput | ErrorKind::NotFound => {
                    debug!(error = %err, "tool call rejected");
                }
            },
        }
        outcome
    }
}
