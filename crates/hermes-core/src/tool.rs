use crate::error::Error;
use crate::schema::InputSchema;
use crate::traits::ToolHandler;
use crate::types::{ToolContext, ToolResult, ToolRunParams};
use crate::validation;

/// A named, schema-described unit of callable functionality.
///
/// Built once at startup and immutable afterwards.
pub struct Tool {
    name: String,
    description: String,
    input_schema: InputSchema,
    handler: Box<dyn ToolHandler>,
}

impl Tool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: InputSchema,
        handler: impl ToolHandler + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
            handler: Box::new(handler),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn input_schema(&self) -> &InputSchema {
        &self.input_schema
    }

    /// Validate `params.arguments` against this tool's schema, then invoke
    /// the handler.
    ///
    /// The handler never runs if validation fails. Its own failures come back
    /// as [`Error::HandlerFailure`] with the message unchanged.
    ///
    /// # Errors
    ///
    /// Returns the validation error, or the wrapped handler error.
    pub async fn run(&self, ctx: &ToolContext, params: ToolRunParams) -> Result<ToolResult, Error> {
        validation::validate(&self.input_schema, &params.arguments)?;

        self.handler
            .invoke(ctx, params)
            .await
            .map_err(|source| Error::HandlerFailure {
                tool: self.name.clone(),
                source,
            })
    }
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .finish_non_exhaustive()
    }
}
