pub mod error;
pub mod schema;
pub mod tool;
pub mod traits;
pub mod types;
pub mod validation;

pub use error::{Error, ErrorKind, HandlerError};
pub use schema::{InputSchema, JsonType, PropertySchema, SchemaType};
pub use tool::Tool;
pub use traits::ToolHandler;
pub use types::{ArgumentBag, CallId, Content, ToolContext, ToolResult, ToolRunParams};
