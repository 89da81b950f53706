use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::error::HandlerError;

/// Caller-supplied arguments for one invocation.
///
/// `serde_json` keeps integers and floats apart at decode time, so the
/// `integer` schema tag can be checked exactly.
pub type ArgumentBag = Map<String, Value>;

/// Unique identifier for a single tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallId(pub Uuid);

impl CallId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CallId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Per-call context threaded from the transport into the handler.
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    call_id: CallId,
    cancellation: CancellationToken,
}

impl ToolContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context bound to an existing token.
    #[must_use]
    pub fn with_cancellation(cancellation: CancellationToken) -> Self {
        Self {
            call_id: CallId::new(),
            cancellation,
        }
    }

    #[must_use]
    pub fn call_id(&self) -> CallId {
        self.call_id
    }

    #[must_use]
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Resolves once the caller has given up on this call.
    pub async fn cancelled(&self) {
        self.cancellation.cancelled().await;
    }

    pub fn cancel(&self) {
        self.cancellation.cancel();
    }
}

/// Name and arguments handed to a handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolRunParams {
    pub name: String,
    pub arguments: ArgumentBag,
}

impl ToolRunParams {
    pub fn new(name: impl Into<String>, arguments: ArgumentBag) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.arguments.get(key)
    }

    /// Read a string argument.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is absent or not a string.
    pub fn str_arg(&self, key: &str) -> Result<&str, HandlerError> {
        self.typed(key, "a string", Value::as_str)
    }

    /// Read a numeric argument, accepting integers and floats.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is absent or not a number.
    pub fn f64_arg(&self, key: &str) -> Result<f64, HandlerError> {
        self.typed(key, "a number", Value::as_f64)
    }

    /// Read a signed integer argument.
    ///
    /// The `integer` schema tag also admits values above `i64::MAX`; those
    /// are reported as out of range here and can be read with [`Self::u64_arg`].
    ///
    /// # Errors
    ///
    /// Returns an error if the key is absent, not an integer, or too large.
    pub fn i64_arg(&self, key: &str) -> Result<i64, HandlerError> {
        let value = self.require(key)?;
        if value.is_u64() && !value.is_i64() {
            return Err(HandlerError::new(format!("argument {key} is out of range for i64")));
        }
        value
            .as_i64()
            .ok_or_else(|| HandlerError::new(format!("argument {key} is not an integer")))
    }

    /// Read a non-negative integer argument.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is absent or not a non-negative integer.
    pub fn u64_arg(&self, key: &str) -> Result<u64, HandlerError> {
        self.typed(key, "a non-negative integer", Value::as_u64)
    }

    /// Read a boolean argument.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is absent or not a boolean.
    pub fn bool_arg(&self, key: &str) -> Result<bool, HandlerError> {
        self.typed(key, "a boolean", Value::as_bool)
    }

    fn typed<'a, T>(
        &'a self,
        key: &str,
        expected: &str,
        read: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<T, HandlerError> {
        read(self.require(key)?)
            .ok_or_else(|| HandlerError::new(format!("argument {key} is not {expected}")))
    }

    fn require(&self, key: &str) -> Result<&Value, HandlerError> {
        self.arguments
            .get(key)
            .ok_or_else(|| HandlerError::new(format!("missing argument: {key}")))
    }
}

/// A single item of tool output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
#[non_exhaustive]
pub enum Content {
    Text { text: String },
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
        }
    }
}

/// Output of a successful tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<Content>,
}

impl ToolResult {
    /// A result holding a single text item.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Content::text(text)],
        }
    }
}
