use std::time::Duration;

use hermes_mcp::descriptor::DEFAULT_PROTOCOL_VERSION;
use hermes_mcp::ServerDescriptor;
use hermes_weather::{DEFAULT_API_URL, DEFAULT_USER_AGENT};

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Server configuration, read from `HERMES_*` and `NWS_*` variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub server_name: String,
    pub server_version: String,
    pub protocol_version: String,
    pub nws_api_url: String,
    pub nws_user_agent: String,
    pub call_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 4006,
            server_name: "hermes-planner".to_string(),
            server_version: "0.0.1".to_string(),
            protocol_version: DEFAULT_PROTOCOL_VERSION.to_string(),
            nws_api_url: DEFAULT_API_URL.to_string(),
            nws_user_agent: DEFAULT_USER_AGENT.to_string(),
            call_timeout: Duration::from_secs(30),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset keys.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match lookup("HERMES_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidNumber {
                var: "HERMES_PORT",
                value,
            })?,
            None => defaults.port,
        };

        let call_timeout = match lookup("HERMES_TOOL_TIMEOUT_SECS") {
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        var: "HERMES_TOOL_TIMEOUT_SECS",
                        value,
                    })
                }
            },
            None => defaults.call_timeout,
        };

        Ok(Self {
            host: lookup("HERMES_HOST").unwrap_or(defaults.host),
            port,
            server_name: lookup("HERMES_SERVER_NAME").unwrap_or(defaults.server_name),
            server_version: lookup("HERMES_SERVER_VERSION").unwrap_or(defaults.server_version),
            protocol_version: lookup("HERMES_PROTOCOL_VERSION")
                .unwrap_or(defaults.protocol_version),
            nws_api_url: lookup("NWS_API_URL").unwrap_or(defaults.nws_api_url),
            nws_user_agent: lookup("NWS_USER_AGENT").unwrap_or(defaults.nws_user_agent),
            call_timeout,
        })
    }

    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The static `initialize` descriptor for this deployment.
    #[must_use]
    pub fn descriptor(&self) -> ServerDescriptor {
        ServerDescriptor::new(&self.server_name, &self.server_version)
            .with_protocol_version(&self.protocol_version)
    }
}
