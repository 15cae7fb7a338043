//! HTTP Server Configuration
//!
//! Host, port, and origin allowlist. The port comes from the `PORT`
//! environment variable; nothing else is read from the environment.

use serde::{Deserialize, Serialize};

use super::errors::{ServerError, ServerResult};

/// Environment variable holding the listening port
pub const PORT_ENV: &str = "PORT";

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed to make cross-origin requests
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:8080".to_string(),
        "http://localhost:1234".to_string(),
        "https://movies.com".to_string(),
        "https://esteban.com".to_string(),
    ]
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Default config with the port taken from `PORT` when it is set
    pub fn from_env() -> ServerResult<Self> {
        Self::from_port_var(std::env::var(PORT_ENV).ok().as_deref())
    }

    /// Builds a config from the raw value of the port variable
    pub fn from_port_var(value: Option<&str>) -> ServerResult<Self> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(raw) => raw
                .parse::<u16>()
                .map(Self::with_port)
                .map_err(|_| ServerError::InvalidPort(raw.to_string())),
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
