//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for zbx-mcp
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Authentication against the upstream API failed
    #[error("Authentication error: {message}")]
    Authentication {
        /// Description of the authentication error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Network-related error (upstream unreachable, timeout)
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The upstream API answered with a JSON-RPC error
    #[error("Upstream error in {method} ({code}): {message}")]
    Upstream {
        /// Upstream method that failed
        method: String,
        /// Upstream error code
        code: i64,
        /// Upstream error message, including its `data` detail
        message: String,
    },

    /// A call was refused by local policy before reaching the upstream
    #[error("Policy violation: {message}")]
    PolicyViolation {
        /// Description of the refused operation
        message: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Basic error creation methods
impl Error {
    /// Create a policy violation error
    pub fn policy<S: Into<String>>(message: S) -> Self {
        Self::PolicyViolation {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Upstream error creation methods
impl Error {
    /// Create an authentication error
    pub fn authentication<S: Into<String>>(message: S) -> Self {
        Self::Authentication {
            message: message.into(),
            source: None,
        }
    }

    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Create a network error with source
    pub fn network_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an upstream JSON-RPC error
    pub fn upstream<M: Into<String>, S: Into<String>>(method: M, code: i64, message: S) -> Self {
        Self::Upstream {
            method: method.into(),
            code,
            message: message.into(),
        }
    }
}

// Classification
impl Error {
    /// Whether the error originates from the upstream API or its connection
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Authentication { .. } | Self::Network { .. } | Self::Upstream { .. }
        )
    }
}
