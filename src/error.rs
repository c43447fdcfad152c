//! Startup errors.
//!
//! Request handling has no error path: malformed bodies degrade to empty
//! input and wrong methods get a plain 405. Everything here aborts startup.

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address {0}: {1}")]
    Address(String, std::net::AddrParseError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Server(#[from] ServerError),
}
