#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Connecting, sending or reading the body failed. All of these are fatal.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Cannot write response body: {0}")]
    Output(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Cannot bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Accept failed: {0}")]
    Accept(#[source] std::io::Error),

    #[error("Connection error: {0}")]
    Connection(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid target URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported scheme {0:?} (expected http or https)")]
    UnsupportedScheme(String),

    #[error("Target URL has no host")]
    MissingHost,

    #[error("Socket address must not be empty")]
    EmptySocketAddress,

    #[error("read_buffer_size must be at least 1")]
    ZeroReadBuffer,
}
