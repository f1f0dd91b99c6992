//! Configuration for the fetcher and the echo server.
//!
//! Both types provide defaults via [`Default`] and a fluent builder with a
//! validating `build()`, so that an invalid configuration is caught before
//! any socket is touched.
//!
//! # Examples
//!
//! ```rust
//! use echoprobe::config::FetchConfig;
//! let cfg = FetchConfig::default();
//! assert_eq!(cfg.url.as_str(), "http://localhost:9999/");
//! ```
//!
//! ```rust
//! use echoprobe::config::ServerConfig;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = ServerConfig::builder()
//!     .socket_address("127.0.0.1:33333")
//!     .read_buffer_size(1024)
//!     .build()?;
//! assert_eq!(cfg.read_buffer_size, 1024);
//! # Ok(()) }
//! ```
use url::Url;

use crate::errors::ConfigError;

/// The one endpoint the `fetch` binary talks to.
pub const DEFAULT_TARGET: &str = "http://localhost:9999/";

pub const DEFAULT_SOCKET_ADDRESS: &str = "127.0.0.1:9999";

/// Size of each read from a client socket in the echo server.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 512;

/// Where the fetcher sends its GET request.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Target URL. Method is always GET, with no custom headers and no body.
    pub url: Url,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_TARGET).expect("default target is a valid URL"),
        }
    }
}

impl FetchConfig {
    pub fn builder() -> FetchConfigBuilder {
        FetchConfigBuilder::default()
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfigBuilder {
    url: String,
}

impl Default for FetchConfigBuilder {
    fn default() -> Self {
        Self { url: DEFAULT_TARGET.to_string() }
    }
}

impl FetchConfigBuilder {
    pub fn url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = url.into();
        self
    }

    /// Target a port on localhost, keeping the default scheme and path.
    pub fn port(self, port: u16) -> Self {
        self.url(format!("http://localhost:{port}/"))
    }

    /// Validate and build the final config.
    pub fn build(self) -> Result<FetchConfig, ConfigError> {
        let url = Url::parse(&self.url).map_err(|e| ConfigError::InvalidUrl(format!("{}: {e}", self.url)))?;

        match url.scheme() {
            "http" | "https" => {}
            other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
        if url.host_str().is_none() {
            return Err(ConfigError::MissingHost);
        }

        Ok(FetchConfig { url })
    }
}

/// Echo server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind, e.g. `127.0.0.1:9999`.
    pub socket_address: String,
    /// Bytes read from a client per `read` call.
    pub read_buffer_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            socket_address: DEFAULT_SOCKET_ADDRESS.to_string(),
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ServerConfigBuilder {
    inner: ServerConfig,
}

impl ServerConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut ServerConfig)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn socket_address<S: Into<String>>(self, addr: S) -> Self { self.map(|c| c.socket_address = addr.into()) }
    pub fn read_buffer_size(self, n: usize) -> Self { self.map(|c| c.read_buffer_size = n) }

    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        if self.inner.socket_address.trim().is_empty() {
            return Err(ConfigError::EmptySocketAddress);
        }
        if self.inner.read_buffer_size == 0 {
            return Err(ConfigError::ZeroReadBuffer);
        }
        Ok(self.inner)
    }
}
