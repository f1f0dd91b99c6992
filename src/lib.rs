pub mod config;
pub mod echo;
pub mod errors;
pub mod net;

pub use config::{FetchConfig, ServerConfig};
pub use errors::{ConfigError, FetchError, ServerError};
