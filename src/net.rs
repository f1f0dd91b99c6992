//! Networking for the fetcher: one GET, fully buffered, printed verbatim.
pub mod fetch;
pub mod response;

pub use fetch::{fetch, run, write_body};
pub use response::Response;
