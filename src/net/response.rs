//! Minimal HTTP response model.
//!
//! This struct represents a **fully buffered** HTTP response returned by
//! [`fetch`](crate::net::fetch). It contains the final URL, status code and
//! reason, response headers, and the raw body bytes.
//!
//! ## Notes
//! - The body is stored as raw `Vec<u8>` and is never decoded or validated.
//!   The fetcher writes it out byte for byte, whatever its encoding.
//! - `status` is informational only. A `500` body is as printable as a `200`
//!   body.
//! - `headers` is an `http::HeaderMap`, which is **case-insensitive** for
//!   header names.
use http::HeaderMap;

/// Simple structure for HTTP responses.
#[derive(Debug)]
pub struct Response {
    /// Final URL of the response.
    pub url: url::Url,

    /// Numeric HTTP status code (e.g., `200`, `500`).
    pub status: u16,

    /// Reason phrase for the status, `"Unknown"` for non-standard codes.
    pub status_text: String,

    /// Response headers as a case-insensitive map.
    pub headers: HeaderMap,

    /// Raw response body bytes.
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, replacing invalid UTF-8. For logging only; output uses the raw bytes.
    pub fn body_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
