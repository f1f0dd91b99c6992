use std::io::Write;

use crate::config::FetchConfig;
use crate::errors::FetchError;
use crate::net::Response;

// Loads the configured URL and returns the fully buffered response.
//
// The client lives only for this call and keeps no idle connections, so the
// socket is released as soon as the body is read or an error is returned.
pub async fn fetch(config: &FetchConfig) -> Result<Response, FetchError> {
    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()?;

    log::debug!("GET {}", config.url);
    let res = client.get(config.url.clone()).send().await?;

    // Fetch results. Status is reported, never acted upon.
    let final_url = res.url().clone();
    let status = res.status().as_u16();
    let status_text = res.status().canonical_reason().unwrap_or("Unknown").to_string();
    let headers = res.headers().clone();
    log::debug!("{} responded {} {}", final_url, status, status_text);

    // Fetch body. We don't do streaming: all of it or nothing.
    let body = res.bytes().await?.to_vec();

    let response = Response {
        url: final_url,
        status,
        status_text,
        headers,
        body,
    };
    if !response.is_success() {
        log::warn!("{} returned non-success status {}, printing body anyway", response.url, response.status);
    }
    log::trace!("body ({} bytes): {}", response.body.len(), response.body_lossy());

    Ok(response)
}

/// Writes the body verbatim: no framing, no trailing newline.
pub fn write_body<W: Write>(response: &Response, mut out: W) -> Result<(), FetchError> {
    out.write_all(&response.body)?;
    out.flush()?;
    Ok(())
}

/// Fetches the target and writes its body to `out`. Nothing is written if the fetch fails.
pub async fn run<W: Write>(config: &FetchConfig, out: W) -> Result<(), FetchError> {
    let response = fetch(config).await?;
    write_body(&response, out)
}
