//! Fetches `http://localhost:9999/` once and prints the body to stdout.
//!
//! Takes no arguments. Any failure (connect, transport or body read) is fatal:
//! the error is reported on stderr and the process exits non-zero with
//! nothing written to stdout.
use echoprobe::config::FetchConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = FetchConfig::default();
    if let Err(e) = echoprobe::net::run(&config, std::io::stdout()).await {
        // main's Err already prints the diagnostic on stderr.
        log::debug!("Fetching {} failed", config.url);
        return Err(e.into());
    }

    Ok(())
}
