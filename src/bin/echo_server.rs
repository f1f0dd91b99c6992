use anyhow::Context;
use clap::Parser;
use echoprobe::config::{ServerConfig, DEFAULT_READ_BUFFER_SIZE};

/// Echo every HTTP request back as a text/plain response body
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on, e.g. 127.0.0.1:9999
    #[arg(short, long)]
    socket_address: String,

    /// Bytes read from a client per read call
    #[arg(long, default_value_t = DEFAULT_READ_BUFFER_SIZE)]
    read_buffer_size: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = ServerConfig::builder()
        .socket_address(args.socket_address)
        .read_buffer_size(args.read_buffer_size)
        .build()
        .context("Invalid server configuration")?;

    echoprobe::echo::serve(&config)
        .await
        .with_context(|| format!("Echo server on {} stopped", config.socket_address))
}
