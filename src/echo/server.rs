use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::config::ServerConfig;
use crate::echo::Request;
use crate::errors::ServerError;

/// Frames the raw request as a `text/plain` 200 response.
pub fn echo_response(raw: &[u8]) -> Vec<u8> {
    let head = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\n\r\n",
        raw.len()
    );
    let mut out = Vec::with_capacity(head.len() + raw.len());
    out.extend_from_slice(head.as_bytes());
    out.extend_from_slice(raw);
    out
}

/// Binds the configured address and serves until accept fails.
pub async fn serve(config: &ServerConfig) -> Result<(), ServerError> {
    let listener = TcpListener::bind(&config.socket_address)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.socket_address.clone(),
            source,
        })?;

    serve_listener(listener, config.read_buffer_size).await
}

/// Serves on an already bound listener. Each connection is handled on its own task.
pub async fn serve_listener(listener: TcpListener, read_buffer_size: usize) -> Result<(), ServerError> {
    if let Ok(addr) = listener.local_addr() {
        log::info!("Echo server listening on {}", addr);
    }

    loop {
        let (stream, peer) = listener.accept().await.map_err(ServerError::Accept)?;
        log::debug!("Accepted connection from {}", peer);

        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, read_buffer_size).await {
                log::error!("Connection from {} failed: {}", peer, e);
            }
        });
    }
}

async fn handle_connection(mut stream: TcpStream, read_buffer_size: usize) -> Result<(), ServerError> {
    let mut request = Request::new();
    let mut buf = vec![0; read_buffer_size];

    loop {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            // Peer closed; echo whatever arrived.
            break;
        }
        request.update(&buf[..n]);

        if request.body_complete() {
            break;
        }
    }

    log::debug!(
        "Echoing {} bytes ({})",
        request.raw().len(),
        request.request_line().unwrap_or_default()
    );

    stream.write_all(&echo_response(request.raw())).await?;
    stream.shutdown().await?;

    Ok(())
}
