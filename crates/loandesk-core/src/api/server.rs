//! Line-delimited JSON transport.
//!
//! Each line on a connection is one `Request`; each reply is one `Response`
//! line. Connections are served by independent tasks. A line longer than
//! `MAX_LINE_BYTES` gets a 400 reply and the connection is closed.

use std::future::Future;
use std::net::SocketAddr;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::{TcpListener, TcpStream};

use super::dispatch::Dispatcher;
use super::request::Response;

/// Longest accepted request line, newline excluded.
const MAX_LINE_BYTES: usize = 64 * 1024;

pub struct Server {
    listener: TcpListener,
    dispatcher: Dispatcher,
}

impl Server {
    pub async fn bind(addr: SocketAddr, dispatcher: Dispatcher) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            dispatcher,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until `shutdown` resolves.
    pub async fn serve(self, shutdown: impl Future<Output = ()>) -> std::io::Result<()> {
        tracing::info!(addr = %self.local_addr()?, "Listening");
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Shutting down listener");
                    return Ok(());
                }
                accepted = self.listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(pair) => pair,
                        Err(err) => {
                            tracing::warn!(error = %err, "Accept failed");
                            continue;
                        }
                    };
                    let dispatcher = self.dispatcher.clone();
                    tokio::spawn(async move {
                        if let Err(err) = serve_connection(stream, dispatcher).await {
                            tracing::debug!(%peer, error = %err, "Connection closed with error");
                        }
                    });
                }
            }
        }
    }
}

async fn serve_connection(stream: TcpStream, dispatcher: Dispatcher) -> std::io::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = (&mut reader)
            .take(MAX_LINE_BYTES as u64 + 1)
            .read_until(b'\n', &mut buf)
            .await?;
        if read == 0 {
            return Ok(());
        }
        // Without a newline inside the limit the stream cannot be resynced.
        if buf.last() != Some(&b'\n') && buf.len() > MAX_LINE_BYTES {
            tracing::warn!(limit = MAX_LINE_BYTES, "Request line too long, closing connection");
            let response =
                Response::bad_request(format!("request line exceeds {MAX_LINE_BYTES} bytes"));
            write_response(&mut writer, &response).await?;
            return Ok(());
        }

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let response = dispatcher.handle_json(line).await;
        write_response(&mut writer, &response).await?;
    }
}

async fn write_response(writer: &mut OwnedWriteHalf, response: &Response) -> std::io::Result<()> {
    let mut encoded = serde_json::to_vec(response).unwrap_or_else(|err| {
        serde_json::to_vec(&Response::bad_request(err)).unwrap_or_default()
    });
    encoded.push(b'\n');
    writer.write_all(&encoded).await
}
