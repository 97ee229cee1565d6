//! Hand-written streaming HTTP server
//!
//! Mock HTTP servers answer with a complete body; the streaming endpoint never
//! does. This server writes raw HTTP/1.1 so a test can hold a response open or
//! cut it short after some bytes went out.

use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// How the server answers the single request it accepts
#[derive(Clone, Debug)]
pub enum Script {
    /// Send each chunk with chunked encoding, then keep the connection open
    StreamThenHold(Vec<Vec<u8>>),
    /// Announce `declared` bytes, send `sent`, then close the connection
    Truncated {
        /// Content-Length header value
        declared: usize,
        /// Body bytes actually sent
        sent: Vec<u8>,
    },
}

/// A server that answers exactly one request according to its script
pub struct StreamServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl StreamServer {
    /// Bind to an ephemeral local port and serve `script` in the background
    pub async fn start(script: Script) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request_head(&mut socket).await;
            serve(&mut socket, script).await;
        });

        Self { addr, handle }
    }

    /// URL of the sample stream on this server
    pub fn sample_url(&self) -> String {
        format!("http://{}/1.1/statuses/sample.json", self.addr)
    }
}

impl Drop for StreamServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn read_request_head(socket: &mut TcpStream) {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
            return;
        }
        head.extend_from_slice(&buf[..n]);
    }
}

async fn serve(socket: &mut TcpStream, script: Script) {
    match script {
        Script::StreamThenHold(chunks) => {
            socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\n\
                      Content-Type: application/json\r\n\
                      Transfer-Encoding: chunked\r\n\r\n",
                )
                .await
                .unwrap();
            for chunk in chunks {
                let mut frame = format!("{:x}\r\n", chunk.len()).into_bytes();
                frame.extend_from_slice(&chunk);
                frame.extend_from_slice(b"\r\n");
                socket.write_all(&frame).await.unwrap();
                socket.flush().await.unwrap();
            }
            tokio::time::sleep(Duration::from_secs(60)).await;
        }
        Script::Truncated { declared, sent } => {
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {declared}\r\n\r\n"
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(&sent).await.unwrap();
            socket.flush().await.unwrap();
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    }
}
