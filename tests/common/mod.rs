//! Shared utilities for relay integration tests.

use std::net::SocketAddr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

use gemini_relay::config::RelayConfig;
use gemini_relay::http::HttpServer;

/// Read one HTTP request off the socket: head, then the declared body
/// (Content-Length or chunked). Returns the raw request text.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break buf.len();
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);
    let chunked = head
        .lines()
        .any(|line| line.to_ascii_lowercase().starts_with("transfer-encoding") && line.contains("chunked"));

    if chunked {
        while !buf[header_end..].windows(5).any(|w| w == b"0\r\n\r\n") {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
    } else {
        while buf.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

fn status_line(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        204 => "204 No Content",
        400 => "400 Bad Request",
        404 => "404 Not Found",
        429 => "429 Too Many Requests",
        500 => "500 Internal Server Error",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    }
}

/// Start a mock upstream that captures every request and answers with a
/// fixed status and body. Captured request text arrives on the channel.
pub async fn start_capturing_upstream(
    addr: SocketAddr,
    status: u16,
    content_type: &'static str,
    body: &'static str,
) -> mpsc::UnboundedReceiver<String> {
    let listener = TcpListener::bind(addr).await.unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let request = read_request(&mut socket).await;
                        let _ = tx.send(request);
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_line(status),
                            content_type,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    rx
}

/// Start a mock upstream that answers with a chunked `text/event-stream`
/// body, sleeping between chunks so incremental delivery is observable.
pub async fn start_sse_upstream(addr: SocketAddr, chunks: &'static [&'static str], delay: Duration) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let _ = read_request(&mut socket).await;
                        let head = "HTTP/1.1 200 OK\r\n\
                                    Content-Type: text/event-stream\r\n\
                                    Transfer-Encoding: chunked\r\n\
                                    Connection: close\r\n\r\n";
                        let _ = socket.write_all(head.as_bytes()).await;
                        let _ = socket.flush().await;
                        for chunk in chunks {
                            let frame = format!("{:x}\r\n{}\r\n", chunk.len(), chunk);
                            let _ = socket.write_all(frame.as_bytes()).await;
                            let _ = socket.flush().await;
                            tokio::time::sleep(delay).await;
                        }
                        let _ = socket.write_all(b"0\r\n\r\n").await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Start a listener that must never be reached; trips the returned flag if
/// any connection arrives.
#[allow(dead_code)]
pub async fn start_tripwire_upstream(addr: SocketAddr) -> Arc<AtomicBool> {
    let listener = TcpListener::bind(addr).await.unwrap();
    let invoked = Arc::new(AtomicBool::new(false));
    let flag = invoked.clone();

    tokio::spawn(async move {
        while let Ok((_socket, _)) = listener.accept().await {
            flag.store(true, std::sync::atomic::Ordering::SeqCst);
        }
    });

    invoked
}

/// Start the relay bound to `proxy_addr`, forwarding to `upstream_addr`.
pub async fn start_relay<F>(proxy_addr: SocketAddr, upstream_addr: SocketAddr, configure: F)
where
    F: FnOnce(&mut RelayConfig),
{
    let mut config = RelayConfig::default();
    config.listener.bind_address = proxy_addr.to_string();
    config.upstream.origin = format!("http://{}", upstream_addr);
    configure(&mut config);

    let listener = TcpListener::bind(proxy_addr).await.unwrap();
    let server = HttpServer::new(config).unwrap();
    tokio::spawn(server.run(listener));
    tokio::time::sleep(Duration::from_millis(50)).await;
}
