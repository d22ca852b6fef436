//! Loopback HTTP stub for client-stack tests: binds an ephemeral port,
//! answers a scripted sequence of requests with canned JSON bodies.

use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Serve exactly one request, then stop. Returns the base URL to point
/// a client at.
pub async fn serve_one(status: u16, body: Value) -> String {
    serve_script(vec![(status, body)]).await
}

/// Serve a fixed response per incoming request, in order.
pub async fn serve_script(responses: Vec<(u16, Value)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");

    tokio::spawn(async move {
        for (status, body) in responses {
            let (mut socket, _) = listener.accept().await.expect("accept");
            read_request(&mut socket).await;

            let body = body.to_string();
            let response = format!(
                "HTTP/1.1 {status} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                reason(status),
                body.len(),
            );
            socket
                .write_all(response.as_bytes())
                .await
                .expect("write response");
            socket.shutdown().await.ok();
        }
    });

    format!("http://{addr}")
}

/// Drain headers plus the announced body so the client is done writing
/// before the response goes out.
async fn read_request(socket: &mut TcpStream) {
    let mut seen: Vec<u8> = Vec::new();
    let mut buf = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut buf).await.expect("read request");
        if n == 0 {
            return;
        }
        seen.extend_from_slice(&buf[..n]);
        if let Some(pos) = seen.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
    };

    let body_len = content_length(&seen[..header_end]);
    while seen.len() < header_end + 4 + body_len {
        let n = socket.read(&mut buf).await.expect("read body");
        if n == 0 {
            return;
        }
        seen.extend_from_slice(&buf[..n]);
    }
}

fn content_length(headers: &[u8]) -> usize {
    String::from_utf8_lossy(headers)
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        500 => "Internal Server Error",
        _ => "Status",
    }
}
