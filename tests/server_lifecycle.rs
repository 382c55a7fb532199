//! Integration tests for the connection limit and graceful shutdown: the
//! accept loop's `max_connections` rejection and the drain that runs after
//! `Shutdown::trigger`.

mod common;

use common::{get, header_of, spawn_server, spawn_server_with_shutdown, status_of, test_config};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

#[tokio::test]
async fn connections_over_the_limit_are_dropped() {
    let mut cfg = test_config();
    cfg.performance.max_connections = Some(1);
    let addr = spawn_server(cfg);

    // First connection occupies the single slot; the server sits waiting
    // for its request
    let held = TcpStream::connect(addr).await.unwrap();
    // Let the accept loop register it before opening another
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Second connection is accepted and dropped without a response
    let mut rejected = TcpStream::connect(addr).await.unwrap();
    let mut buf = Vec::new();
    rejected.read_to_end(&mut buf).await.unwrap();
    assert!(
        buf.is_empty(),
        "rejected connection got a response: {:?}",
        String::from_utf8_lossy(&buf)
    );

    // Releasing the held slot admits new connections again
    drop(held);
    tokio::time::sleep(Duration::from_millis(100)).await;
    let resp = get(addr, "/health").await;
    assert_eq!(status_of(&resp), 200);
}

#[tokio::test]
async fn shutdown_drains_active_connections() {
    let (addr, shutdown, handle) = spawn_server_with_shutdown(test_config());

    // Keep-alive request: the connection stays open and counted after the
    // response is delivered
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();
    let response = read_keep_alive_response(&mut stream).await;
    assert_eq!(status_of(&response), 200);

    shutdown.trigger();
    tokio::time::sleep(Duration::from_millis(100)).await;

    // The listener is gone, so new connections are refused
    assert!(TcpStream::connect(addr).await.is_err());

    // Closing the held connection lets the drain finish well before the
    // grace deadline
    drop(stream);
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server loop did not finish draining")
        .unwrap();
    assert!(result.is_ok());
}

/// Read a single response off a keep-alive connection: headers plus
/// Content-Length bytes of body, without waiting for EOF.
async fn read_keep_alive_response(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert_ne!(n, 0, "connection closed before response completed");
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some((_, body)) = text.split_once("\r\n\r\n") {
            let content_length: usize = header_of(&text, "content-length")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0);
            if body.len() >= content_length {
                return text.into_owned();
            }
        }
    }
}
