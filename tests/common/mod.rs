//! Shared helpers for integration tests.
//!
//! Spins up the real listener + accept loop on an ephemeral port and
//! speaks HTTP/1.1 over a raw TCP stream.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use helloserv::config::{
    AppState, Config, HttpConfig, LoggingConfig, PerformanceConfig, RoutesConfig, ServerConfig,
};
use helloserv::server;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Baseline config for tests: quiet logging, defaults otherwise.
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            workers: None,
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            access_log: false,
            access_log_format: "combined".to_string(),
            access_log_file: None,
            error_log_file: None,
        },
        performance: PerformanceConfig {
            keep_alive_timeout: 75,
            read_timeout: 5,
            write_timeout: 5,
            max_connections: None,
            shutdown_grace: 1,
        },
        http: HttpConfig {
            server_name: "helloserv/0.1".to_string(),
            enable_cors: false,
            max_body_size: 1024,
        },
        routes: RoutesConfig::default(),
    }
}

/// Start the real server loop on an ephemeral port and return its address.
pub fn spawn_server(cfg: Config) -> SocketAddr {
    let (addr, _shutdown, _handle) = spawn_server_with_shutdown(cfg);
    addr
}

/// Like [`spawn_server`], but also hand back the shutdown control and the
/// loop's join handle for lifecycle tests.
pub fn spawn_server_with_shutdown(
    cfg: Config,
) -> (
    SocketAddr,
    Arc<server::Shutdown>,
    tokio::task::JoinHandle<std::io::Result<()>>,
) {
    let listener = server::create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
    let addr = listener.local_addr().unwrap();

    let state = Arc::new(AppState::new(cfg));
    let active_connections = Arc::new(AtomicUsize::new(0));
    let shutdown = Arc::new(server::Shutdown::new());

    let handle = tokio::spawn(server::start_server_loop(
        listener,
        state,
        active_connections,
        Arc::clone(&shutdown),
    ));

    (addr, shutdown, handle)
}

/// Send a raw HTTP/1.1 request and return the full response text.
///
/// Callers should include `Connection: close` so the read terminates.
pub async fn send_request(addr: SocketAddr, raw: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw.as_bytes()).await.unwrap();

    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.unwrap();
    String::from_utf8_lossy(&buf).into_owned()
}

/// Convenience: plain GET with Connection: close.
pub async fn get(addr: SocketAddr, path: &str) -> String {
    send_request(
        addr,
        &format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n"),
    )
    .await
}

/// Parse the status code out of a response.
pub fn status_of(response: &str) -> u16 {
    response
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| panic!("no status line in response: {response:?}"))
}

/// Look up a response header value, case-insensitively.
pub fn header_of<'a>(response: &'a str, name: &str) -> Option<&'a str> {
    let head = response.split("\r\n\r\n").next()?;
    head.lines().skip(1).find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.eq_ignore_ascii_case(name).then(|| value.trim())
    })
}

/// The response body (everything after the header block).
pub fn body_of(response: &str) -> &str {
    response.split_once("\r\n\r\n").map_or("", |(_, body)| body)
}
