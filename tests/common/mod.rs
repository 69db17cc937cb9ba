//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use podium_context::config::{AppConfig, PodletConfig, Role};
use podium_context::lifecycle::{startup, Shutdown};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

pub const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 12_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/12.0 Mobile/15E148 Safari/604.1";

/// Configuration for a layout mounted at `mount` composing `podlets`.
#[allow(dead_code)]
pub fn layout_config(name: &str, mount: &str, podlets: Vec<PodletConfig>) -> AppConfig {
    let mut config = AppConfig::default();
    config.server.role = Role::Layout;
    config.context.name = name.into();
    config.context.mount_pathname.pathname = mount.into();
    config.context.public_pathname.pathname = mount.into();
    config.podlets = podlets;
    config
}

/// Configuration for a podlet mounted at `/`.
#[allow(dead_code)]
pub fn podlet_config(name: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.server.role = Role::Podlet;
    config.context.name = name.into();
    config
}

#[allow(dead_code)]
pub fn podlet(name: &str, addr: SocketAddr) -> PodletConfig {
    PodletConfig {
        name: name.into(),
        uri: format!("http://{}/", addr),
        timeout_ms: 1000,
    }
}

/// Start a server on an ephemeral port.
pub async fn start_server(config: AppConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = startup(config).unwrap();

    let shutdown = Shutdown::new();
    let stopped = shutdown.signal();
    tokio::spawn(async move {
        let _ = server.run(listener, stopped).await;
    });

    (addr, shutdown)
}

/// Start a mock podlet that always answers with `status`.
#[allow(dead_code)]
pub async fn start_mock_podlet(status: &'static str, delay: Duration) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let body = "<div>mock</div>";
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
