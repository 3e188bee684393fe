//! Shared fixtures for integration tests.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use nginx_dashboard::{DashboardConfig, HttpServer, Shutdown};

/// Temporary sites-available / sites-enabled / log directories.
pub struct Fixture {
    pub root: TempDir,
}

#[allow(dead_code)]
impl Fixture {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        for dir in ["sites-available", "sites-enabled", "logs"] {
            fs::create_dir(root.path().join(dir)).unwrap();
        }
        Self { root }
    }

    pub fn available(&self) -> std::path::PathBuf {
        self.root.path().join("sites-available")
    }

    pub fn enabled(&self) -> std::path::PathBuf {
        self.root.path().join("sites-enabled")
    }

    pub fn logs(&self) -> std::path::PathBuf {
        self.root.path().join("logs")
    }

    pub fn add_site(&self, name: &str, content: impl AsRef<[u8]>) {
        fs::write(self.available().join(name), content).unwrap();
    }

    pub fn enable(&self, name: &str) {
        link_or_copy(&self.available().join(name), &self.enabled().join(name));
    }

    pub fn disable(&self, name: &str) {
        fs::remove_file(self.enabled().join(name)).unwrap();
    }

    pub fn add_log(&self, name: &str, content: impl AsRef<[u8]>) {
        fs::write(self.logs().join(name), content).unwrap();
    }

    pub fn config(&self) -> DashboardConfig {
        let mut config = DashboardConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();
        config.paths.sites_available = self.available();
        config.paths.sites_enabled = self.enabled();
        config.paths.log_dir = self.logs();
        config
    }
}

#[cfg(unix)]
fn link_or_copy(from: &Path, to: &Path) {
    std::os::unix::fs::symlink(from, to).unwrap();
}

#[cfg(not(unix))]
fn link_or_copy(from: &Path, to: &Path) {
    fs::copy(from, to).unwrap();
}

/// A running server and its shutdown handle.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

#[allow(dead_code)]
impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the dashboard on an ephemeral port.
pub async fn spawn_server(config: DashboardConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    TestServer { addr, shutdown }
}

/// HTTP client that ignores proxy settings from the environment.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Start a mock backend that answers every request with `status_line`.
#[allow(dead_code)]
pub async fn start_mock_backend(status_line: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = [0u8; 1024];
                        let _ = socket.read(&mut buf).await;
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                            status_line
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a backend that accepts connections but never answers.
#[allow(dead_code)]
pub async fn start_silent_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// An address with nothing listening on it.
#[allow(dead_code)]
pub fn closed_port() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}
