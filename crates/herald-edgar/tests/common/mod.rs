//! Shared helpers: a local HTTP server with hit counting

#![allow(dead_code)]

use axum::Router;
use herald_edgar::{EdgarConfig, ResilientFetcher};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Contact string the test fetchers send
pub const TEST_USER_AGENT: &str = "herald-tests tests@example.com";

/// Thread-safe request counter shared with handlers
#[derive(Debug, Clone, Default)]
pub struct Hits(Arc<AtomicUsize>);

impl Hits {
    pub fn record(&self) -> usize {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Serve `app` on an ephemeral localhost port
pub async fn spawn_server(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// A port with nothing listening on it
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Fetcher with a short base delay so retry tests stay fast
pub fn fast_fetcher(max_retries: u32, base_delay: Duration) -> ResilientFetcher {
    let config = EdgarConfig {
        user_agent: TEST_USER_AGENT.to_string(),
        request_timeout_secs: 5,
        ..EdgarConfig::default()
    };
    ResilientFetcher::new(&config)
        .unwrap()
        .with_policy(max_retries, base_delay)
}
