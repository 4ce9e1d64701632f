//! Shared harness for integration tests.

use std::time::Duration;

use cambio::config::AppConfig;
use cambio::http::HttpServer;
use cambio::store::QuoteStore;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// A quote service running on an ephemeral port against a mock upstream.
pub struct TestApp {
    pub base_url: String,
    pub store: QuoteStore,
    // Held so the database directory outlives the test.
    _db_dir: TempDir,
}

/// Spawn the full server wired to `upstream_url` and return its address.
pub async fn spawn_app(upstream_url: &str) -> TestApp {
    let db_dir = tempfile::tempdir().unwrap();

    let mut config = AppConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.upstream.base_url = upstream_url.to_string();
    config.storage.path = db_dir.path().join("quotes.db").to_string_lossy().into_owned();

    let store = QuoteStore::connect(&config.storage).await.unwrap();

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(&config, store.clone()).unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    TestApp {
        base_url: format!("http://{}", addr),
        store,
        _db_dir: db_dir,
    }
}

/// Poll the store until a row shows up or the budget runs out. The write
/// may finish after its deadline, so tests wait rather than assert timing.
#[allow(dead_code)]
pub async fn wait_for_rows(app: &TestApp) -> usize {
    for _ in 0..100 {
        let rows = app.store.all_quotes().await.unwrap();
        if !rows.is_empty() {
            return rows.len();
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    0
}
