//! Shared harness for integration tests.

use std::net::SocketAddr;

use palette_picker::config::{AppConfig, Environment};
use palette_picker::{AppServer, Shutdown, Store};
use palette_sdk::PaletteClient;
use tokio::net::TcpListener;

/// A running server on an ephemeral port, backed by a freshly seeded in-memory store.
pub struct TestApp {
    #[allow(dead_code)]
    pub addr: SocketAddr,
    pub store: Store,
    pub client: PaletteClient,
    shutdown: Shutdown,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(AppConfig::default()).await
}

/// Same as [`spawn_app`] with a caller-tuned configuration.
pub async fn spawn_app_with(config: AppConfig) -> TestApp {
    let store = Store::connect(config.database_profile(Environment::Test))
        .await
        .unwrap();
    store.migrate().await.unwrap();
    store.seed().await.unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = AppServer::new(config, store.clone());
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestApp {
        addr,
        store,
        client: PaletteClient::new(&format!("http://{}", addr)),
        shutdown,
    }
}
