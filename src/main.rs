use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skinscan_backend::analysis::MockAnalyzer;
use skinscan_backend::storage::FileStore;
use skinscan_backend::{create_router, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skinscan_backend=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration; startup fails if the shared API key is missing.
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config.server);

    // Open the file store, creating the upload directory if needed.
    let store = FileStore::open(&config.storage).await?;
    info!("File store ready at {}", config.storage.upload_dir.display());

    // Create shared state. The mock analyzer sits behind the SkinAnalyzer
    // trait so a real inference engine can replace it later.
    let state = AppState {
        config: config.clone(),
        store,
        analyzer: Arc::new(MockAnalyzer),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
