//! Index server lifecycle

use crate::common::{IndexConfig, Result};
use crate::index::http::{create_router, IndexState};
use crate::index::mapping::MappingStore;
use crate::index::placement::PlacementPolicy;
use crate::index::volume_client::VolumeClient;
use std::sync::Arc;

pub struct IndexServer {
    config: IndexConfig,
}

impl IndexServer {
    pub fn new(config: IndexConfig) -> Self {
        Self { config }
    }

    pub async fn serve(self) -> Result<()> {
        self.config.validate()?;

        tracing::info!("Starting index server");
        tracing::info!("  HTTP API: {}", self.config.bind_addr);
        tracing::info!("  DB path: {}", self.config.db_path.display());
        tracing::info!("  Volumes: {}", self.config.volumes.join(","));
        tracing::info!("  Replicas: {}", self.config.replicas);
        tracing::info!("  Subvolumes: {}", self.config.subvolumes);

        let mapping = Arc::new(MappingStore::open(&self.config.db_path)?);
        let placement = Arc::new(PlacementPolicy::new(
            self.config.volumes.clone(),
            self.config.replicas,
            self.config.subvolumes,
        )?);

        let state = IndexState {
            mapping,
            placement,
            volumes: Arc::new(VolumeClient::new()),
        };
        let router = create_router(state);

        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!("✓ Index server ready");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
