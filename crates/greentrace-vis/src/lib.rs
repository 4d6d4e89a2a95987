//! GreenTrace Map Server
//!
//! Serves the tree proximity network and contributor dashboard over HTTP,
//! with a WebSocket that answers network and stats requests.
//!
//! # Usage
//!
//! ```ignore
//! let config = VisConfig::from_env()?;
//! let service = build_service(&config)?;
//!
//! let server = VisServer::new(service);
//! server.serve(config.api_addr).await?;
//! ```

mod config;
mod server;

pub use config::{ConfigError, VisConfig};
pub use server::{ApiError, AppState, VisServer};

use greentrace_registry::{
    CatalogueClassifier, DocumentationService, InMemoryLedger, InMemoryRepository, InMemoryService,
};

/// Wire an in-memory documentation service from configuration.
pub fn build_service(config: &VisConfig) -> greentrace_registry::Result<InMemoryService> {
    let service = DocumentationService::new(
        InMemoryRepository::new(),
        CatalogueClassifier::seeded(config.classifier_seed),
        InMemoryLedger::new(),
    )
    .with_max_distance(config.max_distance)?;

    if config.seed_community {
        service.with_community_seed()
    } else {
        Ok(service)
    }
}
