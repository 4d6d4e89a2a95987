//! GreenTrace Map Server
//!
//! Load configuration, seed the community map and serve the API.

use greentrace_vis::{build_service, VisConfig, VisServer};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = VisConfig::from_env()?;

    // Optional positional port
    if let Some(port) = env::args().nth(1) {
        config = config.with_port(port.parse()?);
    }

    let service = build_service(&config)?;

    println!("GreenTrace Map Server");
    println!("=====================");
    println!();
    println!("  Trees: {}", service.records().len());
    println!("  Connection threshold: {}°", service.max_distance());
    println!();
    println!("Serving on http://{}", config.api_addr);
    println!();

    let server = VisServer::new(service);
    server.serve(config.api_addr).await?;

    Ok(())
}
