//! Chat server binary
//!
//! Run with: cargo run -p file-search-rag --bin file-search-rag-server -- --mode bootstrap

use clap::Parser;
use file_search_rag::{
    config::{ProvisioningMode, RagConfig},
    providers::GeminiClient,
    provisioning::Provisioner,
    server::{state::AppState, RagServer},
    StoreRegistry,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "file-search-rag-server", version, about = "Chat over Gemini file search stores")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How store ids are obtained: bootstrap or static
    #[arg(short, long)]
    mode: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[file-search-rag] .env not loaded: {} (using system environment)", e);
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "file_search_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Load configuration: file, then environment, then flags
    let mut config = match &args.config {
        Some(path) => RagConfig::from_file(path)?,
        None => RagConfig::default(),
    };
    config.apply_env()?;
    if let Some(mode) = &args.mode {
        config.provisioning.mode = mode.parse()?;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!("Configuration loaded");
    tracing::info!("  - Mode: {:?}", config.provisioning.mode);
    tracing::info!("  - Model: {}", config.gemini.model);

    let gemini = Arc::new(GeminiClient::new(&config.gemini)?);

    let registry = match config.provisioning.mode {
        ProvisioningMode::Bootstrap => {
            tracing::info!("--- Initializing file search stores ---");
            Provisioner::from_config(gemini.clone(), &config.provisioning)
                .run()
                .await?
        }
        ProvisioningMode::Static => {
            tracing::info!("--- Loading store ids from configuration ---");
            StoreRegistry::from_static(&config.stores)
        }
    };

    for domain in file_search_rag::Domain::ALL {
        tracing::info!(
            "  - {}: {}",
            domain,
            registry.get(domain).unwrap_or("<not set>")
        );
    }

    let state = AppState::new(registry, gemini);
    let server = RagServer::new(config.server.clone(), state);

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("\nEndpoints:");
    println!("  POST /chat/business - Ask the business store");
    println!("  POST /chat/science  - Ask the science store");
    println!("  POST /chat/story    - Ask the story store");
    println!("  POST /chat/all      - Ask across all stores");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
