use anyhow::Result;
use clap::Parser;
use refiner::config::ServerConfig;
use refiner::gateway::HttpGateway;
use refiner::ocr::OcrEngine;
use refiner::{rest, AppContext};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "refinerd",
    about = "Refiner — AI code review and rewrite server",
    version
)]
struct Args {
    /// HTTP server port
    #[arg(long, env = "REFINER_PORT")]
    port: Option<u16>,

    /// Data directory for refiner.toml
    #[arg(long, env = "REFINER_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "REFINER_LOG")]
    log: Option<String>,

    /// Bind address (default: 127.0.0.1; use 0.0.0.0 for LAN access)
    #[arg(long, env = "REFINER_BIND")]
    bind_address: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = ServerConfig::new(args.port, args.data_dir, args.log, args.bind_address);

    init_tracing(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = config.port,
        bind = %config.bind_address,
        "starting refinerd"
    );
    if config.api_key.is_none() {
        // Soft dependency: the server still binds, completion calls fail
        // at request time with a clear error.
        warn!("REFINER_API_KEY not set — completion requests will fail until it is");
    }
    info!("demo credentials: admin / student1 / teacher (password: \"password\")");

    let gateway = Arc::new(HttpGateway::new(&config.upstream, config.api_key.clone())?);
    let ocr = OcrEngine::detect().await;
    let ctx = Arc::new(AppContext::new(config, gateway, ocr));

    rest::start_rest_server(ctx).await
}

fn init_tracing(config: &ServerConfig) {
    let filter = EnvFilter::try_new(&config.log).unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
