mod chart;
mod config;
mod error;
mod fetcher;
mod filter;
mod grouper;
mod map;
mod model;
mod orchestrator;
mod render;
mod sampler;
mod server;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rmcp::{ServiceExt, transport::stdio};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use fetcher::DataFetcher;
use orchestrator::{Event, Phase};
use server::{AppState, RestaurantExplorerServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing to stderr (stdout is reserved for MCP JSON-RPC)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting restaurant-explorer MCP server");

    let config = Config::from_env()?;
    info!(
        data_url = %config.data_url,
        timeout_secs = config.fetch_timeout.as_secs(),
        max_retries = config.fetch_max_retries,
        sample_size = config.sample_size,
        seeded = config.sample_seed.is_some(),
        "configuration loaded"
    );

    let rng = match config.sample_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut state = AppState::new(config.sample_size, rng);

    // The only suspension point: one fetch, finished before any tool call is served.
    let fetcher = DataFetcher::new(&config)?;
    let event = match fetcher.fetch().await {
        Ok(records) => Event::Loaded(records),
        Err(e) => Event::FetchFailed(e.cause()),
    };
    state.dispatch(event);
    if state.phase() == Phase::Empty {
        warn!("no restaurant data, interactive tools disabled");
    }

    let server = RestaurantExplorerServer::new(state);

    info!("MCP server ready, serving on stdio");
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!(error = %e, "MCP server error");
    })?;

    service.waiting().await?;
    info!("MCP server shut down");
    Ok(())
}
