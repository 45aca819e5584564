use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use metro_server::config::ServerConfig;
use metro_server::network::{load_network, repair_connectivity};
use metro_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Load once, repair once; the graph is read-only from here on
    let mut graph = match load_network(&config.network_file, config.positions_file.as_deref()) {
        Ok(graph) => graph,
        Err(e) => {
            error!("failed to load network: {e}");
            return ExitCode::FAILURE;
        }
    };
    let report = repair_connectivity(&mut graph, config.walk_penalty_secs);
    info!(
        stations = graph.len(),
        edges = graph.edge_count(),
        bridged = report.bridged.len(),
        "network ready"
    );

    let app = create_router(AppState::new(graph), &config.static_dir);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, "failed to bind: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!("Metro route planner listening on http://{}", config.bind_addr);
    info!("  GET /health, /stations, /api/stations/search, /network");
    info!("  GET /dijkstra?s1=&s2=, /prim?start=, /kruskal");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
