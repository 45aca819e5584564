//! Application state for the web layer.

use std::sync::Arc;

use crate::network::NetworkGraph;

/// Shared application state.
///
/// The network is built and repaired once at startup, then only read.
#[derive(Clone)]
pub struct AppState {
    pub graph: Arc<NetworkGraph>,
}

impl AppState {
    pub fn new(graph: NetworkGraph) -> Self {
        Self {
            graph: Arc::new(graph),
        }
    }
}
