//! Loading the network from disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::NetworkGraph;
use super::parse::{parse_network, parse_positions};

/// Errors that can occur when reading network input files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file held no usable station
    #[error("no station found in {0}")]
    Empty(PathBuf),
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse the network file, and optionally a positions file.
///
/// Malformed lines are skipped (see [`parse_network`]). A network file
/// without a single valid station is an error, as nothing could be served.
pub fn load_network(
    network_path: &Path,
    positions_path: Option<&Path>,
) -> Result<NetworkGraph, LoadError> {
    let parsed = parse_network(&read(network_path)?);
    if !parsed.errors.is_empty() {
        warn!(
            path = %network_path.display(),
            skipped = parsed.errors.len(),
            "network file had malformed lines"
        );
    }

    let mut graph = parsed.graph;
    if graph.is_empty() {
        return Err(LoadError::Empty(network_path.to_path_buf()));
    }

    if let Some(path) = positions_path {
        let (positions, errors) = parse_positions(&read(path)?);
        let attached = graph.attach_positions(&positions);
        info!(
            path = %path.display(),
            positions = positions.len(),
            attached,
            skipped = errors.len(),
            "loaded station positions"
        );
    }

    info!(
        path = %network_path.display(),
        stations = graph.len(),
        edges = graph.edge_count(),
        "loaded network"
    );

    Ok(graph)
}
