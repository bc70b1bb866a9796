pub mod evolve;
pub mod report;

use anyhow::{Context, Result};
use std::path::Path;

use constituency_search::{Configuration, InputDocument};

use crate::io::read_json;

/// Read an input document and build its initial configuration.
///
/// The document is returned too, so excluded units can be merged back into the output.
pub(crate) fn load_configuration(path: &Path) -> Result<(InputDocument, Configuration)> {
    let document: InputDocument = read_json(path)?;
    let graph = document.build_graph()
        .with_context(|| format!("build unit graph from {}", path.display()))?;
    log::info!("loaded units={} edges={} regions={} population={} from {}",
        graph.node_count(), graph.edge_count() / 2, graph.region_count(), graph.total_population(), path.display());
    let excluded = document.excluded_units().count();
    if excluded > 0 { log::info!("excluded {excluded} units from the search") }
    Ok((document, Configuration::new(graph)))
}
