mod build;
mod error;
mod graph;

pub use build::{build_graph, build_graph_with, BuildOptions};
pub use error::GraphError;
pub use graph::UnitGraph;
