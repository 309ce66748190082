//! Dependency resolution for Workbelt
//!
//! This module handles:
//! - Building a forward-edge graph from the loaded catalog
//! - Walking it depth-first from every root to produce one processing order
//! - Silently dropping dependencies that no root can reach (cycles, unknown prerequisites)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::resolver::Graph;
//!
//! let graph = Graph::new(&dependencies);
//! for dependency in graph.ordered() {
//!     println!("{}", dependency.name);
//! }
//! ```

pub mod graph;
pub mod sort;

pub use graph::Graph;

use tracing::debug;

use crate::domain::Dependency;

/// Resolve the processing order for a catalog
///
/// Convenience wrapper around [`Graph::new`] and [`Graph::ordered`] that returns owned
/// dependencies.
pub fn resolve(dependencies: &[Dependency]) -> Vec<Dependency> {
    let graph = Graph::new(dependencies);
    debug!(
        dependencies = graph.dependency_count(),
        roots = graph.roots().len(),
        "built dependency graph"
    );
    graph.ordered().into_iter().cloned().collect()
}
