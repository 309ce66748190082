//! Graph building for dependency resolution
//!
//! ## Graph Structure
//!
//! Nodes live in an arena and are addressed by index; a name index maps catalog
//! keys to arena slots. Edges point from a prerequisite to its dependents:
//!
//! ```text
//! git  ──►  hub
//!  │
//!  └────►  gh-dash
//! ```
//!
//! A dependency with no prerequisites is a root. A prerequisite name that is not
//! in the catalog adds no edge, so a dependency whose only prerequisites are
//! unknown is neither a root nor reachable.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::Dependency;

/// One arena slot: the dependency and the slots of its dependents
#[derive(Debug)]
pub(super) struct GraphNode<'a> {
    pub(super) dependency: &'a Dependency,
    pub(super) edges: Vec<usize>,
}

/// Forward-edge dependency graph built once from the catalog
#[derive(Debug)]
pub struct Graph<'a> {
    pub(super) nodes: Vec<GraphNode<'a>>,
    pub(super) roots: Vec<usize>,
}

impl<'a> Graph<'a> {
    /// Build the graph from dependencies in catalog order
    ///
    /// Roots keep catalog order. When a name appears more than once the last entry
    /// wins.
    pub fn new(dependencies: &'a [Dependency]) -> Self {
        let mut nodes: Vec<GraphNode<'a>> = Vec::with_capacity(dependencies.len());
        let mut index: HashMap<&'a str, usize> = HashMap::with_capacity(dependencies.len());

        for dependency in dependencies {
            let node = GraphNode {
                dependency,
                edges: Vec::new(),
            };
            if let Some(&slot) = index.get(dependency.name.as_str()) {
                nodes[slot] = node;
            } else {
                index.insert(dependency.name.as_str(), nodes.len());
                nodes.push(node);
            }
        }

        let mut roots = Vec::new();
        for dependency in dependencies {
            let Some(&slot) = index.get(dependency.name.as_str()) else {
                continue;
            };
            // Superseded duplicates contribute neither a root nor edges
            if !std::ptr::eq(nodes[slot].dependency, dependency) {
                continue;
            }
            if dependency.is_root() {
                roots.push(slot);
                continue;
            }
            for prerequisite in &dependency.depends_on {
                match index.get(prerequisite.as_str()) {
                    Some(&from) => nodes[from].edges.push(slot),
                    None => debug!(
                        dependency = %dependency.name,
                        prerequisite = %prerequisite,
                        "ignoring unknown prerequisite"
                    ),
                }
            }
        }

        Self { nodes, roots }
    }

    /// Number of distinct dependencies in the graph
    pub fn dependency_count(&self) -> usize {
        self.nodes.len()
    }

    /// Dependencies with no prerequisites, in catalog order
    pub fn roots(&self) -> Vec<&'a Dependency> {
        self.roots.iter().map(|&slot| self.nodes[slot].dependency).collect()
    }
}
