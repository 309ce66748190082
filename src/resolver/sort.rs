//! Processing order for the dependency graph
//!
//! ## Algorithm
//!
//! Depth-first pre-order walk from every root, in root order, following edges from
//! prerequisites to dependents:
//!
//! 1. Every visited dependency is appended to the order.
//! 2. If it was already in the order, the earlier occurrence is removed first, so a
//!    dependency reached along several branches ends up at its last visit.
//! 3. An edge leading back to a dependency on the current walk path is skipped, so a
//!    cycle reachable from a root is walked once instead of forever.
//!
//! Nothing else tracks visits. Dependencies that no root reaches never appear.
//!
//! ## Example
//!
//! ```text
//! 0            roots:  [0]
//! 1 needs 3    edges:  0 → 2, 0 → 3, 3 → 1
//! 2 needs 0
//! 3 needs 0    order:  [0, 2, 3, 1]
//! ```

use tracing::debug;

use super::graph::Graph;
use crate::domain::Dependency;

/// Mutable state of one walk
struct WalkContext {
    /// Arena slots in processing order
    order: Vec<usize>,
    /// Slots on the current DFS path
    on_path: Vec<bool>,
}

impl<'a> Graph<'a> {
    /// Dependencies in processing order
    ///
    /// Every root appears; every other dependency appears after the branch that last
    /// reached it. Unreachable dependencies are dropped.
    pub fn ordered(&self) -> Vec<&'a Dependency> {
        let mut ctx = WalkContext {
            order: Vec::with_capacity(self.nodes.len()),
            on_path: vec![false; self.nodes.len()],
        };

        for &root in &self.roots {
            self.walk(root, &mut ctx);
        }

        let dropped = self.nodes.len() - ctx.order.len();
        if dropped > 0 {
            debug!(dropped, "dropped dependencies unreachable from any root");
        }

        ctx.order
            .into_iter()
            .map(|slot| self.nodes[slot].dependency)
            .collect()
    }

    fn walk(&self, slot: usize, ctx: &mut WalkContext) {
        if let Some(position) = ctx.order.iter().position(|&seen| seen == slot) {
            ctx.order.remove(position);
        }
        ctx.order.push(slot);

        ctx.on_path[slot] = true;
        for &next in &self.nodes[slot].edges {
            if ctx.on_path[next] {
                debug!(
                    from = %self.nodes[slot].dependency.name,
                    to = %self.nodes[next].dependency.name,
                    "skipping edge back into current path"
                );
                continue;
            }
            self.walk(next, ctx);
        }
        ctx.on_path[slot] = false;
    }
}
