//! Transitive prerequisite closure.
//!
//! For every node, the set of ids reachable by following prerequisite edges
//! backwards, direct and indirect. Edges are inverted once up front; each
//! node then gets its own stack walk with a visited set, so the walk ends
//! even when the graph has cycles. On a cyclic graph a node on the cycle
//! shows up in its own ancestor set and the result is not a usable schedule.

use std::collections::{BTreeSet, HashMap};

use tracing::instrument;

use super::build::Adjacency;

/// Node id → every direct and indirect prerequisite id.
pub type AncestorMap = HashMap<String, BTreeSet<String>>;

/// Compute the ancestor set of every node in `adj`.
#[must_use]
#[instrument(skip_all, fields(nodes = adj.len()))]
pub fn transitive_prereqs(adj: &Adjacency) -> AncestorMap {
    let n = adj.len();

    // Reverse graph: node → its direct prerequisites.
    let mut reverse: Vec<Vec<usize>> = vec![Vec::new(); n];
    for prerequisite in 0..n {
        for &dependent in adj.dependent_indices(prerequisite) {
            reverse[dependent].push(prerequisite);
        }
    }

    let mut result: AncestorMap = HashMap::with_capacity(n);
    let mut seen = vec![false; n];

    for node in 0..n {
        seen.fill(false);
        let mut ancestors: BTreeSet<String> = BTreeSet::new();
        let mut stack: Vec<usize> = reverse[node].clone();

        while let Some(p) = stack.pop() {
            if seen[p] {
                continue;
            }
            seen[p] = true;
            ancestors.insert(adj.id(p).to_string());
            stack.extend_from_slice(&reverse[p]);
        }

        result.insert(adj.id(node).to_string(), ancestors);
    }

    result
}
