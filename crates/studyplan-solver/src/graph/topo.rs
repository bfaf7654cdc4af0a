//! Topological ordering (Kahn's algorithm).

use std::collections::VecDeque;

use tracing::{debug, instrument};

use super::build::Adjacency;

/// Linearize `adj` so every prerequisite precedes its dependents.
///
/// Zero-indegree nodes are queued in node order and processed FIFO. If any
/// node is left unprocessed the graph has a cycle and the result is empty;
/// callers cannot tell that apart from an empty graph by this value alone,
/// so check [`detect_cycle`](super::detect_cycle) first.
#[must_use]
#[instrument(skip_all, fields(nodes = adj.len()))]
pub fn topological_sort(adj: &Adjacency) -> Vec<String> {
    let n = adj.len();
    let mut indegree = vec![0_usize; n];
    for node in 0..n {
        for &dependent in adj.dependent_indices(node) {
            indegree[dependent] += 1;
        }
    }

    let mut queue: VecDeque<usize> = (0..n).filter(|&i| indegree[i] == 0).collect();
    let mut order: Vec<usize> = Vec::with_capacity(n);

    while let Some(node) = queue.pop_front() {
        order.push(node);
        for &dependent in adj.dependent_indices(node) {
            indegree[dependent] -= 1;
            if indegree[dependent] == 0 {
                queue.push_back(dependent);
            }
        }
    }

    if order.len() != n {
        debug!(
            sorted = order.len(),
            nodes = n,
            "graph is cyclic; no topological order"
        );
        return Vec::new();
    }

    order.into_iter().map(|idx| adj.id(idx).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use studyplan_core::Chapter;

    use super::*;
    use crate::graph::build_adjacency;

    fn graph(nodes: &[(&str, &[&str])]) -> Adjacency {
        let chapters: Vec<Chapter> = nodes
            .iter()
            .map(|(id, pre)| Chapter::new(*id, 10, 1.0, pre))
            .collect();
        build_adjacency(&chapters)
    }

    fn position(order: &[String], id: &str) -> usize {
        order
            .iter()
            .position(|x| x == id)
            .unwrap_or_else(|| panic!("{id} missing from {order:?}"))
    }

    #[test]
    fn chain_orders_prerequisites_first() {
        let adj = graph(&[("C", &["B"]), ("B", &["A"]), ("A", &[])]);
        let order = topological_sort(&adj);
        assert_eq!(order.len(), 3);
        assert!(position(&order, "A") < position(&order, "B"));
        assert!(position(&order, "B") < position(&order, "C"));
    }

    #[test]
    fn ties_follow_node_order() {
        let adj = graph(&[("A", &[]), ("B", &[]), ("C", &["A"])]);
        assert_eq!(topological_sort(&adj), vec!["A", "B", "C"]);
    }

    #[test]
    fn dangling_ids_are_included() {
        let adj = graph(&[("C2", &["X"])]);
        assert_eq!(topological_sort(&adj), vec!["X", "C2"]);
    }

    #[test]
    fn duplicate_edges_still_sort() {
        let adj = graph(&[("A", &[]), ("B", &["A", "A"])]);
        assert_eq!(topological_sort(&adj), vec!["A", "B"]);
    }

    #[test]
    fn cyclic_graph_yields_empty() {
        let adj = graph(&[("X", &["Z"]), ("Y", &["X"]), ("Z", &["Y"]), ("W", &[])]);
        assert!(topological_sort(&adj).is_empty());
    }

    #[test]
    fn empty_graph_yields_empty() {
        assert!(topological_sort(&Adjacency::default()).is_empty());
    }

    #[test]
    fn every_edge_respected() {
        let adj = graph(&[
            ("D", &["B", "C"]),
            ("B", &["A"]),
            ("C", &["A"]),
            ("A", &[]),
            ("E", &["D", "A"]),
        ]);
        let order = topological_sort(&adj);
        assert_eq!(order.len(), adj.len());
        for (from, to) in adj.edges() {
            assert!(position(&order, from) < position(&order, to));
        }
    }
}
