//! Adjacency construction from chapter records.
//!
//! Construction is two-phase: every id seen anywhere (a chapter's own id or
//! any id in a prerequisite list) is registered as a node first, then edges
//! are added. Nodes are numbered in first-seen order, scanning chapters in
//! input order and each chapter's prerequisites before its own id, so node
//! order (and everything derived from it) is deterministic.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use studyplan_core::Chapter;
use tracing::instrument;

/// Dependent adjacency: for each id, the ids that directly depend on it.
///
/// Dangling prerequisite ids (referenced but not defined as chapters) are
/// nodes too. Duplicate prerequisite declarations are kept as duplicate
/// edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    /// Node ids in first-seen order.
    ids: Vec<String>,
    /// Mapping from id to position in `ids`.
    index: HashMap<String, usize>,
    /// `dependents[i]` lists the nodes that list `ids[i]` as a prerequisite.
    dependents: Vec<Vec<usize>>,
}

impl Adjacency {
    /// Number of nodes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.ids.len()
    }

    /// `true` if the graph has no nodes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of edges, counting duplicates.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.dependents.iter().map(Vec::len).sum()
    }

    /// All node ids in node order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// `true` if `id` is a node.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Node position of `id`.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Id of the node at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[must_use]
    pub fn id(&self, idx: usize) -> &str {
        &self.ids[idx]
    }

    /// Positions of the direct dependents of node `idx`.
    #[must_use]
    pub fn dependent_indices(&self, idx: usize) -> &[usize] {
        self.dependents.get(idx).map_or(&[], Vec::as_slice)
    }

    /// Ids that directly depend on `id`, or `None` if `id` is not a node.
    #[must_use]
    pub fn dependents(&self, id: &str) -> Option<Vec<&str>> {
        let idx = self.index_of(id)?;
        Some(
            self.dependents[idx]
                .iter()
                .map(|&d| self.ids[d].as_str())
                .collect(),
        )
    }

    /// `true` if `from → to` is an edge.
    #[must_use]
    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(f), Some(t)) => self.dependents[f].contains(&t),
            _ => false,
        }
    }

    /// Every edge as `(prerequisite, dependent)`, in node order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.dependents.iter().enumerate().flat_map(move |(from, deps)| {
            deps.iter()
                .map(move |&to| (self.ids[from].as_str(), self.ids[to].as_str()))
        })
    }

    fn register(&mut self, id: &str) -> usize {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.ids.len();
        self.ids.push(id.to_string());
        self.index.insert(id.to_string(), idx);
        self.dependents.push(Vec::new());
        idx
    }
}

/// Build the dependent adjacency for `chapters`.
///
/// For a chapter `C` with prerequisite `P` the graph gets the edge `P → C`.
/// Never fails: dangling prerequisites simply become nodes with no
/// prerequisites of their own.
#[must_use]
#[instrument(skip_all, fields(chapters = chapters.len()))]
pub fn build_adjacency(chapters: &[Chapter]) -> Adjacency {
    let mut adj = Adjacency::default();

    // Phase 1: every id becomes a node.
    for ch in chapters {
        for pre in &ch.prerequisites {
            adj.register(pre);
        }
        adj.register(&ch.id);
    }

    // Phase 2: edges.
    for ch in chapters {
        let Some(dependent) = adj.index_of(&ch.id) else {
            continue;
        };
        for pre in &ch.prerequisites {
            if let Some(prerequisite) = adj.index_of(pre) {
                adj.dependents[prerequisite].push(dependent);
            }
        }
    }

    tracing::debug!(
        nodes = adj.len(),
        edges = adj.edge_count(),
        "built prerequisite adjacency"
    );
    adj
}
