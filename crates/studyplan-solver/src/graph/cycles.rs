//! Cycle detection over the prerequisite adjacency.
//!
//! Three-color depth-first search. Every node starts white, turns gray while
//! it is on the DFS path, and black once all its dependents are finished.
//! Reaching a gray node again means the edge just followed closes a cycle.
//!
//! The traversal keeps an explicit stack of frames (node plus a cursor into
//! its dependent list) so depth is bounded by heap, not by the call stack.

#![allow(clippy::module_name_repetitions)]

use tracing::{debug, instrument};

use super::build::Adjacency;

/// Result of [`detect_cycle`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleCheck {
    pub has_cycle: bool,
    /// One cycle as a closed walk `v → … → v`; first and last entries are
    /// the same id. Empty when `has_cycle` is false.
    pub cycle: Vec<String>,
}

impl CycleCheck {
    /// The result for an acyclic graph: `(false, [])`.
    #[must_use]
    pub const fn acyclic() -> Self {
        Self {
            has_cycle: false,
            cycle: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

#[derive(Debug)]
struct Frame {
    node: usize,
    cursor: usize,
}

/// Report whether `adj` contains a directed cycle, and one such cycle.
///
/// Every white node is tried as a root, in node order, so cycles in
/// disconnected components are found. When several cycles exist the one
/// returned is whichever the traversal closes first.
#[must_use]
#[instrument(skip_all, fields(nodes = adj.len()))]
pub fn detect_cycle(adj: &Adjacency) -> CycleCheck {
    let mut color = vec![Color::White; adj.len()];
    let mut stack: Vec<Frame> = Vec::new();

    for root in 0..adj.len() {
        if color[root] != Color::White {
            continue;
        }

        color[root] = Color::Gray;
        stack.push(Frame {
            node: root,
            cursor: 0,
        });

        while let Some(frame) = stack.last_mut() {
            let current = frame.node;
            let Some(&next) = adj.dependent_indices(current).get(frame.cursor) else {
                color[current] = Color::Black;
                stack.pop();
                continue;
            };
            frame.cursor += 1;

            match color[next] {
                Color::White => {
                    color[next] = Color::Gray;
                    stack.push(Frame {
                        node: next,
                        cursor: 0,
                    });
                }
                Color::Gray => {
                    let cycle = reconstruct_cycle(adj, &stack, next);
                    debug!(?cycle, "prerequisite cycle found");
                    return CycleCheck {
                        has_cycle: true,
                        cycle,
                    };
                }
                Color::Black => {}
            }
        }
    }

    CycleCheck::acyclic()
}

/// Rebuild the cycle closed by the back edge `top → closing`.
///
/// Each frame's parent is the frame below it, so walking the stack down from
/// the top until `closing` follows the parent links; reversing gives the
/// cycle in edge direction.
fn reconstruct_cycle(adj: &Adjacency, stack: &[Frame], closing: usize) -> Vec<String> {
    let mut path: Vec<usize> = vec![closing];
    for frame in stack.iter().rev() {
        path.push(frame.node);
        if frame.node == closing {
            break;
        }
    }
    path.reverse();
    path.into_iter().map(|idx| adj.id(idx).to_string()).collect()
}
