//! Prerequisite graph analysis.
//!
//! # Overview
//!
//! ```text
//! &[Chapter]
//!        ↓  build::build_adjacency()
//! Adjacency (prerequisite → dependents, dangling ids included)
//!   ├─ cycles::detect_cycle()        → CycleCheck
//!   ├─ topo::topological_sort()      → Vec<String> (empty if cyclic)
//!   └─ closure::transitive_prereqs() → AncestorMap
//! ```
//!
//! ## Edge Direction
//!
//! An edge `A → B` means "A is a prerequisite of B": B lists A in its
//! `prerequisites`. This is the inverse of the "needs" relation the chapter
//! records are written in, so "ancestors" of B are found by walking edges
//! backwards.

pub mod build;
pub mod closure;
pub mod cycles;
pub mod topo;

pub use build::{Adjacency, build_adjacency};
pub use closure::{AncestorMap, transitive_prereqs};
pub use cycles::{CycleCheck, detect_cycle};
pub use topo::topological_sort;
