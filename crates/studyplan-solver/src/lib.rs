#![forbid(unsafe_code)]
//! studyplan-solver library.
//!
//! Graph analysis over chapter prerequisites and the exhaustive subset
//! optimizer built on top of it. Nothing here returns an error: cyclic
//! graphs and unselectable chapters are reported through return values and
//! it is up to the caller to act on them.
//!
//! # Conventions
//!
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//!   The optimizer reports completion through [`optimize::SearchObserver`] rather
//!   than logging directly.

pub mod graph;
pub mod optimize;

pub use graph::{
    Adjacency, AncestorMap, CycleCheck, build_adjacency, detect_cycle, topological_sort,
    transitive_prereqs,
};
pub use optimize::{
    NoopObserver, PlanOrdering, SearchCompleted, SearchObserver, SearchOptions, SearchStrategy,
    SubsetPlan, TracingObserver, exact_subset_search, exact_subset_search_with,
};
