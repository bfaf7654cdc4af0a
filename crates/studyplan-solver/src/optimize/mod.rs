//! Exact subset optimization over a prerequisite graph.
//!
//! # Algorithm
//!
//! 1. Index chapters `0..n` in input order.
//! 2. Compute the transitive closure and turn each chapter's ancestor set
//!    into a bit mask. A chapter with an ancestor outside the chapter list
//!    (a dangling prerequisite) is **infeasible**.
//! 3. Enumerate every subset mask from `0` upward. A subset is feasible when
//!    it has no infeasible member, its total time fits the budget, and each
//!    member's prerequisite mask is contained in the subset mask.
//! 4. Keep the highest total value; on an exact value tie the lower total
//!    time wins; remaining ties keep the first (lowest) mask.
//!
//! This is `O(2^n · n)` with no pruning. Callers bound `n` before calling.
//!
//! # Masks
//!
//! With fewer than 64 chapters subsets are plain `u64` words
//! ([`mask::WordMask`]). Larger inputs switch to a multi-word
//! `FixedBitSet` whose counter reports exhaustion rather than wrapping.

pub mod mask;
pub mod observer;
pub mod search;

pub use observer::{NoopObserver, SearchCompleted, SearchObserver, TracingObserver};
pub use search::{
    PlanOrdering, SearchOptions, SubsetPlan, exact_subset_search, exact_subset_search_with,
};
pub use studyplan_core::config::SearchStrategy;
