//! Completion events emitted by the subset search.
//!
//! The search never logs on its own. It hands a [`SearchCompleted`] to the
//! [`SearchObserver`] it was given; [`TracingObserver`] turns that into a
//! structured `tracing` event.

use std::time::Duration;

use tracing::info;

use super::search::PlanOrdering;
use studyplan_core::config::SearchStrategy;

/// Summary of one finished search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCompleted {
    /// Number of chapters searched over.
    pub chapters: usize,
    pub time_budget: u64,
    pub best_value: f64,
    pub best_time: u64,
    pub chosen_count: usize,
    /// Chapters excluded up front because of a dangling prerequisite.
    pub infeasible: usize,
    /// Strategy that actually ran (parallel falls back on wide inputs).
    pub strategy: SearchStrategy,
    /// `true` when the multi-word mask path was used.
    pub multi_word: bool,
    pub ordering: PlanOrdering,
    pub elapsed: Duration,
}

/// Sink for search completion events.
pub trait SearchObserver {
    fn search_completed(&self, event: &SearchCompleted);
}

/// Forwards completion events to `tracing` at `INFO`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn search_completed(&self, event: &SearchCompleted) {
        info!(
            chapters = event.chapters,
            time_budget = event.time_budget,
            best_value = event.best_value,
            best_time = event.best_time,
            chosen_count = event.chosen_count,
            infeasible = event.infeasible,
            strategy = ?event.strategy,
            multi_word = event.multi_word,
            ordering = event.ordering.as_str(),
            elapsed_ms = u64::try_from(event.elapsed.as_millis()).unwrap_or(u64::MAX),
            "exact subset search finished"
        );
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn search_completed(&self, _event: &SearchCompleted) {}
}
