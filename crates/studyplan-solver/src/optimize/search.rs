//! The exhaustive subset search.

use std::collections::HashMap;
use std::time::Instant;

use fixedbitset::FixedBitSet;
use rayon::prelude::*;
use studyplan_core::Chapter;
use studyplan_core::config::SearchStrategy;
use tracing::{instrument, warn};

use super::mask::{SubsetMask, WORD_MASK_MAX_WIDTH, WordMask};
use super::observer::{SearchCompleted, SearchObserver, TracingObserver};
use crate::graph::{Adjacency, topological_sort, transitive_prereqs};

/// How the chosen chapters were ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanOrdering {
    /// Filtered from a topological order of the whole graph.
    Topological,
    /// The whole graph is cyclic, so input order was used instead.
    InputOrder,
}

impl PlanOrdering {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Topological => "topological",
            Self::InputOrder => "input_order",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub strategy: SearchStrategy,
}

/// The best feasible subset.
#[derive(Debug, Clone, PartialEq)]
pub struct SubsetPlan {
    pub best_value: f64,
    /// Total minutes of the chosen chapters.
    pub best_time: u64,
    /// Chosen chapters, prerequisites first (see [`PlanOrdering`]).
    pub chosen: Vec<Chapter>,
}

impl SubsetPlan {
    /// The `(0.0, 0, [])` plan.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            best_value: 0.0,
            best_time: 0,
            chosen: Vec::new(),
        }
    }

    /// Ids of the chosen chapters, in plan order.
    #[must_use]
    pub fn chosen_ids(&self) -> Vec<&str> {
        self.chosen.iter().map(|ch| ch.id.as_str()).collect()
    }
}

/// Find the value-maximal feasible subset of `chapters` within
/// `time_budget` minutes.
///
/// Runs the sequential reference search and reports completion through
/// [`TracingObserver`]. See [`exact_subset_search_with`].
#[must_use]
pub fn exact_subset_search(chapters: &[Chapter], time_budget: u64, adj: &Adjacency) -> SubsetPlan {
    exact_subset_search_with(
        chapters,
        time_budget,
        adj,
        &SearchOptions::default(),
        &TracingObserver,
    )
}

/// Find the value-maximal feasible subset of `chapters` within
/// `time_budget` minutes, using `options` and reporting to `observer`.
///
/// `adj` must be the adjacency built from `chapters`. A chapter whose
/// transitive prerequisites include an id outside `chapters` is never
/// selected. The result is ordered by the topological order of `adj`, or by
/// input order when `adj` is cyclic; check for cycles first if that matters.
///
/// Both strategies return the same plan. Parallel search is only available
/// below 64 chapters and silently runs sequentially beyond that.
#[must_use]
#[instrument(skip_all, fields(chapters = chapters.len(), time_budget = time_budget))]
pub fn exact_subset_search_with(
    chapters: &[Chapter],
    time_budget: u64,
    adj: &Adjacency,
    options: &SearchOptions,
    observer: &dyn SearchObserver,
) -> SubsetPlan {
    let started = Instant::now();
    let n = chapters.len();

    if n == 0 {
        observer.search_completed(&SearchCompleted {
            chapters: 0,
            time_budget,
            best_value: 0.0,
            best_time: 0,
            chosen_count: 0,
            infeasible: 0,
            strategy: options.strategy,
            multi_word: false,
            ordering: PlanOrdering::Topological,
            elapsed: started.elapsed(),
        });
        return SubsetPlan::empty();
    }

    let outcome = if fits_word_mask(n) {
        let profile = Profile::<WordMask>::build(chapters, adj);
        let best = match options.strategy {
            SearchStrategy::Sequential => scan_all(&profile, time_budget),
            SearchStrategy::Parallel => scan_words_parallel(&profile, time_budget),
        };
        Outcome::new(&profile, &best, options.strategy, false)
    } else {
        if options.strategy == SearchStrategy::Parallel {
            warn!(
                chapters = n,
                "parallel search needs fewer than 64 chapters; running sequentially"
            );
        }
        let profile = Profile::<FixedBitSet>::build(chapters, adj);
        let best = scan_all(&profile, time_budget);
        Outcome::new(&profile, &best, SearchStrategy::Sequential, true)
    };

    let (chosen, ordering) = order_chosen(chapters, &outcome.members, adj);

    observer.search_completed(&SearchCompleted {
        chapters: n,
        time_budget,
        best_value: outcome.value,
        best_time: outcome.time,
        chosen_count: chosen.len(),
        infeasible: outcome.infeasible,
        strategy: outcome.strategy,
        multi_word: outcome.multi_word,
        ordering,
        elapsed: started.elapsed(),
    });

    SubsetPlan {
        best_value: outcome.value,
        best_time: outcome.time,
        chosen,
    }
}

/// `true` when `n` chapters fit the single-word mask path.
const fn fits_word_mask(n: usize) -> bool {
    n <= WORD_MASK_MAX_WIDTH
}

// ---------------------------------------------------------------------------
// Precomputation
// ---------------------------------------------------------------------------

/// Per-chapter data the inner loop reads, indexed by input position.
struct Profile<M> {
    times: Vec<u64>,
    values: Vec<f64>,
    /// Transitive prerequisites as a mask over chapter positions.
    prereq_masks: Vec<M>,
    /// Chapters with a prerequisite outside the chapter list.
    infeasible: Vec<bool>,
}

impl<M: SubsetMask> Profile<M> {
    fn build(chapters: &[Chapter], adj: &Adjacency) -> Self {
        let n = chapters.len();
        let position: HashMap<&str, usize> = chapters
            .iter()
            .enumerate()
            .map(|(i, ch)| (ch.id.as_str(), i))
            .collect();

        let closure = transitive_prereqs(adj);
        let mut prereq_masks: Vec<M> = Vec::with_capacity(n);
        let mut infeasible = vec![false; n];

        for (i, ch) in chapters.iter().enumerate() {
            let mut mask = M::empty(n);
            if let Some(ancestors) = closure.get(&ch.id) {
                for ancestor in ancestors {
                    if let Some(&idx) = position.get(ancestor.as_str()) {
                        mask.insert(idx);
                    } else {
                        infeasible[i] = true;
                        break;
                    }
                }
            }
            prereq_masks.push(mask);
        }

        Self {
            times: chapters.iter().map(|ch| u64::from(ch.time_minutes)).collect(),
            values: chapters.iter().map(|ch| ch.score_value).collect(),
            prereq_masks,
            infeasible,
        }
    }

    const fn width(&self) -> usize {
        self.times.len()
    }

    /// Total `(value, time)` of `subset`, or `None` if it is not feasible.
    ///
    /// Members are checked in index order and the walk stops at the first
    /// failure: infeasible member, budget exceeded, or missing prerequisite.
    fn evaluate(&self, subset: &M, budget: u64) -> Option<(f64, u64)> {
        let mut time = 0_u64;
        let mut value = 0.0_f64;

        for i in 0..self.width() {
            if !subset.has(i) {
                continue;
            }
            if self.infeasible[i] {
                return None;
            }
            time += self.times[i];
            if time > budget {
                return None;
            }
            value += self.values[i];
            if !self.prereq_masks[i].within(subset) {
                return None;
            }
        }

        Some((value, time))
    }
}

// ---------------------------------------------------------------------------
// Enumeration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Candidate<M> {
    value: f64,
    time: u64,
    mask: M,
}

impl<M: SubsetMask> Candidate<M> {
    fn empty(width: usize) -> Self {
        Self {
            value: 0.0,
            time: 0,
            mask: M::empty(width),
        }
    }
}

/// `true` if `(value, time)` should replace `best`: higher value, or the
/// same value in less time.
#[allow(clippy::float_cmp)]
fn improves<M>(best: Option<&Candidate<M>>, value: f64, time: u64) -> bool {
    best.is_none_or(|b| value > b.value || (value == b.value && time < b.time))
}

fn scan_all<M: SubsetMask>(profile: &Profile<M>, budget: u64) -> Candidate<M> {
    let width = profile.width();
    let mut subset = M::empty(width);
    let mut best: Option<Candidate<M>> = None;

    loop {
        if let Some((value, time)) = profile.evaluate(&subset, budget)
            && improves(best.as_ref(), value, time)
        {
            best = Some(Candidate {
                value,
                time,
                mask: subset.clone(),
            });
        }
        if !subset.advance(width) {
            break;
        }
    }

    // The empty subset is always feasible, so `best` is always set.
    best.unwrap_or_else(|| Candidate::empty(width))
}

fn scan_word_range(
    profile: &Profile<WordMask>,
    budget: u64,
    start: u64,
    end: u64,
) -> Option<Candidate<WordMask>> {
    let mut best: Option<Candidate<WordMask>> = None;
    for bits in start..end {
        let subset = WordMask(bits);
        if let Some((value, time)) = profile.evaluate(&subset, budget)
            && improves(best.as_ref(), value, time)
        {
            best = Some(Candidate {
                value,
                time,
                mask: subset,
            });
        }
    }
    best
}

/// Split `0..2^n` into chunks, scan them on the rayon pool, and reduce by
/// (value desc, time asc, mask asc) so the sequential winner comes out.
fn scan_words_parallel(profile: &Profile<WordMask>, budget: u64) -> Candidate<WordMask> {
    let width = profile.width();
    let total: u64 = 1 << width;
    let workers = u64::try_from(rayon::current_num_threads()).unwrap_or(1);
    let chunks = workers.saturating_mul(4).clamp(1, total);
    let chunk_len = total.div_ceil(chunks);

    (0..chunks)
        .into_par_iter()
        .filter_map(|chunk| {
            let start = chunk * chunk_len;
            let end = start.saturating_add(chunk_len).min(total);
            scan_word_range(profile, budget, start, end)
        })
        .reduce_with(|a, b| {
            if improves(Some(&a), b.value, b.time) {
                b
            } else if improves(Some(&b), a.value, a.time) || a.mask <= b.mask {
                a
            } else {
                b
            }
        })
        .unwrap_or_else(|| Candidate::empty(width))
}

// ---------------------------------------------------------------------------
// Result assembly
// ---------------------------------------------------------------------------

struct Outcome {
    value: f64,
    time: u64,
    /// Chosen chapter positions, ascending.
    members: Vec<usize>,
    infeasible: usize,
    strategy: SearchStrategy,
    multi_word: bool,
}

impl Outcome {
    fn new<M: SubsetMask>(
        profile: &Profile<M>,
        best: &Candidate<M>,
        strategy: SearchStrategy,
        multi_word: bool,
    ) -> Self {
        Self {
            value: best.value,
            time: best.time,
            members: (0..profile.width()).filter(|&i| best.mask.has(i)).collect(),
            infeasible: profile.infeasible.iter().filter(|&&x| x).count(),
            strategy,
            multi_word,
        }
    }
}

fn order_chosen(
    chapters: &[Chapter],
    members: &[usize],
    adj: &Adjacency,
) -> (Vec<Chapter>, PlanOrdering) {
    let topo = topological_sort(adj);
    if topo.is_empty() {
        let chosen = members.iter().map(|&i| chapters[i].clone()).collect();
        return (chosen, PlanOrdering::InputOrder);
    }

    let by_id: HashMap<&str, usize> = members
        .iter()
        .map(|&i| (chapters[i].id.as_str(), i))
        .collect();
    let chosen = topo
        .iter()
        .filter_map(|id| by_id.get(id.as_str()))
        .map(|&i| chapters[i].clone())
        .collect();
    (chosen, PlanOrdering::Topological)
}
