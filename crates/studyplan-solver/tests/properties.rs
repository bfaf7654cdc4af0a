use std::collections::{HashMap, HashSet};

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::DiGraph;
use proptest::prelude::*;
use studyplan_core::Chapter;
use studyplan_solver::{
    Adjacency, NoopObserver, SearchOptions, SearchStrategy, build_adjacency, detect_cycle,
    exact_subset_search_with, topological_sort, transitive_prereqs,
};

const MAX_CHAPTERS: usize = 8;

/// Chapters `c0..cN`. Prerequisite `k` names `c{k}`; indices `>= N` are
/// dangling. With `acyclic`, chapter `i` only depends on lower indices or on
/// dangling ids.
fn arb_chapters(acyclic: bool) -> impl Strategy<Value = Vec<Chapter>> {
    (0..=MAX_CHAPTERS).prop_flat_map(move |n| {
        prop::collection::vec(
            (
                1_u32..60,
                0_u32..20,
                prop::collection::vec(0..n + 2, 0..3),
            ),
            n,
        )
        .prop_map(move |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (minutes, value, prereqs))| {
                    let prereqs: Vec<String> = prereqs
                        .into_iter()
                        .filter(|&k| !acyclic || k < i || k >= n)
                        .map(|k| format!("c{k}"))
                        .collect();
                    let refs: Vec<&str> = prereqs.iter().map(String::as_str).collect();
                    Chapter::new(format!("c{i}"), minutes, f64::from(value) / 2.0, &refs)
                })
                .collect()
        })
    })
}

fn to_petgraph(adj: &Adjacency) -> DiGraph<String, ()> {
    let mut graph = DiGraph::new();
    let nodes: HashMap<&str, _> = adj
        .ids()
        .iter()
        .map(|id| (id.as_str(), graph.add_node(id.clone())))
        .collect();
    for (from, to) in adj.edges() {
        graph.add_edge(nodes[from], nodes[to], ());
    }
    graph
}

fn sequential() -> SearchOptions {
    SearchOptions::default()
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn every_id_is_a_key(chapters in arb_chapters(false)) {
        let adj = build_adjacency(&chapters);
        for ch in &chapters {
            prop_assert!(adj.contains(&ch.id));
            for pre in &ch.prerequisites {
                prop_assert!(adj.contains(pre));
            }
        }
    }

    #[test]
    fn no_prerequisites_means_empty_closure(chapters in arb_chapters(true)) {
        let adj = build_adjacency(&chapters);
        let closure = transitive_prereqs(&adj);
        for ch in chapters.iter().filter(|c| c.prerequisites.is_empty()) {
            prop_assert!(closure[&ch.id].is_empty());
        }
    }

    #[test]
    fn acyclic_input_reports_no_cycle(chapters in arb_chapters(true)) {
        let adj = build_adjacency(&chapters);
        let check = detect_cycle(&adj);
        prop_assert!(!check.has_cycle);
        prop_assert!(check.cycle.is_empty());
    }

    #[test]
    fn cycle_detection_agrees_with_petgraph(chapters in arb_chapters(false)) {
        let adj = build_adjacency(&chapters);
        let check = detect_cycle(&adj);
        prop_assert_eq!(check.has_cycle, is_cyclic_directed(&to_petgraph(&adj)));

        if check.has_cycle {
            prop_assert!(check.cycle.len() >= 2);
            prop_assert_eq!(check.cycle.first(), check.cycle.last());
            for pair in check.cycle.windows(2) {
                prop_assert!(adj.contains_edge(&pair[0], &pair[1]));
            }
        }
    }

    #[test]
    fn topological_order_is_valid_permutation(chapters in arb_chapters(false)) {
        let adj = build_adjacency(&chapters);
        let order = topological_sort(&adj);
        let cyclic = detect_cycle(&adj).has_cycle;

        if order.is_empty() {
            prop_assert!(cyclic || adj.is_empty());
        } else {
            prop_assert!(!cyclic);
            prop_assert_eq!(order.len(), adj.len());
            let position: HashMap<&str, usize> =
                order.iter().enumerate().map(|(i, id)| (id.as_str(), i)).collect();
            prop_assert_eq!(position.len(), adj.len());
            for (from, to) in adj.edges() {
                prop_assert!(position[from] < position[to]);
            }
        }
    }

    #[test]
    fn chosen_chapters_are_feasible(chapters in arb_chapters(true), budget in 0_u64..200) {
        let adj = build_adjacency(&chapters);
        let plan = exact_subset_search_with(&chapters, budget, &adj, &sequential(), &NoopObserver);
        let closure = transitive_prereqs(&adj);

        let chosen: HashSet<&str> = plan.chosen_ids().into_iter().collect();
        prop_assert_eq!(chosen.len(), plan.chosen.len());

        let total: u64 = plan.chosen.iter().map(|c| u64::from(c.time_minutes)).sum();
        prop_assert_eq!(total, plan.best_time);
        prop_assert!(plan.best_time <= budget);

        let value: f64 = plan.chosen.iter().map(|c| c.score_value).sum();
        prop_assert!((value - plan.best_value).abs() < 1e-9);

        for ch in &plan.chosen {
            for ancestor in &closure[&ch.id] {
                prop_assert!(chosen.contains(ancestor.as_str()), "{} lacks {}", ch.id, ancestor);
            }
        }
    }

    #[test]
    fn chosen_order_puts_prerequisites_first(chapters in arb_chapters(true), budget in 0_u64..300) {
        let adj = build_adjacency(&chapters);
        let plan = exact_subset_search_with(&chapters, budget, &adj, &sequential(), &NoopObserver);
        let position: HashMap<&str, usize> =
            plan.chosen_ids().into_iter().enumerate().map(|(i, id)| (id, i)).collect();

        for ch in &plan.chosen {
            for pre in &ch.prerequisites {
                prop_assert!(position[pre.as_str()] < position[ch.id.as_str()]);
            }
        }
    }

    #[test]
    fn best_value_monotone_in_budget(chapters in arb_chapters(true), budget in 0_u64..200, extra in 0_u64..100) {
        let adj = build_adjacency(&chapters);
        let low = exact_subset_search_with(&chapters, budget, &adj, &sequential(), &NoopObserver);
        let high = exact_subset_search_with(&chapters, budget + extra, &adj, &sequential(), &NoopObserver);
        prop_assert!(high.best_value >= low.best_value);
    }

    #[test]
    fn parallel_search_matches_sequential(chapters in arb_chapters(false), budget in 0_u64..250) {
        let adj = build_adjacency(&chapters);
        let parallel = SearchOptions { strategy: SearchStrategy::Parallel };
        let seq = exact_subset_search_with(&chapters, budget, &adj, &sequential(), &NoopObserver);
        let par = exact_subset_search_with(&chapters, budget, &adj, &parallel, &NoopObserver);
        prop_assert_eq!(seq, par);
    }
}

#[test]
fn chain_scenario() {
    let chapters = vec![
        Chapter::new("A", 10, 1.0, &[]),
        Chapter::new("B", 20, 2.0, &["A"]),
        Chapter::new("C", 30, 3.0, &["B"]),
    ];
    let adj = build_adjacency(&chapters);
    assert!(adj.contains("A") && adj.contains("B") && adj.contains("C"));
    assert!(!detect_cycle(&adj).has_cycle);
    assert_eq!(topological_sort(&adj), vec!["A", "B", "C"]);

    let closure = transitive_prereqs(&adj);
    let expected: std::collections::BTreeSet<String> =
        ["A", "B"].iter().map(ToString::to_string).collect();
    assert_eq!(closure["C"], expected);
}

#[test]
fn three_cycle_scenario() {
    let chapters = vec![
        Chapter::new("X", 10, 1.0, &["Z"]),
        Chapter::new("Y", 20, 2.0, &["X"]),
        Chapter::new("Z", 30, 3.0, &["Y"]),
    ];
    let check = detect_cycle(&build_adjacency(&chapters));
    assert!(check.has_cycle);
    assert!(check.cycle.len() >= 2);
}
