use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use studyplan_core::Chapter;
use studyplan_solver::{
    NoopObserver, SearchOptions, SearchStrategy, build_adjacency, exact_subset_search_with,
};

/// A layered curriculum: each chapter depends on one or two chapters from
/// earlier layers, with a dangling prerequisite every seventh chapter.
fn curriculum(n: usize) -> Vec<Chapter> {
    (0..n)
        .map(|i| {
            let mut prereqs: Vec<String> = Vec::new();
            if i >= 3 {
                prereqs.push(format!("c{}", i / 3));
            }
            if i >= 5 && i % 2 == 0 {
                prereqs.push(format!("c{}", i - 4));
            }
            if i % 7 == 6 {
                prereqs.push("external".to_string());
            }
            let refs: Vec<&str> = prereqs.iter().map(String::as_str).collect();
            let minutes = u32::try_from(30 + (i * 17) % 90).unwrap_or(60);
            let value = f64::from(u32::try_from(1 + (i * 7) % 11).unwrap_or(1));
            Chapter::new(format!("c{i}"), minutes, value, &refs)
        })
        .collect()
}

fn bench_subset_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("subset_search");
    group.sample_size(10);

    for n in [12_usize, 16, 18] {
        let chapters = curriculum(n);
        let adj = build_adjacency(&chapters);
        let budget = 60 * n as u64 / 2;

        for strategy in [SearchStrategy::Sequential, SearchStrategy::Parallel] {
            let options = SearchOptions { strategy };
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}").to_lowercase(), n),
                &chapters,
                |b, chapters| {
                    b.iter(|| {
                        black_box(exact_subset_search_with(
                            chapters,
                            budget,
                            &adj,
                            &options,
                            &NoopObserver,
                        ))
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_subset_search);
criterion_main!(benches);
