use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use genroute::{
    evolution::EvolutionOptions,
    tsp::{self, Point, TspInstance},
};

fn grid(side: usize) -> TspInstance {
    let cities = (0..side * side)
        .map(|i| Point::new((i % side) as f64 * 10.0, (i / side) as f64 * 10.0))
        .collect();
    TspInstance::new("grid", cities).unwrap()
}

// Trials run on the rayon pool; the sequential variant forces a single thread.
fn bench_trials(c: &mut Criterion) {
    let instance = Arc::new(grid(5));
    let options = EvolutionOptions::new(50, 0.02, 0.7, 100);
    let launcher = tsp::launcher(instance, &options);

    let mut group = c.benchmark_group("trials");
    group.sample_size(10);
    for trials in [1, 4, 8].iter() {
        group.bench_with_input(BenchmarkId::new("parallel", trials), trials, |b, &trials| {
            b.iter(|| {
                launcher
                    .run_trials(black_box(&options), trials, 42)
                    .unwrap()
            })
        });

        let single = rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap();
        group.bench_with_input(BenchmarkId::new("sequential", trials), trials, |b, &trials| {
            b.iter(|| {
                single.install(|| {
                    launcher
                        .run_trials(black_box(&options), trials, 42)
                        .unwrap()
                })
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_trials);
criterion_main!(benches);
