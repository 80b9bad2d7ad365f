//! Criterion benchmarks for the ALWABP search components.
//!
//! Uses seeded synthetic instances: random worker times with some
//! infeasible pairs (worker 0 can do everything) and a sparse forward
//! precedence graph.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_alwabp::instance::{Instance, INFEASIBLE};
use u_alwabp::neighborhood::Neighborhood;
use u_alwabp::replication::{ReplicationConfig, ReplicationManager};
use u_alwabp::search::{local_search, LocalSearchPolicy};
use u_alwabp::solution::build_initial;
use u_alwabp::vns::VnsConfig;

fn synthetic(tasks: usize, workers: usize, seed: u64) -> Instance {
    let mut rng = StdRng::seed_from_u64(seed);
    let times: Vec<Vec<f64>> = (0..workers)
        .map(|w| {
            (0..tasks)
                .map(|_| {
                    if w > 0 && rng.random_bool(0.15) {
                        INFEASIBLE
                    } else {
                        rng.random_range(1..=20) as f64
                    }
                })
                .collect()
        })
        .collect();

    let mut precedences = Vec::new();
    for after in 1..tasks {
        for before in after.saturating_sub(4)..after {
            if rng.random_bool(0.3) {
                precedences.push((before, after));
            }
        }
    }

    Instance::new(times, precedences).expect("synthetic instance is valid")
}

fn bench_local_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("local_search");
    group.sample_size(20);

    for &(tasks, workers) in &[(20, 4), (50, 7), (100, 10)] {
        let instance = synthetic(tasks, workers, 42);
        let start = build_initial(&instance, &mut StdRng::seed_from_u64(7))
            .expect("construction succeeds");

        for nb in Neighborhood::ALL {
            group.bench_with_input(
                BenchmarkId::new(nb.name(), format!("n{tasks}_m{workers}")),
                &(&instance, &start),
                |b, (inst, s)| {
                    b.iter(|| {
                        let out = local_search(
                            black_box(inst),
                            (*s).clone(),
                            nb,
                            LocalSearchPolicy::BestImprovement,
                        );
                        black_box(out)
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_replications(c: &mut Criterion) {
    let mut group = c.benchmark_group("replications");
    group.sample_size(10);

    for &(tasks, workers) in &[(20, 4), (50, 7)] {
        let instance = synthetic(tasks, workers, 42);
        let config = ReplicationConfig::default()
            .without_time_budget()
            .with_seeds(vec![0, 1, 7])
            .with_vns(VnsConfig::default().with_max_iterations(100));
        let manager = ReplicationManager::new(config);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("n{tasks}_m{workers}")),
            &instance,
            |b, inst| {
                b.iter(|| {
                    let summary = manager.run("bench", black_box(inst));
                    black_box(summary)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_local_search, bench_replications);
criterion_main!(benches);
