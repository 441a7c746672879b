use criterion::{
    criterion_group, criterion_main, AxisScale, BatchSize, BenchmarkId, Criterion,
    PlotConfiguration,
};
use rand::{thread_rng, Rng};

use glam::DVec2;
use orrery::prelude::*;

fn random_bodies(i: usize) -> Vec<Body> {
    let mut rng = thread_rng();
    let mut gen = |range| rng.gen_range(range);

    (0..i)
        .map(|n| {
            let position = DVec2::new(gen(-AU..AU), gen(-AU..AU));
            let velocity = DVec2::new(gen(-3e4..3e4), gen(-3e4..3e4));
            let mass = gen(1e20..1e25);

            Body::new(format!("body {n}"), position, mass, 1.0, Color::WHITE)
                .and_then(|body| body.with_velocity(velocity))
                .unwrap()
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Orrery");
    group
        .plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic))
        .warm_up_time(std::time::Duration::from_secs(1))
        .sample_size(50);

    for i in (1..=10).map(|i| 2_usize.pow(i)) {
        let bodies = random_bodies(i);

        group.bench_with_input(BenchmarkId::new("BruteForce", i), &bodies, |b, input| {
            b.iter(|| BruteForce(NewtonianForce::unchecked(G)).compute(input.as_slice()))
        });

        for (name, update_order) in [
            ("tick::TwoPhase", UpdateOrder::TwoPhase),
            ("tick::Sequential", UpdateOrder::Sequential),
        ] {
            let parameters = Parameters {
                update_order,
                history: HistoryLimit::Bounded(16),
                ..Default::default()
            };
            let simulation = Simulation::with_bodies(parameters, bodies.clone()).unwrap();

            group.bench_with_input(BenchmarkId::new(name, i), &simulation, |b, input| {
                b.iter_batched_ref(
                    || input.clone(),
                    |simulation| simulation.tick().unwrap(),
                    BatchSize::SmallInput,
                )
            });
        }
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
