use criterion::{criterion_group, criterion_main, Criterion};
use graphfit::{test::sample, FitResult, RegressionKind, RegressionModel};
use std::hint::black_box;

fn gen_sample_data(kind: RegressionKind, n: f64) -> Vec<graphfit::Point> {
    let step = 10.0 / n;
    match kind {
        RegressionKind::Exponential => sample(|x| 2.0 * (0.3 * x).exp(), 0.0, 10.0, step),
        RegressionKind::Logarithmic => sample(|x| 1.0 + 2.0 * x.ln(), step, 10.0, step),
        RegressionKind::Logistic => sample(|x| 5.0 / (1.0 + (-(x - 5.0)).exp()), 0.0, 10.0, step),
        RegressionKind::Power => sample(|x| 3.0 * x.powf(0.5), step, 10.0, step),
        RegressionKind::Sinusoidal => sample(|x| 2.0 * (0.8 * x + 0.5).sin() + 1.0, 0.0, 10.0, step),
        _ => sample(|x| 1.0 + 3.0 * x + 5.3 * x * x, 0.0, 10.0, step),
    }
}

fn fit(kind: RegressionKind, data: &[graphfit::Point]) -> FitResult {
    let mut model = RegressionModel::new(kind, data).expect("Failed to build model");
    model.set_range(0.0, 10.0).expect("Invalid range");
    model.fit().expect("Failed to fit data")
}

fn criterion_benchmark(c: &mut Criterion) {
    //
    // First we test how the polynomial solver scales with data size
    println!("Benchmarking fit vs n (Quadratic)...");
    test_criterion_group(
        c,
        "fit_vs_n",
        &[
            CriterionTestEntry::new("n=100", gen_sample_data(RegressionKind::Quadratic, 1e2)),
            CriterionTestEntry::new("n=1_000", gen_sample_data(RegressionKind::Quadratic, 1e3)),
            CriterionTestEntry::new("n=10_000", gen_sample_data(RegressionKind::Quadratic, 1e4)),
            CriterionTestEntry::new("n=100_000", gen_sample_data(RegressionKind::Quadratic, 1e5)),
        ],
        |b, data| b.iter(|| fit(RegressionKind::Quadratic, black_box(data))),
    );

    //
    // Same again for an iterative solve
    println!("Benchmarking fit vs n (Logistic)...");
    test_criterion_group(
        c,
        "iterative_fit_vs_n",
        &[
            CriterionTestEntry::new("n=100", gen_sample_data(RegressionKind::Logistic, 1e2)),
            CriterionTestEntry::new("n=1_000", gen_sample_data(RegressionKind::Logistic, 1e3)),
            CriterionTestEntry::new("n=10_000", gen_sample_data(RegressionKind::Logistic, 1e4)),
        ],
        |b, data| b.iter(|| fit(RegressionKind::Logistic, black_box(data))),
    );

    //
    // Now we compare every kind on its own data
    println!("Benchmarking fit vs kind (n=1000)...");
    let mut group = c.benchmark_group("fit_vs_kind");
    for kind in RegressionKind::ALL.into_iter().skip(1) {
        let samples = gen_sample_data(kind, 1e3);
        group.bench_function(kind.name(), |b| b.iter(|| fit(kind, black_box(&samples))));
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

struct CriterionTestEntry<V> {
    id: String,
    values: V,
}
impl<V> CriterionTestEntry<V> {
    pub fn new(id: &str, values: V) -> Self {
        Self {
            id: id.to_string(),
            values,
        }
    }
}

fn test_criterion_group<F, V>(
    c: &mut Criterion,
    id: &str,
    samples: &[CriterionTestEntry<V>],
    runner: F,
) where
    for<'a, 'b, 'c> F: Fn(&'a mut criterion::Bencher<'b>, &'c V),
{
    let mut group = c.benchmark_group(id);
    for sample in samples {
        group.bench_with_input(&sample.id, &sample.values, &runner);
    }
    group.finish();
}
