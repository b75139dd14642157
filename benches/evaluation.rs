use criterion::{black_box, criterion_group, criterion_main, Criterion};
use evalexpr::{build_operator_tree, DefaultNumericTypes};
use plotix_rs::Engine;

/// Benchmark simple arithmetic expressions
fn benchmark_simple_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("Simple arithmetic Expression Evaluation");

    let engine = Engine::new();
    let expr = "2 + 3 * 4";
    let precompiled_evalexpr = build_operator_tree::<DefaultNumericTypes>(expr).unwrap();

    group.bench_function("plotix_arithmetic", |b| {
        b.iter(|| engine.evaluate_at_zero(black_box(expr)).unwrap())
    });

    group.bench_function("native_rust_arithmetic", |b| {
        b.iter(|| black_box(2.0 + 3.0 * 4.0))
    });

    group.bench_function("meval_arithmetic", |b| {
        b.iter(|| meval::eval_str(black_box(expr)).unwrap())
    });

    group.bench_function("evalexpr_arithmetic", |b| {
        b.iter(|| evalexpr::eval(black_box(expr)).unwrap())
    });

    group.bench_function("precompiled_evalexpr_arithmetic", |b| {
        b.iter(|| precompiled_evalexpr.eval().unwrap())
    });
}

/// Benchmark expressions with parentheses and built-in functions
fn benchmark_function_heavy(c: &mut Criterion) {
    let mut group = c.benchmark_group("Function-heavy Expression Evaluation");

    let engine = Engine::new();
    let expr = "sqrt(16) + abs(0 - 3) * cos(0)";
    let meval_expr = "sqrt(16) + abs(0 - 3) * cos(0)";

    group.bench_function("plotix_functions", |b| {
        b.iter(|| engine.evaluate_at_zero(black_box(expr)).unwrap())
    });

    group.bench_function("native_rust_functions", |b| {
        b.iter(|| black_box(16.0_f64.sqrt() + (0.0 - 3.0_f64).abs() * 0.0_f64.cos()))
    });

    group.bench_function("meval_functions", |b| {
        b.iter(|| meval::eval_str(black_box(meval_expr)).unwrap())
    });
}

/// Benchmark curve sampling through the plotting callback
fn benchmark_curve_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("Curve Sampling");

    let mut engine = Engine::new();
    engine.save_function("f", "x^2 - 1");
    let curve = engine.callback("f(x)");

    group.bench_function("plotix_callback_sweep", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for i in 0..100 {
                acc += curve(black_box(i as f64 / 10.0));
            }
            black_box(acc)
        })
    });

    let meval_curve = {
        let expr: meval::Expr = "x^2 - 1".parse().unwrap();
        expr.bind("x").unwrap()
    };

    group.bench_function("meval_callback_sweep", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for i in 0..100 {
                acc += meval_curve(black_box(i as f64 / 10.0));
            }
            black_box(acc)
        })
    });
}

criterion_group!(
    benches,
    benchmark_simple_arithmetic,
    benchmark_function_heavy,
    benchmark_curve_sampling,
);
criterion_main!(benches);
