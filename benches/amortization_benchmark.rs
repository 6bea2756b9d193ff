use criterion::{black_box, criterion_group, criterion_main, Criterion};
use repayment_engine::amortization::{calculate_emi, generate_amortization, reverse_emi_rate};
use repayment_engine::simulation::{generate_random_portfolio, PortfolioConfig};
use repayment_engine::strategy::strategy_for;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

fn bench_calculate_emi(c: &mut Criterion) {
    c.bench_function("calculate_emi_240_months", |b| {
        b.iter(|| {
            calculate_emi(
                black_box(dec!(5_000_000)),
                black_box(dec!(8.5)),
                black_box(240),
            )
        })
    });
}

fn bench_schedule_360_months(c: &mut Criterion) {
    let lumps = BTreeMap::new();
    c.bench_function("schedule_360_months", |b| {
        b.iter(|| {
            generate_amortization(
                black_box(dec!(10_000_000)),
                black_box(dec!(9.0)),
                black_box(360),
                black_box(dec!(10_000)),
                black_box(&lumps),
            )
        })
    });
}

fn bench_rate_solver(c: &mut Criterion) {
    c.bench_function("reverse_emi_rate_bisection", |b| {
        b.iter(|| {
            reverse_emi_rate(
                black_box(dec!(5_000_000)),
                black_box(dec!(43_391)),
                black_box(240),
                black_box(dec!(0.01)),
            )
        })
    });
}

fn bench_smart_hybrid_10_loans(c: &mut Criterion) {
    let config = PortfolioConfig {
        loan_count: 10,
        ..Default::default()
    };
    let portfolio = generate_random_portfolio(&config);
    let strategy = strategy_for("smart_hybrid", dec!(0.30)).unwrap();

    c.bench_function("smart_hybrid_10_loans", |b| {
        b.iter(|| strategy.allocate(black_box(&portfolio), black_box(dec!(100_000))))
    });
}

fn bench_smart_hybrid_100_loans(c: &mut Criterion) {
    let config = PortfolioConfig {
        loan_count: 100,
        ..Default::default()
    };
    let portfolio = generate_random_portfolio(&config);
    let strategy = strategy_for("smart_hybrid", dec!(0.30)).unwrap();

    c.bench_function("smart_hybrid_100_loans", |b| {
        b.iter(|| strategy.allocate(black_box(&portfolio), black_box(dec!(1_000_000))))
    });
}

criterion_group!(
    benches,
    bench_calculate_emi,
    bench_schedule_360_months,
    bench_rate_solver,
    bench_smart_hybrid_10_loans,
    bench_smart_hybrid_100_loans
);
criterion_main!(benches);
