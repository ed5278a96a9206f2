//! Benchmarks for the limit-book matching engine.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark
//! cargo bench -- single_match
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

use limit_book::{EngineConfig, MatchingEngine, Order, OrderBook, Side};

/// 50000.00000000
const BASE_PRICE: u64 = 5_000_000_000_000;

/// 1.00000000
const STEP: u64 = 100_000_000;

// ============================================================================
// HELPER FUNCTIONS - Deterministic order generation
// ============================================================================

/// Engine with `count` asks rising from `base_price` by `step`, ids 1..=count.
fn engine_with_asks(count: usize, base_price: u64, step: u64, quantity: u64) -> MatchingEngine {
    let mut engine = MatchingEngine::with_config(EngineConfig::with_capacity(count * 2));
    for i in 0..count as u64 {
        engine
            .submit_limit_order(i + 1, Side::Sell, base_price + i * step, quantity)
            .expect("populate asks");
    }
    engine
}

/// Book with `count` bids falling from `base_price` by `step`, ids starting at `first_id`.
fn populate_bids(book: &mut OrderBook, first_id: u64, count: usize, base_price: u64, step: u64, quantity: u64) {
    for i in 0..count as u64 {
        let order = Order::limit(first_id + i, Side::Buy, base_price - i * step, quantity, i);
        book.add_order(order).expect("populate bids");
    }
}

#[derive(Clone, Copy)]
struct LimitRequest {
    id: u64,
    side: Side,
    price: u64,
    quantity: u64,
}

/// Random limit orders around the base price, ±500 ticks.
fn generate_order_batch(count: usize, seed: u64) -> Vec<LimitRequest> {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    (0..count)
        .map(|i| {
            let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
            let offset: i64 = rng.gen_range(-500i64..=500);
            LimitRequest {
                id: (i + 1) as u64,
                side,
                price: (BASE_PRICE as i64 + offset * STEP as i64) as u64,
                quantity: rng.gen_range(1..=100),
            }
        })
        .collect()
}

fn run_batch(engine: &mut MatchingEngine, orders: &[LimitRequest]) -> usize {
    orders
        .iter()
        .map(|o| {
            engine
                .submit_limit_order(o.id, o.side, o.price, o.quantity)
                .map(|e| e.trades.len())
                .unwrap_or(0)
        })
        .sum()
}

// ============================================================================
// BENCHMARK: Single Match Latency
// ============================================================================

fn bench_single_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_match");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("against_1k_orders", |b| {
        b.iter_batched(
            || engine_with_asks(1000, BASE_PRICE, STEP, 10),
            |mut engine| black_box(engine.submit_limit_order(999_999, Side::Buy, BASE_PRICE, 10)),
            BatchSize::SmallInput,
        );
    });

    // Sweeps ten levels of one order each
    group.bench_function("multi_level_sweep", |b| {
        b.iter_batched(
            || engine_with_asks(100, BASE_PRICE, STEP, 10),
            |mut engine| black_box(engine.submit_limit_order(999_999, Side::Buy, BASE_PRICE + 10 * STEP, 100)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("market_sweep", |b| {
        b.iter_batched(
            || engine_with_asks(100, BASE_PRICE, STEP, 10),
            |mut engine| black_box(engine.submit_market_order(999_999, Side::Buy, 250)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("no_match_rest_on_book", |b| {
        b.iter_batched(
            || engine_with_asks(1000, BASE_PRICE, STEP, 10),
            |mut engine| black_box(engine.submit_limit_order(999_999, Side::Buy, BASE_PRICE - STEP, 10)),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Order Operations
// ============================================================================

fn bench_order_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_operations");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("add_to_empty", |b| {
        b.iter_batched(
            OrderBook::new,
            |mut book| black_box(book.add_order(Order::limit(1, Side::Buy, BASE_PRICE, 10, 0))),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("add_to_1k_book", |b| {
        b.iter_batched(
            || {
                let mut book = OrderBook::with_capacity(2000);
                populate_bids(&mut book, 1, 1000, BASE_PRICE, STEP, 10);
                book
            },
            |mut book| black_box(book.add_order(Order::limit(5000, Side::Buy, BASE_PRICE - 500 * STEP, 10, 1000))),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("cancel_order", |b| {
        b.iter_batched(
            || {
                let mut engine = MatchingEngine::new();
                for id in 1..=1000u64 {
                    engine
                        .submit_limit_order(id, Side::Buy, BASE_PRICE - (id % 50) * STEP, 10)
                        .expect("populate bids");
                }
                engine
            },
            // Middle of a shared price level
            |mut engine| black_box(engine.cancel_order(500)),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Throughput
// ============================================================================

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");
    group.measurement_time(Duration::from_secs(15));
    group.sample_size(50);

    for batch_size in [1_000, 10_000, 50_000] {
        group.throughput(Throughput::Elements(batch_size as u64));

        group.bench_with_input(BenchmarkId::new("orders", batch_size), &batch_size, |b, &size| {
            let orders = generate_order_batch(size, 42);

            b.iter_batched(
                || MatchingEngine::with_config(EngineConfig::with_capacity(size)),
                |mut engine| {
                    black_box(run_batch(&mut engine, &orders));
                    engine.resting_order_count()
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// ============================================================================
// BENCHMARK: Large Book
// ============================================================================

fn bench_large_book(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_book");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(50);

    // Add then cancel one order inside a 100k-order book
    group.bench_function("add_cancel_in_100k_book", |b| {
        let mut book = OrderBook::with_capacity(100_001);
        populate_bids(&mut book, 1, 50_000, BASE_PRICE - STEP, 1_000, 10);
        for i in 0..50_000u64 {
            let order = Order::limit(50_001 + i, Side::Sell, BASE_PRICE + i * 1_000, 10, 50_000 + i);
            book.add_order(order).expect("populate asks");
        }

        let mut sequence = 100_000u64;
        b.iter(|| {
            sequence += 1;
            let order = Order::limit(999_999, Side::Buy, BASE_PRICE - STEP - 25_000 * 1_000, 10, sequence);
            black_box(book.add_order(order).expect("id is free"));
            black_box(book.cancel_order(999_999))
        });
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Determinism Verification
// ============================================================================

fn bench_determinism(c: &mut Criterion) {
    let mut group = c.benchmark_group("determinism");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("1k_sequence_with_state_root", |b| {
        let orders = generate_order_batch(1000, 12345);

        b.iter(|| {
            let mut engine = MatchingEngine::with_config(EngineConfig::with_capacity(2000));
            let trade_count = run_batch(&mut engine, &orders);
            black_box((trade_count, engine.state_root()))
        });
    });

    group.finish();
}

// ============================================================================
// CRITERION ENTRY POINT
// ============================================================================

criterion_group!(
    benches,
    bench_single_match,
    bench_order_operations,
    bench_throughput,
    bench_large_book,
    bench_determinism
);

criterion_main!(benches);
