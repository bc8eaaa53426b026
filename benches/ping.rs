//! Ping throughput benchmarks
//!
//! Compares the bare counter against the full C boundary (handle lookup,
//! lock, callback dispatch).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pingpong::ffi::{ping_pong_free, ping_pong_new, ping_pong_ping, ping_pong_set_callback};
use pingpong::{HandleTable, PingPong, PongFn};

extern "C" fn sink(value: i32) {
    black_box(value);
}

fn bench_core_ping(c: &mut Criterion) {
    let mut group = c.benchmark_group("core");

    for trigger in [0, 1, 3, 1024].iter() {
        group.bench_with_input(BenchmarkId::new("ping", trigger), trigger, |b, &trigger| {
            let mut pp: PingPong = PingPong::new(0, trigger);
            pp.set_callback(Some(sink as PongFn));
            b.iter(|| black_box(pp.ping()));
        });
    }

    group.finish();
}

fn bench_boundary_ping(c: &mut Criterion) {
    let handle = ping_pong_new(0, 3);
    ping_pong_set_callback(handle, Some(sink));

    c.bench_function("boundary/ping", |b| {
        b.iter(|| ping_pong_ping(black_box(handle)));
    });

    ping_pong_free(handle);
}

fn bench_handle_churn(c: &mut Criterion) {
    c.bench_function("table/insert_remove", |b| {
        let mut table = HandleTable::with_capacity(16);
        b.iter(|| {
            if let Ok(handle) = table.insert(PingPong::new(0, 1)) {
                black_box(table.remove(handle).ok());
            }
        });
    });
}

criterion_group!(benches, bench_core_ping, bench_boundary_ping, bench_handle_churn);
criterion_main!(benches);
