#[macro_use]
extern crate criterion;

use criterion::Criterion;
use keccak_tools_trails::{
    search,
    SearchParams,
    TrailKind,
};
use std::time::Duration;

fn search_benchmark(c: &mut Criterion) {
    for kind in [TrailKind::Differential, TrailKind::Linear].iter().copied() {
        let params = match SearchParams::builder(kind).lane_size(8).rounds(3).build() {
            Ok(params) => params,
            Err(_) => return,
        };
        c.bench_function(&format!("Run {} search (200, 3 rounds)", kind), move |b| {
            b.iter(|| search(&params))
        });
    }

    let mut group = c.benchmark_group("Run search (1600, 3 rounds)");
    group.sample_size(10).measurement_time(Duration::from_millis(10000));
    for kind in [TrailKind::Differential, TrailKind::Linear].iter().copied() {
        if let Ok(params) = SearchParams::builder(kind).build() {
            group.bench_function(kind.to_string(), |b| b.iter(|| search(&params)));
        }
    }
    group.finish();
}

criterion_group!(benches, search_benchmark);
criterion_main!(benches);
