//! Layout benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dom::IntrinsicContent;
use layout::{BreakpointResolver, ColumnBalancer};
use portfolio::scene::SceneItem;
use portfolio::{DocumentHost, Masonry, MasonryConfig, Scene};

fn heights(count: usize) -> Vec<f32> {
    // Deterministic spread between 60 and 300.
    let mut state: u32 = 0x9e37_79b9;
    (0..count)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            60.0 + (state >> 8) as f32 % 240.0
        })
        .collect()
}

fn scene(count: usize) -> Scene {
    let tags = ["web", "print", "brand"];
    Scene {
        container_width: 1280.0,
        filters: vec!["*".to_string(), ".web".to_string()],
        items: heights(count)
            .into_iter()
            .enumerate()
            .map(|(i, height)| SceneItem {
                id: None,
                tags: vec![tags[i % tags.len()].to_string()],
                content: IntrinsicContent::Fixed { height },
                images: Vec::new(),
            })
            .collect(),
    }
}

/// Benchmark the balancing pass alone.
fn bench_balance(c: &mut Criterion) {
    let mut group = c.benchmark_group("balance");
    let resolver = BreakpointResolver::new(20.0, None);

    for count in [10, 100, 1000] {
        let heights = heights(count);
        let balancer = ColumnBalancer::new(resolver.resolve(1280.0), 20.0);
        group.bench_with_input(BenchmarkId::from_parameter(count), &heights, |b, heights| {
            b.iter(|| black_box(balancer.balance_heights(black_box(heights))))
        });
    }

    group.finish();
}

/// Benchmark a full filter change through the engine.
fn bench_arrange(c: &mut Criterion) {
    let mut group = c.benchmark_group("arrange");

    for count in [10, 100, 500] {
        let doc = scene(count).build();
        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            b.iter(|| {
                let host = DocumentHost::new(doc.tree.clone(), Some(doc.container));
                let mut engine = Masonry::new(host, MasonryConfig::default())
                    .expect("default config is valid");
                engine.arrange(".web");
                engine.run_until_idle();
                black_box(engine.layout_passes())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_balance, bench_arrange);
criterion_main!(benches);
