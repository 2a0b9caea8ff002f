// Criterion benchmarks for Hemocentros

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hemocentros::core::{distance::haversine_distance, pagination::paginate, ResultPipeline};
use hemocentros::models::{Center, ReferencePoint};

const REGIONS: [&str; 5] = ["SP", "RJ", "MG", "BA", "RS"];

fn create_center(id: usize) -> Center {
    Center {
        id: id.to_string(),
        name: format!("Hemocentro {}", id),
        region: REGIONS[id % REGIONS.len()].to_string(),
        address: String::new(),
        phone: None,
        // Spread over a box roughly the size of Brazil
        latitude: -33.0 + (id % 380) as f64 * 0.1,
        longitude: -73.0 + (id % 390) as f64 * 0.1,
    }
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(-23.5505),
                black_box(-46.6333),
                black_box(-22.9068),
                black_box(-43.1729),
            )
        });
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_recompute");

    for size in [100, 1000, 5000] {
        let centers: Vec<Center> = (0..size).map(create_center).collect();

        let mut nearby = ResultPipeline::with_default_params();
        nearby.request_nearby();
        nearby.on_location_resolved(ReferencePoint::new(-23.5505, -46.6333));

        group.bench_with_input(BenchmarkId::new("nearby", size), &centers, |b, centers| {
            b.iter(|| nearby.listing(black_box(centers)));
        });

        let mut by_region = ResultPipeline::with_default_params();
        by_region.set_region_filter("SP");

        group.bench_with_input(BenchmarkId::new("region", size), &centers, |b, centers| {
            b.iter(|| by_region.listing(black_box(centers)));
        });
    }

    group.finish();
}

fn bench_pagination(c: &mut Criterion) {
    c.bench_function("paginate", |b| {
        b.iter(|| paginate(black_box(5000), black_box(50), black_box(42)));
    });
}

criterion_group!(benches, bench_haversine_distance, bench_pipeline, bench_pagination);
criterion_main!(benches);
