//! Benchmarks for particle generation and the CPU spiral kernel.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use galaxy::{spiral_positions, GalaxyConfig, ParticleBuffer};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    group.sample_size(20);

    for rings in [10u32, 100] {
        let config = GalaxyConfig::new().with_ring_count(rings).with_seed(1);
        group.bench_with_input(BenchmarkId::from_parameter(rings * 1000), &config, |b, config| {
            b.iter(|| black_box(ParticleBuffer::from_config(config).unwrap()))
        });
    }

    group.finish();
}

fn bench_spiral(c: &mut Criterion) {
    let mut group = c.benchmark_group("spiral_positions");

    for rings in [10u32, 100] {
        let config = GalaxyConfig::new().with_ring_count(rings).with_seed(1);
        let buffer = ParticleBuffer::from_config(&config).unwrap();
        let params = config.spiral_params();
        group.bench_with_input(BenchmarkId::from_parameter(buffer.len()), &buffer, |b, buffer| {
            b.iter(|| black_box(spiral_positions(buffer.as_slice(), &params, black_box(0.5))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate, bench_spiral);
criterion_main!(benches);
