#![allow(missing_docs)]
//! Benchmarks for chunk generation.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use terra_core::chunk::{ChunkGenerator, ChunkGeneratorKind, ChunkPos};
use terra_core::config::{CaveSettings, GeneratorType, TerraConfig};
use terra_utils::noise::KernelType;

const SEED: u64 = 12345;

fn config(kernel: KernelType, caves: bool) -> TerraConfig {
    let mut config = TerraConfig {
        kernel,
        ..TerraConfig::default()
    };
    if caves {
        config.terrain.caves = Some(CaveSettings {
            zoom: 16.0,
            threshold: 0.55,
        });
    }
    config
}

fn bench_noise_chunk(c: &mut Criterion) {
    let mut group = c.benchmark_group("noise_chunk");

    for kernel in KernelType::ALL {
        let Ok(generator) = ChunkGeneratorKind::from_config(&config(kernel, false), SEED) else {
            continue;
        };
        group.bench_function(BenchmarkId::from_parameter(kernel), |b| {
            b.iter(|| black_box(generator.generate(black_box(ChunkPos::new(3, -5)))));
        });
    }
    group.finish();
}

fn bench_noise_chunk_with_caves(c: &mut Criterion) {
    let Ok(generator) = ChunkGeneratorKind::from_config(&config(KernelType::PerlinImproved, true), SEED)
    else {
        return;
    };

    // Benchmark at different chunk positions to see variance
    let mut group = c.benchmark_group("noise_chunk_caves");
    for (x, z) in [(0, 0), (100, 100), (1000, 1000)] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{x},{z}")),
            &ChunkPos::new(x, z),
            |b, &pos| b.iter(|| black_box(generator.generate(pos))),
        );
    }
    group.finish();
}

fn bench_flat_chunk(c: &mut Criterion) {
    let mut config = TerraConfig::default();
    config.generator = GeneratorType::Flat;
    let Ok(generator) = ChunkGeneratorKind::from_config(&config, SEED) else {
        return;
    };

    c.bench_function("flat_chunk", |b| {
        b.iter(|| black_box(generator.generate(black_box(ChunkPos::new(0, 0)))));
    });
}

criterion_group!(
    benches,
    bench_noise_chunk,
    bench_noise_chunk_with_caves,
    bench_flat_chunk
);
criterion_main!(benches);
