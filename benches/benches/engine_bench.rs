//! # Engine Benchmarks
//!
//! Measures the classify/decide hot path for each preset.
//!
//! Run: `cargo bench --bench engine_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use air_core::prelude::*;
use air_engine::{classify, classify_value, decide, Engine, Preset, Threshold};

fn reading_for(preset: Preset) -> Reading {
    let values = preset.parameters().iter().map(|p| {
        let value = match p {
            ParameterId::Temperature => 24.0,
            ParameterId::Humidity => 55.0,
            ParameterId::Pm25 => 90.0,
            _ => 10.0,
        };
        (*p, value)
    });
    Reading::new(values).unwrap()
}

/// Limite único
fn bench_threshold(c: &mut Criterion) {
    let mut group = c.benchmark_group("threshold");

    let ceiling = Threshold::ceiling(75.0, 150.0);
    let comfort = Threshold::comfort(30.0, 70.0);
    let table = Preset::Full.thresholds();

    group.bench_function("ceiling", |b| {
        b.iter(|| black_box(ceiling.classify(black_box(120.0))))
    });

    group.bench_function("comfort", |b| {
        b.iter(|| black_box(comfort.classify(black_box(25.0))))
    });

    group.bench_function("classify_value", |b| {
        b.iter(|| black_box(classify_value(ParameterId::Co, black_box(60.0), &table)))
    });

    group.finish();
}

/// Classificação, decisão e avaliação completa por preset
fn bench_presets(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");

    for preset in Preset::ALL {
        let engine = Engine::from_preset(preset);
        let reading = reading_for(preset);
        let classification = engine.classify(&reading).unwrap();

        group.bench_with_input(BenchmarkId::new("classify", preset), &reading, |b, reading| {
            b.iter(|| black_box(classify(reading, engine.thresholds())))
        });

        group.bench_with_input(
            BenchmarkId::new("decide", preset),
            &classification,
            |b, classification| b.iter(|| black_box(decide(classification, engine.rules()))),
        );

        group.bench_with_input(BenchmarkId::new("evaluate", preset), &reading, |b, reading| {
            b.iter(|| black_box(engine.evaluate(reading)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_threshold, bench_presets);
criterion_main!(benches);
