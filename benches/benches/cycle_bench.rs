//! # Cycle Benchmarks
//!
//! Measures one full monitor cycle (acquire, evaluate, apply) without the
//! scheduler wait, and the analog conditioning step on its own.
//!
//! Run: `cargo bench --bench cycle_bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use air_actuator::ActuatorBank;
use air_core::prelude::*;
use air_engine::{Engine, Preset};
use air_environment::{PanelConfig, RawSample, SignalConditioner, SimulatedPanel};
use air_orchestration::Monitor;

/// Condicionamento de uma amostra bruta do painel
fn bench_conditioning(c: &mut Criterion) {
    let mut group = c.benchmark_group("conditioning");

    let parameters = Preset::Full.parameters();
    let conditioner = SignalConditioner::factory(parameters);
    let raw = RawSample::new(1)
        .analog(ParameterId::Pm25, 2048)
        .analog(ParameterId::Pm10, 1024)
        .analog(ParameterId::Co, 512)
        .analog(ParameterId::No2, 100)
        .analog(ParameterId::O3, 100)
        .analog(ParameterId::So2, 100)
        .direct(ParameterId::Temperature, f32::NAN)
        .direct(ParameterId::Humidity, 48.0);

    group.bench_function("full_with_fallback", |b| {
        b.iter(|| black_box(conditioner.condition(&raw, parameters)))
    });

    group.finish();
}

/// Ciclo completo sobre o painel simulado em modo sweep
fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("monitor");

    let panel = SimulatedPanel::with_config(PanelConfig::default().with_sweep(true)).unwrap();
    let mut monitor = Monitor::new(
        "bench",
        panel,
        Engine::from_preset(Preset::Full),
        ActuatorBank::leds(),
    )
    .unwrap();

    group.bench_function("tick_sweep", |b| b.iter(|| black_box(monitor.tick())));

    group.finish();
}

criterion_group!(benches, bench_conditioning, bench_tick);
criterion_main!(benches);
