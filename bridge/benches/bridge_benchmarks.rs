//! Performance benchmarks for the Kitten bridge
//!
//! Run with: cargo bench
//! Or for specific benchmarks: cargo bench -- <filter>

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kitten_bridge::core::audio::{self, PcmBuffer, ToneConfig};
use kitten_bridge::core::dispatcher::{Dispatcher, DispatcherConfig};
use kitten_bridge::core::model::{ModelAdapter, ModelConfig};
use kitten_bridge::core::request::SynthesisRequest;
use std::sync::Arc;
use std::time::Duration;

/// Benchmark placeholder tone generation at common output rates
fn bench_tone_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("tone_synthesis");
    group.measurement_time(Duration::from_secs(5));

    let tone = ToneConfig::default();
    for sample_rate in [16000u32, 24000, 48000] {
        // Longest placeholder clip
        group.throughput(Throughput::Elements((sample_rate as f64 * 2.5) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(sample_rate),
            &sample_rate,
            |b, &rate| {
                b.iter(|| audio::synthesize(black_box(rate), black_box(2.5), &tone));
            },
        );
    }

    group.finish();
}

/// Benchmark WAV encoding of 16-bit PCM
fn bench_wav_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("wav_encoding");

    for seconds in [1usize, 10] {
        let samples: Vec<f32> = (0..24000 * seconds)
            .map(|i| ((i as f32) * 0.01).sin() * 0.5)
            .collect();
        let pcm = PcmBuffer::from_f32(&samples, 24000);

        group.throughput(Throughput::Bytes((pcm.len() * 2) as u64));
        group.bench_with_input(BenchmarkId::new("seconds", seconds), &pcm, |b, pcm| {
            b.iter(|| audio::encode(black_box(pcm)));
        });
    }

    group.finish();
}

/// Benchmark float to PCM conversion
fn bench_pcm_conversion(c: &mut Criterion) {
    let samples: Vec<f32> = (0..24000).map(|i| ((i as f32) * 0.001).sin() * 1.2).collect();

    c.bench_function("pcm_from_f32_1s", |b| {
        b.iter(|| PcmBuffer::from_f32(black_box(&samples), 24000));
    });
}

/// Benchmark the full placeholder request path
fn bench_placeholder_dispatch(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let dispatcher = Dispatcher::new(
        DispatcherConfig::default(),
        Arc::new(ModelAdapter::new(ModelConfig::default())),
    );
    let request = SynthesisRequest::new("Hola, esto es una prueba del puente de voz.");

    c.bench_function("placeholder_dispatch", |b| {
        b.to_async(&runtime)
            .iter(|| async { dispatcher.handle(black_box(&request)).await });
    });
}

criterion_group!(
    benches,
    bench_tone_synthesis,
    bench_wav_encoding,
    bench_pcm_conversion,
    bench_placeholder_dispatch,
);
criterion_main!(benches);
