//! Benchmarks for the I-VT classification pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gaze_core::{EyeChannel, Recording, Sample};
use gaze_ivt::config::IvtConfig;
use gaze_ivt::pipeline::IvtPipeline;
use gaze_ivt::smoother::StateSmoother;
use gaze_ivt::velocity::VelocityClassifier;

/// Drifting gaze with a short gap every 97 frames and a blink every 293
fn create_test_recording(n_samples: usize) -> Recording {
    let samples = (0..n_samples)
        .map(|i| {
            let t = i as f64;
            let left = if i % 293 < 8 || i % 97 == 0 {
                EyeChannel::missing()
            } else {
                let jump = ((i / 40) % 5) as f64 * 0.15;
                EyeChannel::valid(0.2 + jump + (t * 0.01).sin() * 0.002, 0.5 + (t * 0.013).cos() * 0.002)
            };
            Sample::new(format!("{i}"), left, EyeChannel::missing())
        })
        .collect();

    Recording::new("bench", samples)
}

fn benchmark_pipeline(c: &mut Criterion) {
    let pipeline = IvtPipeline::new(IvtConfig::default()).unwrap();

    // One minute, ten minutes and one hour at 60 Hz
    let minute = create_test_recording(3_600);
    let ten_minutes = create_test_recording(36_000);
    let hour = create_test_recording(216_000);

    c.bench_function("process_1min", |b| b.iter(|| pipeline.process(black_box(&minute))));

    c.bench_function("process_10min", |b| {
        b.iter(|| pipeline.process(black_box(&ten_minutes)))
    });

    c.bench_function("process_1h", |b| b.iter(|| pipeline.process(black_box(&hour))));
}

fn benchmark_velocity(c: &mut Criterion) {
    let config = IvtConfig::default();
    let classifier = VelocityClassifier::new(
        config.screen,
        config.sampling_rate_hz,
        config.saccade_threshold_deg_s,
    );
    let recording = create_test_recording(36_000);

    c.bench_function("velocities_10min", |b| {
        b.iter(|| classifier.velocities(black_box(&recording.samples), gaze_core::Eye::Left))
    });
}

fn benchmark_smoothing(c: &mut Criterion) {
    let smoother = StateSmoother::new();
    let pipeline = IvtPipeline::new(IvtConfig::default()).unwrap();
    let states: Vec<_> = pipeline
        .process(&create_test_recording(36_000))
        .unwrap()
        .states()
        .collect();

    c.bench_function("smooth_10min", |b| {
        b.iter(|| {
            let mut s = states.clone();
            smoother.smooth(black_box(&mut s));
            s
        })
    });
}

criterion_group!(benches, benchmark_pipeline, benchmark_velocity, benchmark_smoothing);
criterion_main!(benches);
