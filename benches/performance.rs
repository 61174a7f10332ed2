// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for STICKWORK
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Pattern derivation and naming throughput
//! - Scheduler fill-pass cost
//! - Click rendering in the audio callback path

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use stickwork::audio::{Click, ClickMixer};
use stickwork::engine::LookaheadScheduler;
use stickwork::pattern;
use stickwork::timing::{ClickPolicy, Meter, Subdivision, TimeSignature};

/// Benchmark pattern derivation and display naming
fn bench_pattern_arithmetic(c: &mut Criterion) {
    c.bench_function("pattern_at", |b| {
        b.iter(|| {
            let p = pattern::pattern_at(black_box(0xA5A5), black_box(16));
            black_box(p.id())
        })
    });

    c.bench_function("display_name", |b| {
        let p = pattern::pattern_at(0b01010101, 8);
        b.iter(|| black_box(pattern::display_name(black_box(&p))))
    });

    c.bench_function("normalize_index", |b| {
        b.iter(|| black_box(pattern::normalize_index(black_box(-987654), black_box(16))))
    });
}

/// Benchmark one scheduling pass across subdivisions
fn bench_scheduler_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("scheduler_fill");

    for subdivision in [
        Subdivision::QuarterNote,
        Subdivision::SixteenthNote,
        Subdivision::Sextuplet,
    ] {
        group.bench_with_input(
            BenchmarkId::new("fill", subdivision.name()),
            &subdivision,
            |b, &subdivision| {
                let meter = Meter {
                    subdivision,
                    signature: TimeSignature::FourFour,
                    two_measure: true,
                };
                b.iter(|| {
                    let mut plan = LookaheadScheduler::new(0.1);
                    plan.reset(0.0);
                    let mut count = 0;
                    for step in 0..40 {
                        let now = step as f64 * 0.025;
                        count += plan
                            .fill(now, 300.0, &meter, ClickPolicy::EveryNote)
                            .len();
                    }
                    black_box(count)
                })
            },
        );
    }

    group.finish();
}

/// Benchmark mixing clicks into an output buffer
fn bench_click_render(c: &mut Criterion) {
    c.bench_function("click_render_512", |b| {
        b.iter(|| {
            let mut mixer = ClickMixer::new(44100);
            for i in 0..8 {
                mixer.schedule(Click {
                    at_secs: i as f64 * 0.001,
                    frequency: 880.0,
                    gain: 1.0,
                });
            }
            let mut buffer = vec![0.0f32; 512 * 2];
            mixer.render(&mut buffer, 2, 0);
            black_box(buffer[0])
        })
    });
}

criterion_group!(
    benches,
    bench_pattern_arithmetic,
    bench_scheduler_fill,
    bench_click_render
);
criterion_main!(benches);
