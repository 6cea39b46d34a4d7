//! Criterion benchmarks for lightmoji critical paths
//!
//! - Compositor: flattening layer stacks
//! - Export: compositing plus GIF encoding of whole animations
//! - Storage: serializing and restoring the session record

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lightmoji::color::Color;
use lightmoji::composition::composite_frame;
use lightmoji::export::export_animation;
use lightmoji::gif::GifFrameEncoder;
use lightmoji::models::{Animation, Frame, CANVAS_HEIGHT, CANVAS_WIDTH};
use lightmoji::storage::{from_json, to_json};
use lightmoji::studio::{Action, Studio};

// =============================================================================
// Test Data Generators
// =============================================================================

/// A frame with `layers` layers, each painted with a diagonal stripe pattern
/// and offset by its stack index.
fn make_frame(layers: usize) -> Frame {
    let mut frame = Frame::new();
    for _ in 1..layers {
        frame.add_layer();
    }
    for (i, layer) in frame.layers_mut().iter_mut().enumerate() {
        let color = Color::rgb((i * 40 % 256) as u8, 128, 255 - (i * 20 % 256) as u8);
        for y in 0..CANVAS_HEIGHT {
            for x in (y + i as u32) % 3..CANVAS_WIDTH {
                if (x + y) % 3 == 0 {
                    layer.pixels.set(x, y, color);
                }
            }
        }
        layer.set_offset(i as i32, -(i as i32));
    }
    frame
}

/// A session with `frames` frames of four painted layers each.
fn make_studio(frames: usize) -> Studio {
    let mut studio = Studio::new();
    studio.apply(Action::Stamp(lightmoji::patterns::Pattern::Heart));
    studio.apply(Action::AddLayer);
    studio.apply(Action::Stamp(lightmoji::patterns::Pattern::Text));
    for _ in 1..frames {
        studio.apply(Action::DuplicateFrame);
        let id = studio.active_layer_id().clone();
        studio.apply(Action::ShiftLayer {
            id,
            direction: lightmoji::models::ShiftDirection::Right,
            amount: 1,
        });
    }
    studio
}

fn make_animation(frames: usize, layers: usize) -> Animation {
    let mut animation = Animation::new();
    *animation.current_frame_mut() = make_frame(layers);
    for _ in 1..frames {
        let index = animation.add_frame();
        if let Ok(frame) = animation.frame_mut(index) {
            *frame = make_frame(layers);
        }
    }
    animation
}

// =============================================================================
// Compositor Benchmarks
// =============================================================================

fn bench_composite(c: &mut Criterion) {
    let mut group = c.benchmark_group("composite");

    for layers in [1usize, 4, 16] {
        let frame = make_frame(layers);
        group.throughput(Throughput::Elements((layers as u32 * CANVAS_WIDTH * CANVAS_HEIGHT) as u64));
        group.bench_with_input(BenchmarkId::new("layers", layers), &frame, |b, frame| {
            b.iter(|| composite_frame(black_box(frame)))
        });
    }

    group.finish();
}

// =============================================================================
// Export Benchmarks
// =============================================================================

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    group.sample_size(20);

    for frames in [1usize, 8, 32] {
        let animation = make_animation(frames, 4);
        group.bench_with_input(BenchmarkId::new("gif_frames", frames), &animation, |b, anim| {
            b.iter(|| {
                let mut encoder = GifFrameEncoder::new();
                export_animation(black_box(anim), &mut encoder)
            })
        });
    }

    group.finish();
}

// =============================================================================
// Storage Benchmarks
// =============================================================================

fn bench_storage(c: &mut Criterion) {
    let mut group = c.benchmark_group("storage");

    let studio = make_studio(16);
    let json = to_json(&studio).unwrap_or_default();
    group.throughput(Throughput::Bytes(json.len() as u64));

    group.bench_function("to_json_16_frames", |b| b.iter(|| to_json(black_box(&studio))));
    group.bench_function("from_json_16_frames", |b| b.iter(|| from_json(black_box(&json))));

    group.finish();
}

criterion_group!(benches, bench_composite, bench_export, bench_storage);

criterion_main!(benches);
