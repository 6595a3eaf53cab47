//! Palette quantizer benchmarks.

use blockpal::palette::{map_to_palette, samples};
use blockpal::quantizer::{generalized_lloyd, median_cut};
use blockpal::{LloydOptions, PixelBuffer};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn noisy_gradient(width: u32, height: u32, mut seed: u32) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |x, y| {
        seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
        let jitter = seed >> 28;
        let r = ((x * 255) / width + jitter).min(255) as u8;
        let g = ((y * 255) / height + jitter).min(255) as u8;
        let b = (((x + y) * 127) / (width + height)) as u8;
        [r, g, b, 255]
    })
    .unwrap()
}

fn bench_quantizers(c: &mut Criterion) {
    let img = noisy_gradient(96, 96, 0xC0FFEE);
    let points = samples(&img);

    let mut group = c.benchmark_group("quantize_96x96");
    group.throughput(Throughput::Elements(points.len() as u64));
    group.sample_size(10);

    for depth in [2u32, 4] {
        group.bench_with_input(BenchmarkId::new("median_cut", 1 << depth), &depth, |b, &d| {
            b.iter(|| median_cut(black_box(&points), d).unwrap())
        });
    }
    for size in [4usize, 16] {
        group.bench_with_input(BenchmarkId::new("lloyd", size), &size, |b, &k| {
            b.iter(|| generalized_lloyd(black_box(&points), k, &LloydOptions::default()).unwrap())
        });
    }
    group.finish();

    let book = median_cut(&points, 4).unwrap();
    c.bench_function("map_to_palette_16", |b| {
        b.iter(|| map_to_palette(black_box(&img), &book))
    });
}

criterion_group!(benches, bench_quantizers);
criterion_main!(benches);
