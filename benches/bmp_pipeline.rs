use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use bmp_batch_rs::image_pipeline::bmp::{decode, encode};
use bmp_batch_rs::image_pipeline::{PixelGrid, Rgb, binarize, greyscale, is_nearly_black, saturate};

fn generate_grid(width: usize, height: usize) -> PixelGrid {
    let pixels = (0..width * height)
        .map(|i| {
            let (x, y) = (i % width, i / width);
            Rgb::new(((x + y) % 256) as u8, (x % 256) as u8, (y % 256) as u8)
        })
        .collect();
    PixelGrid::from_pixels(width, height, pixels).unwrap()
}

fn benchmark_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec_by_size");

    // Odd widths exercise row padding
    let sizes = vec![
        (101, 100, "101x100"),
        (501, 500, "501x500"),
        (1001, 1000, "1001x1000"),
    ];

    for (width, height, label) in sizes {
        let grid = generate_grid(width, height);
        let bytes = encode(&grid).unwrap();

        group.bench_with_input(BenchmarkId::new("decode", label), &bytes, |b, data| {
            b.iter(|| decode(black_box(data)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("encode", label), &grid, |b, grid| {
            b.iter(|| encode(black_box(grid)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters");
    let grid = generate_grid(500, 500);

    group.bench_function("saturate", |b| {
        b.iter(|| saturate(black_box(&grid), 1.3).unwrap());
    });
    group.bench_function("greyscale", |b| {
        b.iter(|| greyscale(black_box(&grid)));
    });
    group.bench_function("binarize", |b| {
        b.iter(|| binarize(black_box(&grid), 0.5).unwrap());
    });
    group.bench_function("is_nearly_black", |b| {
        b.iter(|| is_nearly_black(black_box(&grid), 0.5).unwrap());
    });

    group.finish();
}

criterion_group!(benches, benchmark_codec, benchmark_filters);
criterion_main!(benches);
