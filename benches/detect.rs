use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_pdf417::tools::synthetic::{SymbolSpec, render, rotate_180};
use rust_pdf417::{BitMatrix, DetectOptions, detect, detect_batch};

fn symbol(data_columns: usize, module_px: usize) -> BitMatrix {
    render(&SymbolSpec {
        data_columns,
        module_px,
        ..SymbolSpec::default()
    })
}

fn bench_detect_small(c: &mut Criterion) {
    let image = symbol(2, 2);
    c.bench_function("detect_2col_2px", |b| b.iter(|| detect(black_box(&image))));
}

fn bench_detect_large(c: &mut Criterion) {
    let image = symbol(12, 4);
    c.bench_function("detect_12col_4px", |b| b.iter(|| detect(black_box(&image))));
}

fn bench_detect_rotated(c: &mut Criterion) {
    let image = rotate_180(&symbol(6, 3));
    c.bench_function("detect_6col_3px_rotated", |b| {
        b.iter(|| detect(black_box(&image)))
    });
}

fn bench_detect_blank(c: &mut Criterion) {
    // Worst case for the vertex search: every sampled row scanned twice
    let image = BitMatrix::new(1920, 1080);
    c.bench_function("detect_blank_1920x1080", |b| {
        b.iter(|| detect(black_box(&image)))
    });
}

fn bench_detect_batch(c: &mut Criterion) {
    let images: Vec<BitMatrix> = (1..=8).map(|cols| symbol(cols, 3)).collect();
    let options = DetectOptions::default();
    c.bench_function("detect_batch_8", |b| {
        b.iter(|| detect_batch(black_box(&images), &options))
    });
}

criterion_group!(
    benches,
    bench_detect_small,
    bench_detect_large,
    bench_detect_rotated,
    bench_detect_blank,
    bench_detect_batch
);
criterion_main!(benches);
