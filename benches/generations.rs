use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use bitonal_life_rs::image_pipeline::{
    Color, ColorPair, GenerationEngine, NeighborRule, NoProgress, PipelineConfig, RasterImage,
    StandardTiffWriter, RasterWriter, TiffCompression,
};

fn generate_noise_image(width: usize, height: usize) -> RasterImage {
    let mut image = RasterImage::new(width, height, Color::BLACK);
    let mut state: u32 = 0x9E37_79B9;
    for y in 0..height {
        for x in 0..width {
            // xorshift keeps the pattern deterministic across runs
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            if state % 2 == 0 {
                image.set(x, y, Color::WHITE);
            }
        }
    }
    image
}

fn colors() -> ColorPair {
    ColorPair::new(Color::WHITE, Color::BLACK)
}

fn benchmark_generation_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation_by_size");

    let sizes = vec![
        (100, 100, "100x100"),
        (500, 500, "500x500"),
        (1000, 1000, "1000x1000"),
    ];

    for (width, height, label) in sizes {
        let image = generate_noise_image(width, height);

        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &image,
            |b, image| {
                let engine = GenerationEngine::new();
                let rule = NeighborRule::new(4, 4);

                b.iter(|| {
                    let _ = engine.run(black_box(image), colors(), &rule, 1, &mut NoProgress);
                });
            },
        );
    }

    group.finish();
}

fn benchmark_sequential_vs_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("row_evaluation");
    let image = generate_noise_image(500, 500);
    let rule = NeighborRule::new(4, 4);

    for (parallel, label) in [(false, "sequential"), (true, "parallel")] {
        group.bench_function(label, |b| {
            let engine = GenerationEngine::new().with_parallel(parallel);

            b.iter(|| {
                let _ = engine.run(black_box(&image), colors(), &rule, 4, &mut NoProgress);
            });
        });
    }

    group.finish();
}

fn benchmark_encode_compression(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_compression");
    let image = generate_noise_image(500, 500);

    let compressions = vec![
        (TiffCompression::None, "none"),
        (TiffCompression::Lzw, "lzw"),
        (TiffCompression::DeflateFast, "deflate_fast"),
    ];

    for (compression, label) in compressions {
        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &image,
            |b, image| {
                let config = PipelineConfig::builder()
                    .compression(compression)
                    .build();

                b.iter(|| {
                    let mut output = Vec::new();
                    let _ = StandardTiffWriter.write_raster(black_box(image), &mut output, &config);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_generation_sizes,
    benchmark_sequential_vs_parallel,
    benchmark_encode_compression
);
criterion_main!(benches);
