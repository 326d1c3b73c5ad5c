use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use rasterrgb::raster_pipeline::{
    apply_transfer_functions, build_brightness_functions, build_color_balance_functions,
    compute_medians_ignore_dark, AdjustConfig, Band, DecodedRaster, GeoMetadata, GeoTiffWriter,
    OutputRaster, RasterImage, RasterWriter, TiffCompression,
};

/// Gradient image with a 4-pixel no-data border.
fn generate_mock_image(width: usize, height: usize) -> RasterImage {
    let plane = |offset: usize| -> Vec<u16> {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let border = x < 4 || y < 4 || x + 4 >= width || y + 4 >= height;
                data.push(if border { 0 } else { ((x + y + offset) % 250 + 6) as u16 });
            }
        }
        data
    };
    let raster = DecodedRaster {
        width,
        height,
        bits_per_sample: 8,
        bands: [
            Band::new(width, height, plane(0)).unwrap(),
            Band::new(width, height, plane(40)).unwrap(),
            Band::new(width, height, plane(80)).unwrap(),
        ],
        geo: GeoMetadata::default(),
        no_data_value: None,
    };
    RasterImage::new("bench.tif", raster).unwrap()
}

fn benchmark_color_balance_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("color_balance_by_size");

    let sizes = vec![
        (100, 100, "100x100"),
        (500, 500, "500x500"),
        (1000, 1000, "1000x1000"),
    ];

    for (width, height, label) in sizes {
        let image = generate_mock_image(width, height);

        group.bench_with_input(BenchmarkId::from_parameter(label), &image, |b, image| {
            b.iter(|| {
                let functions = build_color_balance_functions(
                    image.min_max().unwrap(),
                    image.mean_std_dev().unwrap(),
                )
                .unwrap();
                apply_transfer_functions(black_box(image), &functions, 0).unwrap()
            });
        });
    }

    group.finish();
}

fn benchmark_brightness(c: &mut Criterion) {
    let image = generate_mock_image(500, 500);

    c.bench_function("brightness_500x500", |b| {
        b.iter(|| {
            let medians = compute_medians_ignore_dark(image.bands()).unwrap();
            let functions = build_brightness_functions(medians, [120.0, 110.0, 100.0]).unwrap();
            apply_transfer_functions(black_box(&image), &functions, 0).unwrap()
        });
    });
}

fn benchmark_compression_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_methods");
    let image = generate_mock_image(500, 500);
    let functions = build_color_balance_functions(
        image.min_max().unwrap(),
        image.mean_std_dev().unwrap(),
    )
    .unwrap();
    let output: OutputRaster = apply_transfer_functions(&image, &functions, 0).unwrap();

    let compressions = vec![
        (TiffCompression::None, "none"),
        (TiffCompression::Lzw, "lzw"),
        (TiffCompression::Deflate, "deflate"),
    ];

    for (compression, label) in compressions {
        let config = AdjustConfig::builder().compression(compression).build();
        group.bench_with_input(BenchmarkId::from_parameter(label), &output, |b, output| {
            b.iter(|| {
                let mut bytes = Vec::new();
                GeoTiffWriter.write_raster(black_box(output), &mut bytes, &config).unwrap();
                bytes
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_color_balance_sizes,
    benchmark_brightness,
    benchmark_compression_methods
);
criterion_main!(benches);
