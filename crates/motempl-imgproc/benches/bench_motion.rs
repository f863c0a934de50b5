use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use motempl_image::{Image, ImageSize};
use motempl_imgproc::motion::{motion_gradient, update_motion_history};

fn bench_motion(c: &mut Criterion) {
    let mut group = c.benchmark_group("Motion");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        let parameter_string = format!("{width}x{height}");
        let size = ImageSize {
            width: *width,
            height: *height,
        };

        let silhouette_data = (0..size.width * size.height)
            .map(|i| (i % 7 == 0) as u8)
            .collect::<Vec<_>>();
        let silhouette = Image::<u8, 1>::new(size, silhouette_data).unwrap();
        let mut mhi = Image::<f32, 1>::from_size_val(size, 0.0).unwrap();
        let mut mask = Image::<u8, 1>::from_size_val(size, 0u8).unwrap();
        let mut orientation = Image::<f32, 1>::from_size_val(size, 0.0).unwrap();

        group.bench_with_input(
            BenchmarkId::new("update_motion_history", &parameter_string),
            &silhouette,
            |b, i| {
                b.iter(|| {
                    update_motion_history(black_box(i), black_box(&mut mhi), 1.0, 1.0).unwrap()
                })
            },
        );

        update_motion_history(&silhouette, &mut mhi, 1.0, 1.0).unwrap();

        group.bench_with_input(
            BenchmarkId::new("motion_gradient", &parameter_string),
            &mhi,
            |b, i| {
                b.iter(|| {
                    motion_gradient(
                        black_box(i),
                        black_box(&mut mask),
                        black_box(&mut orientation),
                        0.05,
                        0.5,
                    )
                    .unwrap()
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_motion);
criterion_main!(benches);
