use criterion::{criterion_group, criterion_main, Criterion};

use handvox_3d::camera::{PinholeIntrinsics, FOCAL_MSRA};
use handvox_3d::cloud::reconstruct_point_cloud;
use handvox_3d::frame::DepthFrame;
use handvox_3d::volume::{rasterize_tsdf, VolumeBounds};

fn bench_rasterize_tsdf(c: &mut Criterion) {
    let depth = (0..6400)
        .map(|i| 400.0 + ((i * 31) % 97) as f32)
        .collect::<Vec<_>>();
    let frame = DepthFrame::new(320, 240, 120, 80, 200, 160, depth).expect("valid frame");
    let points = reconstruct_point_cloud(&frame, FOCAL_MSRA);
    let bounds = VolumeBounds::from_points(&points).expect("valid bounds");
    let intrinsics = PinholeIntrinsics::msra();

    c.bench_function("rasterize_tsdf_32", |b| {
        b.iter(|| std::hint::black_box(rasterize_tsdf(&frame, &bounds, &intrinsics)))
    });
}

criterion_group!(benches, bench_rasterize_tsdf);
criterion_main!(benches);
