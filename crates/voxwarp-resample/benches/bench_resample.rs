use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use voxwarp_affine::{build_affine_3d, TransformParameters3d};
use voxwarp_resample::{
    interpolation::{BorderMode, InterpolationMode},
    parallel::ExecutionStrategy,
    warp::apply_affine_with_strategy,
};
use voxwarp_volume::Volume;

fn bench_apply_affine(c: &mut Criterion) {
    let mut group = c.benchmark_group("ApplyAffine");

    let params = TransformParameters3d {
        translation: [1.5, -2.0, 0.5],
        rotation: [0.1, 0.2, 0.3],
        scale: [1.1, 0.9, 1.0],
        ..Default::default()
    };
    let m = build_affine_3d(&params);

    for size in [32usize, 64, 96].iter() {
        group.throughput(criterion::Throughput::Elements((size * size * size) as u64));

        let parameter_string = format!("{size}x{size}x{size}");

        let volume = Volume::from_shape_fn([*size, *size, *size].into(), |[x, y, z]| {
            ((x + y + z) % 7) as f32
        });

        for (name, interpolation) in [
            ("nearest", InterpolationMode::Nearest),
            ("linear", InterpolationMode::Linear),
        ] {
            for (strategy_name, strategy) in [
                ("serial", ExecutionStrategy::Serial),
                ("par_elements", ExecutionStrategy::ParallelElements),
                ("auto_rows", ExecutionStrategy::AutoRows(size * size)),
            ] {
                group.bench_with_input(
                    BenchmarkId::new(format!("{name}_{strategy_name}"), &parameter_string),
                    &volume,
                    |b, v| {
                        b.iter(|| {
                            apply_affine_with_strategy(
                                black_box(v),
                                black_box(&m),
                                interpolation,
                                BorderMode::Zero,
                                strategy,
                            )
                        })
                    },
                );
            }
        }
    }
    group.finish();
}

criterion_group!(benches, bench_apply_affine);
criterion_main!(benches);
