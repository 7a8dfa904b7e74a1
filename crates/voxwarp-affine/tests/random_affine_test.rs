use rand::{rngs::StdRng, SeedableRng};
use voxwarp_affine::{
    build_affine_3d, sample_random_affine_3d, sample_random_parameters_3d, AffineError,
    ParameterRanges3d, SampledAffine,
};

const DRAWS: usize = 1000;

fn within(value: f64, [min, max]: [f64; 2]) -> bool {
    value >= min && value <= max
}

#[test]
fn translation_stays_within_bounds() -> Result<(), AffineError> {
    let mut rng = StdRng::seed_from_u64(2024);
    let ranges = ParameterRanges3d {
        translation: [[-5.0, 5.0]; 3],
        ..Default::default()
    };

    for _ in 0..DRAWS {
        let sampled = sample_random_affine_3d(&ranges, true, &mut rng)?;
        let SampledAffine::Parameters(params) = sampled else {
            panic!("expected parameters");
        };
        for (t, r) in params.translation.iter().zip(ranges.translation.iter()) {
            assert!(within(*t, *r), "translation {t} outside {r:?}");
        }
        assert_eq!(params.rotation, [0.0; 3]);
        assert_eq!(params.scale, [1.0; 3]);
    }

    Ok(())
}

#[test]
fn every_component_stays_within_bounds() -> Result<(), AffineError> {
    let mut rng = StdRng::seed_from_u64(99);
    let ranges = ParameterRanges3d {
        translation: [[-15.0, 15.0], [-2.0, 0.0], [0.0, 3.0]],
        rotation: [[-0.6, 0.6], [0.0, 0.1], [-0.3, -0.1]],
        scale: [[0.95, 1.05], [0.5, 2.0], [1.0, 1.0]],
        shear: [
            [-0.02, 0.02],
            [0.0, 0.01],
            [-0.1, 0.0],
            [0.0, 0.0],
            [-0.05, 0.05],
            [0.2, 0.3],
        ],
    };

    for _ in 0..DRAWS {
        let params = sample_random_parameters_3d(&ranges, &mut rng)?;
        for (v, r) in params.rotation.iter().zip(ranges.rotation.iter()) {
            assert!(within(*v, *r));
        }
        for (v, r) in params.scale.iter().zip(ranges.scale.iter()) {
            assert!(within(*v, *r));
        }
        for (v, r) in params.shear.iter().flatten().zip(ranges.shear.iter()) {
            assert!(within(*v, *r));
        }
        assert_eq!(params.scale[2], 1.0);
        assert_eq!(params.shear[1][1], 0.0);
    }

    Ok(())
}

#[test]
fn sampled_matrix_is_homogeneous() -> Result<(), AffineError> {
    let mut rng = StdRng::seed_from_u64(5);
    let ranges = ParameterRanges3d::symmetric(10.0, 0.5, 0.1, 0.05);

    for _ in 0..100 {
        let m = sample_random_affine_3d(&ranges, false, &mut rng)?.into_matrix();
        assert_eq!(m.rows()[3], [0.0, 0.0, 0.0, 1.0]);
        assert!(m.inverse().is_ok());
    }

    Ok(())
}

#[test]
fn same_seed_same_matrix() -> Result<(), AffineError> {
    let ranges = ParameterRanges3d::symmetric(4.0, 0.3, 0.05, 0.01);

    let params = sample_random_parameters_3d(&ranges, &mut StdRng::seed_from_u64(11))?;
    let matrix = sample_random_affine_3d(&ranges, false, &mut StdRng::seed_from_u64(11))?;

    assert_eq!(SampledAffine::Matrix(build_affine_3d(&params)), matrix);
    Ok(())
}
