use std::path::PathBuf;

use argh::FromArgs;
use voxwarp::{
    resample::{interpolation::InterpolationMode, parallel::ExecutionStrategy},
    volume::{Volume, VolumeShape},
    AugmentConfig, RandomAffine,
};

/// Applies a random affine augmentation to a synthetic sphere phantom
#[derive(FromArgs)]
struct Args {
    /// path to a JSON augmentation config
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// edge length of the cubic phantom
    #[argh(option, short = 's', default = "32")]
    size: usize,

    /// sphere radius in voxels
    #[argh(option, short = 'r', default = "10.0")]
    radius: f32,

    /// seed for the random generator, overrides the config
    #[argh(option)]
    seed: Option<u64>,

    /// interpolation mode, overrides the config
    #[argh(option, short = 'i', from_str_fn(parse_interpolation))]
    interpolation: Option<InterpolationMode>,

    /// run the resampling on the rayon thread pool
    #[argh(switch, short = 'p')]
    parallel: bool,

    /// write the augmented intensities as raw little-endian f32 to this path
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,
}

fn parse_interpolation(value: &str) -> Result<InterpolationMode, String> {
    value.parse().map_err(|e| format!("{e}"))
}

/// A solid sphere with a linear intensity ramp along the first axis, and its mask.
fn sphere_phantom(size: usize, radius: f32) -> (Volume<f32>, Volume<u8>) {
    let shape = VolumeShape::from([size, size, size]);
    let center = shape.midpoint().map(|m| m as f32);

    let inside = |[x, y, z]: [usize; 3]| {
        let d = [
            x as f32 - center[0],
            y as f32 - center[1],
            z as f32 - center[2],
        ];
        d.iter().map(|v| v * v).sum::<f32>() <= radius * radius
    };

    let image = Volume::from_shape_fn(shape, |index| match inside(index) {
        true => 0.5 + 0.5 * index[0] as f32 / size as f32,
        false => 0.0,
    });
    let labels = Volume::from_shape_fn(shape, |index| inside(index) as u8);

    (image, labels)
}

fn stats(volume: &Volume<f32>) -> (usize, f32, f32) {
    let values = volume.as_slice();
    let nonzero = values.iter().filter(|v| **v != 0.0).count();
    let sum = values.iter().sum::<f32>();
    let max = values.iter().copied().fold(f32::MIN, f32::max);
    (nonzero, sum, max)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::init_from_env(env);

    let args: Args = argh::from_env();

    let mut config = match &args.config {
        Some(path) => AugmentConfig::from_file(path)?,
        None => AugmentConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(interpolation) = args.interpolation {
        config.interpolation = interpolation;
    }
    log::info!(
        "interpolation={} border_mode={} probability={} seed={:?}",
        config.interpolation,
        config.border_mode,
        config.probability,
        config.seed
    );

    let strategy = match args.parallel {
        true => ExecutionStrategy::AutoRows(args.size * args.size),
        false => ExecutionStrategy::Serial,
    };

    let mut rng = config.rng();
    let augment = RandomAffine::new(config)?.with_strategy(strategy);

    let (image, labels) = sphere_phantom(args.size, args.radius);

    let (out_image, out_labels) = augment.apply_with_labels(&mut rng, &image, &labels)?;

    let (nonzero, sum, max) = stats(&image);
    log::info!("input:  nonzero={nonzero} sum={sum:.3} max={max:.3}");
    let (nonzero, sum, max) = stats(&out_image);
    log::info!("output: nonzero={nonzero} sum={sum:.3} max={max:.3}");

    let label_voxels = |v: &Volume<u8>| v.as_slice().iter().filter(|l| **l != 0).count();
    log::info!(
        "labelled voxels: {} -> {}",
        label_voxels(&labels),
        label_voxels(&out_labels)
    );

    if let Some(path) = args.output {
        let bytes = out_image
            .as_slice()
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect::<Vec<u8>>();
        std::fs::write(&path, bytes)?;
        log::info!("wrote {} volume to {}", out_image.shape(), path.display());
    }

    Ok(())
}
