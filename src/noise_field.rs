//! Deterministic multi-octave coherent-noise fields.
//!
//! Every field is a pure function of `(size, seed, params)`: the Perlin
//! source uses a fixed internal seed and the generation seed enters as the
//! third sampling axis, so different seeds yield uncorrelated fields from
//! the same generator. Reproducing a field bit-for-bit from its parameters
//! is the property the rest of the pipeline leans on.

use noise::{NoiseFn, Perlin};
use rayon::prelude::*;

use crate::grid::Grid;

/// Internal seed of the shared Perlin source. The generation seed selects a
/// slice along the third axis instead of reseeding the generator.
const NOISE_SOURCE_SEED: u32 = 0;

/// Multi-octave sampling parameters.
#[derive(Clone, Copy, Debug)]
pub struct NoiseParams {
    /// Frequency divisor: cells sample at `(x / scale, y / scale)`.
    pub scale: f64,
    /// Number of octaves to sum.
    pub octaves: u32,
    /// Amplitude decay per octave.
    pub persistence: f64,
    /// Frequency growth per octave.
    pub lacunarity: f64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            scale: 100.0,
            octaves: 6,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

impl NoiseParams {
    pub fn with_octaves(octaves: u32) -> Self {
        Self {
            octaves,
            ..Self::default()
        }
    }
}

/// Sample a `size`×`size` scalar field, one value per cell, in ≈[-1, 1].
///
/// Rows are independent, so they are sampled in parallel; the output does
/// not depend on the thread count.
pub fn noise_field(size: usize, seed: u32, params: &NoiseParams) -> Grid<f32> {
    let perlin = Perlin::new(NOISE_SOURCE_SEED);
    let mut data = vec![0.0f32; size * size];
    data.par_chunks_mut(size.max(1))
        .enumerate()
        .for_each(|(y, row)| {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = fbm(
                    &perlin,
                    x as f64 / params.scale,
                    y as f64 / params.scale,
                    seed as f64,
                    params,
                ) as f32;
            }
        });
    Grid::from_raw(size, data)
}

/// Fractional Brownian motion over the 3-axis Perlin source, normalized by
/// the summed amplitude so the result stays in ≈[-1, 1].
fn fbm(noise: &Perlin, x: f64, y: f64, z: f64, params: &NoiseParams) -> f64 {
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut max_value = 0.0;

    for _ in 0..params.octaves {
        total += amplitude * noise.get([x * frequency, y * frequency, z * frequency]);
        max_value += amplitude;
        amplitude *= params.persistence;
        frequency *= params.lacunarity;
    }

    total / max_value
}
