//! Classic (1985) Perlin noise.
//!
//! Same lattice walk as [`PerlinImproved`](crate::noise::PerlinImproved), but with
//! 256 seed-derived random unit gradients per dimension and the cubic `3t² - 2t³`
//! fade curve.

use glam::{DVec2, DVec3};

use crate::math::cubic_smoothstep;
use crate::noise::lattice::PerlinLattice;
use crate::noise::{NoiseKernel, NoiseKernel3d, random_direction};
use crate::random::xoroshiro::Xoroshiro;

const TABLE_SIZE: usize = 256;

/// Classic Perlin noise generator.
#[derive(Debug, Clone)]
pub struct PerlinClassic {
    lattice: PerlinLattice,
    gradients_2d: Box<[DVec2]>,
    gradients_3d: Box<[DVec3]>,
}

impl PerlinClassic {
    /// Create a new classic Perlin generator from a seed.
    ///
    /// Each random draw is normalized once as a 2D and once as a 3D gradient.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut rng = Xoroshiro::from_seed(seed);
        let (gradients_2d, gradients_3d): (Vec<DVec2>, Vec<DVec3>) = (0..TABLE_SIZE)
            .map(|_| random_direction(&mut rng))
            .unzip();
        let lattice = PerlinLattice::new(&mut rng);
        tracing::debug!(seed, "built classic perlin tables");

        Self {
            lattice,
            gradients_2d: gradients_2d.into_boxed_slice(),
            gradients_3d: gradients_3d.into_boxed_slice(),
        }
    }
}

impl NoiseKernel for PerlinClassic {
    fn value_2d(&self, x: f64, y: f64) -> f64 {
        self.lattice
            .sample_2d(x, y, |hash| self.gradients_2d[hash], cubic_smoothstep)
    }
}

impl NoiseKernel3d for PerlinClassic {
    fn value_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        self.lattice
            .sample_3d(x, y, z, |hash| self.gradients_3d[hash], cubic_smoothstep)
    }
}
