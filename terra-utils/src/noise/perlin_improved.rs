//! Improved (2002) Perlin noise.
//!
//! Uses fixed gradient sets (the four axis directions in 2D, the cube edge
//! midpoints in 3D) and the quintic fade curve. Only the permutation tables
//! depend on the seed.

use glam::{DVec2, DVec3};

use crate::math::smoothstep;
use crate::noise::lattice::PerlinLattice;
use crate::noise::{GRADIENT, NoiseKernel, NoiseKernel3d};
use crate::random::xoroshiro::Xoroshiro;

/// 2D gradients: the four axis-aligned unit vectors.
const GRADIENT_2D: [DVec2; 4] = [DVec2::X, DVec2::NEG_X, DVec2::Y, DVec2::NEG_Y];

/// Improved Perlin noise generator.
#[derive(Debug, Clone)]
pub struct PerlinImproved {
    lattice: PerlinLattice,
}

impl PerlinImproved {
    /// Create a new improved Perlin generator from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut rng = Xoroshiro::from_seed(seed);
        let lattice = PerlinLattice::new(&mut rng);
        tracing::debug!(seed, "built improved perlin tables");

        Self { lattice }
    }
}

/// Gradient for a 3D lattice hash.
#[inline]
fn gradient_3d(hash: usize) -> DVec3 {
    let g = &GRADIENT[hash & 15];
    DVec3::new(f64::from(g[0]), f64::from(g[1]), f64::from(g[2]))
}

impl NoiseKernel for PerlinImproved {
    fn value_2d(&self, x: f64, y: f64) -> f64 {
        self.lattice
            .sample_2d(x, y, |hash| GRADIENT_2D[hash & 3], smoothstep)
    }
}

impl NoiseKernel3d for PerlinImproved {
    fn value_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        self.lattice.sample_3d(x, y, z, gradient_3d, smoothstep)
    }
}
