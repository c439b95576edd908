//! Table-driven simplex noise.
//!
//! Gradients are random unit directions drawn from the seed, and lattice points are
//! hashed into them through a shuffled 256-entry permutation table. Only 2D sampling
//! is provided; the type does not implement [`NoiseKernel3d`](crate::noise::NoiseKernel3d).

use glam::DVec2;

use crate::math::floor;
use crate::noise::{NoiseKernel, perm, random_direction};
use crate::random::shuffled_permutation;
use crate::random::xoroshiro::Xoroshiro;

#[allow(clippy::unreadable_literal)]
const SQRT_3: f64 = 1.7320508075688772;
/// Skewing factor for 2D simplex: `0.5 * (sqrt(3) - 1)`
const F2: f64 = 0.5 * (SQRT_3 - 1.0);
/// Unskewing factor for 2D simplex: `(3 - sqrt(3)) / 6`
const G2: f64 = (3.0 - SQRT_3) / 6.0;
/// Squared falloff radius of each vertex contribution.
const FALLOFF: f64 = 0.6;
const TABLE_SIZE: usize = 256;

/// Simplex noise generator with seeded gradient and permutation tables.
///
/// A 3D query does not compile:
///
/// ```compile_fail
/// use terra_utils::noise::{NoiseKernel3d, SimplexTables};
///
/// let noise = SimplexTables::new(0);
/// let _ = noise.value_3d(0.0, 0.0, 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct SimplexTables {
    p: [u8; TABLE_SIZE],
    /// Boxed so the kernel stays small inside `NoiseKernelKind`.
    gradients: Box<[DVec2]>,
}

impl SimplexTables {
    /// Create a new table simplex generator from a seed.
    ///
    /// Draws 256 random directions, keeping the normalized 2D projection of each,
    /// then shuffles the identity permutation with the same stream.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut rng = Xoroshiro::from_seed(seed);
        let gradients = (0..TABLE_SIZE)
            .map(|_| random_direction(&mut rng).0)
            .collect();
        let p = shuffled_permutation(&mut rng);
        tracing::debug!(seed, "built simplex tables");

        Self { p, gradients }
    }

    /// Gradient for a lattice point, double-hashed through the permutation table.
    #[inline]
    fn gradient(&self, i: i32, j: i32) -> DVec2 {
        let hash = perm(&self.p, i.wrapping_add(perm(&self.p, j)));
        self.gradients[hash as usize]
    }

    /// Compute the contribution of one simplex vertex.
    #[inline]
    fn corner_noise(gradient: DVec2, x: f64, y: f64) -> f64 {
        let t = FALLOFF - x * x - y * y;
        if t <= 0.0 {
            0.0
        } else {
            let t = t * t;
            8.0 * t * t * gradient.dot(DVec2::new(x, y))
        }
    }
}

impl NoiseKernel for SimplexTables {
    fn value_2d(&self, xin: f64, yin: f64) -> f64 {
        let s = (xin + yin) * F2;
        let i = floor(xin + s);
        let j = floor(yin + s);
        let t = (f64::from(i) + f64::from(j)) * G2;
        let x0 = xin - (f64::from(i) - t);
        let y0 = yin - (f64::from(j) - t);

        // Determine which simplex triangle we're in
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - f64::from(i1) + G2;
        let y1 = y0 - f64::from(j1) + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let g0 = self.gradient(i, j);
        let g1 = self.gradient(i.wrapping_add(i1), j.wrapping_add(j1));
        let g2 = self.gradient(i.wrapping_add(1), j.wrapping_add(1));

        Self::corner_noise(g0, x0, y0)
            + Self::corner_noise(g1, x1, y1)
            + Self::corner_noise(g2, x2, y2)
    }
}
