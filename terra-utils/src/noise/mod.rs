//! Coherent noise kernels and the fractal layer built on top of them.
//!
//! Kernels evaluate raw noise at a single point:
//!
//! - [`SimplexPatent`] - Bit-pattern gradient simplex noise (ignores its seed)
//! - [`SimplexTables`] - Permutation/gradient table simplex noise (2D only)
//! - [`PerlinImproved`] - 2002 Perlin noise with fixed edge gradients and quintic fade
//! - [`PerlinClassic`] - 1985 Perlin noise with random unit gradients and cubic fade
//!
//! Every kernel implements [`NoiseKernel`]; all but [`SimplexTables`] also implement
//! [`NoiseKernel3d`]. The [`Fractal`] operators (octaves, turbulence, fbm, domain
//! warping) are available on any of them, and on [`NoiseKernelKind`] when the kernel
//! is picked at runtime.

mod fractal;
mod kernel;
mod lattice;
mod perlin_classic;
mod perlin_improved;
mod simplex_patent;
mod simplex_tables;

use glam::{DVec2, DVec3};

use crate::random::Random;

pub use fractal::{Fractal, NoisePoint, Sample, WARP_SCALE};
pub use kernel::{
    KernelType, NoiseError, NoiseKernel, NoiseKernel3d, NoiseKernel3dKind, NoiseKernelKind,
};
pub use perlin_classic::PerlinClassic;
pub use perlin_improved::PerlinImproved;
pub use simplex_patent::SimplexPatent;
pub use simplex_tables::SimplexTables;

/// Gradient vectors for improved Perlin noise: the 12 cube edge midpoints,
/// padded with 4 repeats so the table size is a power of two.
pub(crate) const GRADIENT: [[i32; 3]; 16] = [
    [1, 1, 0],
    [-1, 1, 0],
    [1, -1, 0],
    [-1, -1, 0],
    [1, 0, 1],
    [-1, 0, 1],
    [1, 0, -1],
    [-1, 0, -1],
    [0, 1, 1],
    [0, -1, 1],
    [0, 1, -1],
    [0, -1, -1],
    [1, 1, 0],
    [0, -1, 1],
    [-1, 1, 0],
    [0, -1, -1],
];

/// Looks up a permutation table entry with wraparound.
#[inline]
pub(crate) const fn perm(p: &[u8; 256], x: i32) -> i32 {
    p[(x & 0xFF) as usize] as i32
}

/// Draws a random direction and returns it normalized both as a 2D vector (x, y)
/// and as a 3D vector.
///
/// Draws outside the unit ball, or with a near-zero (x, y) part, are redrawn so both
/// normalizations are well defined and directions are uniform on the sphere.
pub(crate) fn random_direction<R: Random + ?Sized>(random: &mut R) -> (DVec2, DVec3) {
    loop {
        let v = DVec3::new(
            random.next_signed_unit(),
            random.next_signed_unit(),
            random.next_signed_unit(),
        );
        let flat = v.truncate();
        if flat.length_squared() > 1e-12 && v.length_squared() <= 1.0 {
            return (flat.normalize(), v.normalize());
        }
    }
}
