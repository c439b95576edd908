//! Square/cubic gradient lattice shared by both Perlin kernels.
//!
//! The kernels differ only in their gradient sets and fade curve, which are passed
//! in by the caller.

use glam::{DVec2, DVec3};

use crate::math::{floor, lerp2, lerp3};
use crate::noise::perm;
use crate::random::{Random, shuffled_permutation};

/// Offset added to every input coordinate so integer inputs do not land exactly on
/// a lattice point, where every corner dot product degenerates to zero.
const NUDGE: f64 = 0.1;

/// Separately shuffled permutation tables for 2D and 3D hashing.
#[derive(Debug, Clone)]
pub(crate) struct PerlinLattice {
    p2: [u8; 256],
    p3: [u8; 256],
}

impl PerlinLattice {
    /// Shuffle the 2D table, then the 3D table, from `random`.
    pub(crate) fn new<R: Random + ?Sized>(random: &mut R) -> Self {
        let p2 = shuffled_permutation(random);
        let p3 = shuffled_permutation(random);
        Self { p2, p3 }
    }

    #[inline]
    fn hash_2d(&self, x: i32, y: i32) -> usize {
        perm(&self.p2, perm(&self.p2, x).wrapping_add(y)) as usize
    }

    #[inline]
    fn hash_3d(&self, x: i32, y: i32, z: i32) -> usize {
        let xy = perm(&self.p3, perm(&self.p3, x).wrapping_add(y));
        perm(&self.p3, xy.wrapping_add(z)) as usize
    }

    /// Sample 2D lattice noise.
    ///
    /// `gradient` maps a hash in `0..256` to a corner gradient.
    #[inline]
    pub(crate) fn sample_2d(
        &self,
        x: f64,
        y: f64,
        gradient: impl Fn(usize) -> DVec2,
        fade: fn(f64) -> f64,
    ) -> f64 {
        let x = x + NUDGE;
        let y = y + NUDGE;

        let x0 = floor(x);
        let y0 = floor(y);
        let x1 = x0.wrapping_add(1);
        let y1 = y0.wrapping_add(1);

        let xr = x - f64::from(x0);
        let yr = y - f64::from(y0);

        let d00 = gradient(self.hash_2d(x0, y0)).dot(DVec2::new(xr, yr));
        let d10 = gradient(self.hash_2d(x1, y0)).dot(DVec2::new(xr - 1.0, yr));
        let d01 = gradient(self.hash_2d(x0, y1)).dot(DVec2::new(xr, yr - 1.0));
        let d11 = gradient(self.hash_2d(x1, y1)).dot(DVec2::new(xr - 1.0, yr - 1.0));

        lerp2(fade(xr), fade(yr), d00, d10, d01, d11)
    }

    /// Sample 3D lattice noise, interpolating along x, then y, then z.
    #[inline]
    #[allow(clippy::similar_names)]
    pub(crate) fn sample_3d(
        &self,
        x: f64,
        y: f64,
        z: f64,
        gradient: impl Fn(usize) -> DVec3,
        fade: fn(f64) -> f64,
    ) -> f64 {
        let x = x + NUDGE;
        let y = y + NUDGE;
        let z = z + NUDGE;

        let x0 = floor(x);
        let y0 = floor(y);
        let z0 = floor(z);
        let x1 = x0.wrapping_add(1);
        let y1 = y0.wrapping_add(1);
        let z1 = z0.wrapping_add(1);

        let xr = x - f64::from(x0);
        let yr = y - f64::from(y0);
        let zr = z - f64::from(z0);

        let corner = |cx: i32, cy: i32, cz: i32, offset: DVec3| {
            gradient(self.hash_3d(cx, cy, cz)).dot(offset)
        };

        let d000 = corner(x0, y0, z0, DVec3::new(xr, yr, zr));
        let d100 = corner(x1, y0, z0, DVec3::new(xr - 1.0, yr, zr));
        let d010 = corner(x0, y1, z0, DVec3::new(xr, yr - 1.0, zr));
        let d110 = corner(x1, y1, z0, DVec3::new(xr - 1.0, yr - 1.0, zr));
        let d001 = corner(x0, y0, z1, DVec3::new(xr, yr, zr - 1.0));
        let d101 = corner(x1, y0, z1, DVec3::new(xr - 1.0, yr, zr - 1.0));
        let d011 = corner(x0, y1, z1, DVec3::new(xr, yr - 1.0, zr - 1.0));
        let d111 = corner(x1, y1, z1, DVec3::new(xr - 1.0, yr - 1.0, zr - 1.0));

        lerp3(
            fade(xr),
            fade(yr),
            fade(zr),
            d000,
            d100,
            d010,
            d110,
            d001,
            d101,
            d011,
            d111,
        )
    }
}
