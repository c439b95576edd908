//! Simplex noise with bit-pattern gradient selection.
//!
//! Reproduces the hardware-oriented simplex algorithm from Perlin's patent: no
//! permutation or gradient tables, only eight literal bit patterns. Lattice points
//! are hashed by summing pattern lookups over the low bits of their coordinates, and
//! the gradient is built from individual bits of that sum. The seed does not
//! influence the output.

use crate::math::floor;
use crate::noise::{NoiseKernel, NoiseKernel3d};

/// The eight bit patterns every lattice hash is built from.
const T: [u32; 8] = [0x15, 0x38, 0x32, 0x2c, 0x0d, 0x13, 0x07, 0x2a];

#[allow(clippy::unreadable_literal)]
const SQRT_3: f64 = 1.7320508075688772;
/// Skewing factor for 2D simplex: `(sqrt(3) - 1) / 2`
const F2: f64 = 0.5 * (SQRT_3 - 1.0);
/// Unskewing factor for 2D simplex: `(3 - sqrt(3)) / 6`
const G2: f64 = (3.0 - SQRT_3) / 6.0;
/// Skewing factor for 3D simplex: `(sqrt(4) - 1) / 3`
const F3: f64 = 1.0 / 3.0;
/// Unskewing factor for 3D simplex: `(1 - 1/sqrt(4)) / 3`
const G3: f64 = 1.0 / 6.0;

/// Falloff radius of each vertex contribution.
const RADIUS: f64 = 0.6;
/// Normalizes 2D output to roughly `[-1, 1]`.
const SCALE_2D: f64 = 220.0;

/// Extracts bit `bit` of a lattice coordinate.
#[inline]
const fn bit(n: i32, bit: u32) -> u32 {
    ((n as u32) >> bit) & 1
}

/// Extracts bit `b` of a hash.
#[inline]
const fn hash_bit(h: u32, b: u32) -> u32 {
    (h >> b) & 1
}

/// One 2D pattern lookup: bit `b` of both coordinates plus the low bit of `b`
/// select one of the eight patterns.
#[inline]
const fn pattern_2d(i: i32, j: i32, b: u32) -> u32 {
    T[((bit(i, b) << 2) | (bit(j, b) << 1) | (b & 1)) as usize]
}

/// Hash of a 2D lattice point: four pattern lookups over bits 0..4, alternating
/// which coordinate leads.
#[inline]
const fn shuffle_2d(i: i32, j: i32) -> u32 {
    pattern_2d(i, j, 0) + pattern_2d(j, i, 1) + pattern_2d(i, j, 2) + pattern_2d(j, i, 3)
}

/// One 3D pattern lookup: bit `b` of each coordinate selects one of the eight patterns.
#[inline]
const fn pattern_3d(i: i32, j: i32, k: i32, b: u32) -> u32 {
    T[((bit(i, b) << 2) | (bit(j, b) << 1) | bit(k, b)) as usize]
}

/// Hash of a 3D lattice point: eight pattern lookups over bits 0..8, rotating the
/// coordinate order each step.
#[inline]
const fn shuffle_3d(i: i32, j: i32, k: i32) -> u32 {
    pattern_3d(i, j, k, 0)
        + pattern_3d(j, k, i, 1)
        + pattern_3d(k, i, j, 2)
        + pattern_3d(i, j, k, 3)
        + pattern_3d(j, k, i, 4)
        + pattern_3d(k, i, j, 5)
        + pattern_3d(i, j, k, 6)
        + pattern_3d(j, k, i, 7)
}

/// Simplex noise with patent-style bit-manipulated gradients.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimplexPatent;

impl SimplexPatent {
    /// Create a new patent simplex generator.
    ///
    /// The seed is accepted for a uniform construction interface but has no
    /// effect: the gradient patterns are fixed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        tracing::debug!(seed, "patent simplex ignores its seed");
        Self
    }

    /// Contribution of one 2D vertex at offset `(x, y)` from the query point.
    #[inline]
    fn corner_2d(i: i32, j: i32, x: f64, y: f64) -> f64 {
        let t = RADIUS * RADIUS - x * x - y * y;
        if t <= 0.0 {
            return 0.0;
        }

        let h = shuffle_2d(i, j);
        let b5 = hash_bit(h, 5);
        let b4 = hash_bit(h, 4);
        let b3 = hash_bit(h, 3);
        let b2 = hash_bit(h, 2);

        let mut gx: f64 = if b5 == b3 { -1.0 } else { 1.0 };
        let mut gy: f64 = if b5 == b4 { -1.0 } else { 1.0 };
        // Bits 0/1 pick the axis bit 2 may zero; 0 and 3 keep the diagonal.
        match h & 3 {
            1 if b2 == 1 => gy = 0.0,
            2 if b2 == 1 => gx = 0.0,
            _ => {}
        }

        let t = t * t;
        t * t * (gx * x + gy * y)
    }

    /// Contribution of one 3D vertex, `corner` steps away from the cell origin.
    ///
    /// `(u, v, w)` is the query point relative to the cell origin in unskewed space.
    #[inline]
    fn corner_3d(cell: [i32; 3], corner: [i32; 3], u: f64, v: f64, w: f64) -> f64 {
        let s = f64::from(corner[0] + corner[1] + corner[2]) * G3;
        let x = u - f64::from(corner[0]) + s;
        let y = v - f64::from(corner[1]) + s;
        let z = w - f64::from(corner[2]) + s;

        let t = RADIUS - x * x - y * y - z * z;
        if t <= 0.0 {
            return 0.0;
        }

        let h = shuffle_3d(
            cell[0].wrapping_add(corner[0]),
            cell[1].wrapping_add(corner[1]),
            cell[2].wrapping_add(corner[2]),
        );
        let b5 = hash_bit(h, 5);
        let b4 = hash_bit(h, 4);
        let b3 = hash_bit(h, 3);
        let b2 = hash_bit(h, 2);
        let b = h & 3;

        // Rotate (x, y, z) into (p, q, r)
        let (p, q, r) = match b {
            1 => (x, y, z),
            2 => (y, z, x),
            _ => (z, x, y),
        };
        let p = if b5 == b3 { -p } else { p };
        let q = if b5 == b4 { -q } else { q };
        let r = if b5 == (b4 ^ b3) { r } else { -r };

        let t = t * t;
        let dot = p + if b == 0 {
            q + r
        } else if b2 == 0 {
            q
        } else {
            r
        };
        8.0 * t * t * dot
    }
}

impl NoiseKernel for SimplexPatent {
    fn value_2d(&self, xin: f64, yin: f64) -> f64 {
        let s = (xin + yin) * F2;
        let i = floor(xin + s);
        let j = floor(yin + s);
        let t = (f64::from(i) + f64::from(j)) * G2;
        let x0 = xin - (f64::from(i) - t);
        let y0 = yin - (f64::from(j) - t);

        // Lower triangle when x0 > y0, upper otherwise
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - f64::from(i1) + G2;
        let y1 = y0 - f64::from(j1) + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let n0 = Self::corner_2d(i, j, x0, y0);
        let n1 = Self::corner_2d(i.wrapping_add(i1), j.wrapping_add(j1), x1, y1);
        let n2 = Self::corner_2d(i.wrapping_add(1), j.wrapping_add(1), x2, y2);

        SCALE_2D * (n0 + n1 + n2)
    }
}

impl NoiseKernel3d for SimplexPatent {
    fn value_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        let s = (x + y + z) * F3;
        let cell = [floor(x + s), floor(y + s), floor(z + s)];
        let t = (f64::from(cell[0]) + f64::from(cell[1]) + f64::from(cell[2])) * G3;
        let u = x - f64::from(cell[0]) + t;
        let v = y - f64::from(cell[1]) + t;
        let w = z - f64::from(cell[2]) + t;

        // Determine which of the 6 tetrahedra we're in from the offset ordering
        let (second, third) = if u >= v {
            if v >= w {
                ([1, 0, 0], [1, 1, 0])
            } else if u >= w {
                ([1, 0, 0], [1, 0, 1])
            } else {
                ([0, 0, 1], [1, 0, 1])
            }
        } else if v < w {
            ([0, 0, 1], [0, 1, 1])
        } else if u < w {
            ([0, 1, 0], [0, 1, 1])
        } else {
            ([0, 1, 0], [1, 1, 0])
        };

        Self::corner_3d(cell, [0, 0, 0], u, v, w)
            + Self::corner_3d(cell, second, u, v, w)
            + Self::corner_3d(cell, third, u, v, w)
            + Self::corner_3d(cell, [1, 1, 1], u, v, w)
    }
}
