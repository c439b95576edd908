//! Interpolation helpers shared by the lattice noise kernels.
//!
//! These operate on raw scalars so the kernels can call them on the hot
//! per-sample path without building intermediate vectors.

/// Floors a coordinate to its lattice cell.
///
/// Values outside the `i32` range saturate and NaN maps to 0, so lattice
/// arithmetic built on the result must use wrapping operations.
#[inline]
#[must_use]
pub fn floor(value: f64) -> i32 {
    value.floor() as i32
}

/// Linear interpolation between `start` and `end` by `delta`.
#[inline]
#[must_use]
pub fn lerp(delta: f64, start: f64, end: f64) -> f64 {
    start + delta * (end - start)
}

/// Bilinear interpolation over the four corners of a unit square.
///
/// Corner naming is `v{x}{y}`.
#[inline]
#[must_use]
pub fn lerp2(delta_x: f64, delta_y: f64, v00: f64, v10: f64, v01: f64, v11: f64) -> f64 {
    lerp(delta_y, lerp(delta_x, v00, v10), lerp(delta_x, v01, v11))
}

/// Trilinear interpolation over the eight corners of a unit cube.
///
/// Interpolates along x, then y, then z. Corner naming is `v{x}{y}{z}`.
#[inline]
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn lerp3(
    delta_x: f64,
    delta_y: f64,
    delta_z: f64,
    v000: f64,
    v100: f64,
    v010: f64,
    v110: f64,
    v001: f64,
    v101: f64,
    v011: f64,
    v111: f64,
) -> f64 {
    lerp(
        delta_z,
        lerp2(delta_x, delta_y, v000, v100, v010, v110),
        lerp2(delta_x, delta_y, v001, v101, v011, v111),
    )
}

/// Quintic fade curve `6t⁵ - 15t⁴ + 10t³` from improved Perlin noise.
///
/// Has zero first and second derivatives at both ends.
#[inline]
#[must_use]
pub fn smoothstep(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Cubic hermite curve `3t² - 2t³` from the original 1985 Perlin noise.
#[inline]
#[must_use]
pub fn cubic_smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_negative() {
        assert_eq!(floor(-0.5), -1);
        assert_eq!(floor(-1.0), -1);
        assert_eq!(floor(2.999), 2);
        assert_eq!(floor(f64::NAN), 0);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_fade_curves_endpoints() {
        for fade in [smoothstep, cubic_smoothstep] {
            assert_eq!(fade(0.0), 0.0);
            assert_eq!(fade(1.0), 1.0);
            assert_eq!(fade(0.5), 0.5);
        }
    }

    #[test]
    fn test_fade_curves_differ() {
        // The two Perlin generations are distinguished by their fade curve
        assert!((smoothstep(0.25) - cubic_smoothstep(0.25)).abs() > 1e-3);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_lerp3_corners() {
        let corners = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let at = |x: f64, y: f64, z: f64| {
            lerp3(
                x, y, z, corners[0], corners[1], corners[2], corners[3], corners[4], corners[5],
                corners[6], corners[7],
            )
        };
        assert_eq!(at(0.0, 0.0, 0.0), 1.0);
        assert_eq!(at(1.0, 0.0, 0.0), 2.0);
        assert_eq!(at(0.0, 1.0, 0.0), 3.0);
        assert_eq!(at(1.0, 1.0, 1.0), 8.0);
        assert_eq!(at(0.5, 0.5, 0.5), 4.5);
    }
}
