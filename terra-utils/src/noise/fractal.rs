//! Fractal composition over any noise kernel.
//!
//! Every operator is written once against [`Sample`], which kernels get for free:
//! 2D points for any [`NoiseKernel`], 3D points for any [`NoiseKernel3d`]. The
//! operators are pure functions of the kernel, the point and their parameters.

use std::iter;
use std::ops::{Add, Div, Mul};

use glam::{DVec2, DVec3};

use crate::noise::{NoiseKernel, NoiseKernel3d};

/// Factor applied to each domain warp layer before it offsets the next one.
pub const WARP_SCALE: f64 = 100.0;

/// A query point the fractal layer can scale, offset and rebuild.
pub trait NoisePoint:
    Copy + 'static + Add<Output = Self> + Mul<f64, Output = Self> + Div<f64, Output = Self>
{
    /// Offsets for the first (`q`) domain warp layer, one per axis.
    const WARP_Q: &'static [Self];
    /// Offsets for the second (`r`) domain warp layer, one per axis.
    const WARP_R: &'static [Self];

    /// Build a point from one value per axis.
    fn from_axes(axis: impl FnMut(usize) -> f64) -> Self;
}

impl NoisePoint for DVec2 {
    const WARP_Q: &'static [Self] = &[Self::new(0.0, 0.0), Self::new(5.2, 1.3)];
    const WARP_R: &'static [Self] = &[Self::new(1.7, 9.2), Self::new(8.3, 2.8)];

    fn from_axes(mut axis: impl FnMut(usize) -> f64) -> Self {
        Self::new(axis(0), axis(1))
    }
}

impl NoisePoint for DVec3 {
    const WARP_Q: &'static [Self] = &[
        Self::new(0.0, 0.0, 0.0),
        Self::new(5.2, 1.3, 2.8),
        Self::new(1.7, 9.2, 4.6),
    ];
    const WARP_R: &'static [Self] = &[
        Self::new(8.3, 2.8, 1.1),
        Self::new(4.1, 6.7, 3.9),
        Self::new(2.5, 7.3, 9.4),
    ];

    fn from_axes(mut axis: impl FnMut(usize) -> f64) -> Self {
        Self::new(axis(0), axis(1), axis(2))
    }
}

/// Raw kernel evaluation at a point of type `P`.
pub trait Sample<P> {
    /// Sample raw noise at `point`.
    fn sample(&self, point: P) -> f64;
}

impl<K: NoiseKernel + ?Sized> Sample<DVec2> for K {
    #[inline]
    fn sample(&self, point: DVec2) -> f64 {
        self.value_2d(point.x, point.y)
    }
}

impl<K: NoiseKernel3d + ?Sized> Sample<DVec3> for K {
    #[inline]
    fn sample(&self, point: DVec3) -> f64 {
        self.value_3d(point.x, point.y, point.z)
    }
}

/// Fractal operators available on every kernel that can be sampled at `P`.
pub trait Fractal<P: NoisePoint>: Sample<P> {
    /// Sum `octaves` samples at `point / frequency`, where frequency starts at 1 and
    /// doubles each octave, weighted by `amplitude * persistence^i`.
    ///
    /// The result is normalized by the sum of the weights, so it stays in the
    /// kernel's native range and a single octave returns the raw kernel value.
    /// Zero octaves return `0.0`.
    fn octaves(&self, point: P, octaves: u32, persistence: f64, amplitude: f64) -> f64 {
        let amplitudes = iter::successors(Some(amplitude), move |a| Some(a * persistence))
            .take(octaves as usize);
        weighted_octaves(self, point, amplitudes)
    }

    /// Like [`octaves`](Self::octaves), with an explicit amplitude per octave.
    fn octaves_with_amplitudes(&self, point: P, amplitudes: &[f64]) -> f64 {
        weighted_octaves(self, point, amplitudes.iter().copied())
    }

    /// Signed turbulence: `Σ kernel(point / zoom) * zoom` while `zoom >= 1`,
    /// halving zoom each layer, divided by the initial zoom.
    fn turbulence(&self, point: P, zoom: f64) -> f64 {
        zoom_layers(self, point, zoom, |noise, layer_zoom| noise * layer_zoom) / zoom
    }

    /// Billowy turbulence: like [`turbulence`](Self::turbulence) with each layer's
    /// absolute value, so the result is never negative.
    fn turbulence_billowy(&self, point: P, zoom: f64) -> f64 {
        zoom_layers(self, point, zoom, |noise, layer_zoom| {
            (noise * layer_zoom).abs()
        }) / zoom
    }

    /// Ridged turbulence: like [`turbulence`](Self::turbulence) with each layer
    /// mapped to `1 - |layer|`, turning zero crossings into ridges.
    fn turbulence_ridged(&self, point: P, zoom: f64) -> f64 {
        zoom_layers(self, point, zoom, |noise, layer_zoom| {
            1.0 - (noise * layer_zoom).abs()
        }) / zoom
    }

    /// Fractional Brownian motion: the signed halving-zoom loop of
    /// [`turbulence`](Self::turbulence), divided by the initial zoom.
    ///
    /// Returns `0.0` when `zoom < 1` (no layers).
    fn fbm(&self, point: P, zoom: f64) -> f64 {
        zoom_layers(self, point, zoom, |noise, layer_zoom| noise * layer_zoom) / zoom
    }

    /// Domain warping: `q` is fbm at fixed offsets, `r` is fbm at
    /// `point + 100·q` plus fixed offsets, and the result is fbm at `point + 100·r`.
    #[doc(alias = "domain_wrapping")]
    fn domain_warp(&self, point: P, zoom: f64) -> f64 {
        let q = P::from_axes(|axis| self.fbm(point + P::WARP_Q[axis], zoom));
        let r = P::from_axes(|axis| self.fbm(point + q * WARP_SCALE + P::WARP_R[axis], zoom));
        self.fbm(point + r * WARP_SCALE, zoom)
    }
}

impl<P: NoisePoint, K: Sample<P> + ?Sized> Fractal<P> for K {}

/// Each weight is divided by the total before use, so one octave multiplies by
/// exactly 1.
fn weighted_octaves<P, K>(
    kernel: &K,
    point: P,
    amplitudes: impl Iterator<Item = f64> + Clone,
) -> f64
where
    P: NoisePoint,
    K: Sample<P> + ?Sized,
{
    let total: f64 = amplitudes.clone().sum();
    let mut value = 0.0;
    let mut frequency = 1.0;
    for amplitude in amplitudes {
        value += kernel.sample(point / frequency) * (amplitude / total);
        frequency *= 2.0;
    }
    value
}

/// Runs the halving-zoom loop shared by turbulence and fbm, returning the sum of
/// `term(noise, zoom)` over all layers.
///
/// A non-finite zoom runs no layers.
fn zoom_layers<P, K>(kernel: &K, point: P, zoom: f64, term: impl Fn(f64, f64) -> f64) -> f64
where
    P: NoisePoint,
    K: Sample<P> + ?Sized,
{
    let mut value = 0.0;
    let mut layer_zoom = zoom;
    while layer_zoom >= 1.0 && layer_zoom.is_finite() {
        value += term(kernel.sample(point / layer_zoom), layer_zoom);
        layer_zoom /= 2.0;
    }
    value
}
