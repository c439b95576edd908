//! Shared building blocks for terra's terrain generation.
//!
//! - [`math`] - Interpolation and lattice helpers used by the noise kernels
//! - [`random`] - Seeded random stream used to build kernel tables
//! - [`noise`] - The four coherent noise kernels and the fractal composition layer

pub mod math;
pub mod noise;
pub mod random;
