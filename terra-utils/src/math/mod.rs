//! This module contains math related utilities.
pub mod noise_math;

pub use noise_math::{cubic_smoothstep, floor, lerp, lerp2, lerp3, smoothstep};
