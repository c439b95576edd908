//! # Terra Core
//!
//! Turns the noise kernels from `terra-utils` into terrain:
//!
//! - [`config`] - The `terra.json5` configuration and its validation
//! - [`worldgen`] - Per-column terrain heights and 3D cave density
//! - [`chunk`] - Chunk storage and the flat and noise chunk generators

pub mod chunk;
pub mod config;
pub mod worldgen;
