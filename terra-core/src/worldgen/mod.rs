//! World generation module.
//!
//! Connects the configured terrain shape to a noise kernel and answers per-column and
//! per-block terrain queries.

mod height_sampler;

pub use height_sampler::{HeightSampler, WorldgenError};
