//! The `terra.json5` configuration.
//!
//! Every section is optional; missing fields fall back to their defaults. Values are
//! checked by [`TerraConfig::validate`] after parsing, so a loaded config is always
//! safe to hand to the generators.

use std::fs;
use std::io;
use std::iter;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use terra_utils::noise::KernelType;
use thiserror::Error;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file is not valid JSON5 or does not match the config layout.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json5::Error),
    /// A value is out of its allowed range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TerraConfig {
    /// World seed. Empty picks a random seed, integers are used as-is and any other
    /// text is hashed.
    pub seed: String,
    /// Which noise kernel drives the terrain.
    pub kernel: KernelType,
    /// Which chunk generator to run.
    pub generator: GeneratorType,
    /// Terrain shaping parameters.
    pub terrain: TerrainSettings,
    /// The chunk square rendered by the preview.
    pub preview: PreviewConfig,
}

/// Chunk generator selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorType {
    /// Noise-driven heights, surface and caves.
    #[default]
    Noise,
    /// Fixed bedrock, dirt and grass layers.
    Flat,
}

/// How column noise is composed from the kernel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TerrainShape {
    /// Persistence-weighted octaves at `block / scale`.
    Octaves {
        /// Number of octaves.
        octaves: u32,
        /// Amplitude factor between successive octaves.
        persistence: f64,
        /// Amplitude of the first octave.
        amplitude: f64,
        /// Block distance covered by one unit of noise space.
        scale: f64,
    },
    /// Octaves with an explicit amplitude per octave.
    Amplitudes {
        /// One amplitude per octave, lowest frequency first.
        amplitudes: Vec<f64>,
        /// Block distance covered by one unit of noise space.
        scale: f64,
    },
    /// Signed turbulence.
    Turbulence {
        /// Largest layer zoom, in blocks.
        zoom: f64,
    },
    /// Absolute-value turbulence.
    Billowy {
        /// Largest layer zoom, in blocks.
        zoom: f64,
    },
    /// Inverted absolute-value turbulence.
    Ridged {
        /// Largest layer zoom, in blocks.
        zoom: f64,
    },
    /// Fractional Brownian motion, the signed turbulence sum.
    Fbm {
        /// Largest layer zoom, in blocks.
        zoom: f64,
    },
    /// Two-layer domain warped fbm.
    DomainWarp {
        /// Largest layer zoom, in blocks.
        zoom: f64,
    },
}

impl Default for TerrainShape {
    fn default() -> Self {
        Self::Octaves {
            octaves: 4,
            persistence: 0.5,
            amplitude: 1.0,
            scale: 64.0,
        }
    }
}

impl TerrainShape {
    /// The configuration name of this shape.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Octaves { .. } => "octaves",
            Self::Amplitudes { .. } => "amplitudes",
            Self::Turbulence { .. } => "turbulence",
            Self::Billowy { .. } => "billowy",
            Self::Ridged { .. } => "ridged",
            Self::Fbm { .. } => "fbm",
            Self::DomainWarp { .. } => "domain_warp",
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Octaves {
                octaves,
                persistence,
                amplitude,
                scale,
            } => {
                if *octaves == 0 {
                    return invalid("terrain.shape.octaves must be at least 1");
                }
                if !persistence.is_finite() || !amplitude.is_finite() || *amplitude == 0.0 {
                    return invalid("terrain.shape persistence and amplitude must be finite, amplitude non-zero");
                }
                // Octave sums are divided by this series
                let total: f64 = iter::successors(Some(*amplitude), |a| Some(a * persistence))
                    .take(*octaves as usize)
                    .sum();
                if !total.is_finite() || total == 0.0 {
                    return invalid("terrain.shape octave amplitudes must have a finite, non-zero sum");
                }
                check_scale(*scale)
            }
            Self::Amplitudes { amplitudes, scale } => {
                if amplitudes.is_empty() {
                    return invalid("terrain.shape.amplitudes must not be empty");
                }
                if amplitudes.iter().any(|a| !a.is_finite()) {
                    return invalid("terrain.shape.amplitudes must all be finite");
                }
                let total: f64 = amplitudes.iter().sum();
                if !total.is_finite() || total == 0.0 {
                    return invalid("terrain.shape.amplitudes must have a finite, non-zero sum");
                }
                check_scale(*scale)
            }
            Self::Turbulence { zoom }
            | Self::Billowy { zoom }
            | Self::Ridged { zoom }
            | Self::Fbm { zoom }
            | Self::DomainWarp { zoom } => check_zoom("terrain.shape.zoom", *zoom),
        }
    }
}

/// Terrain shaping parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TerrainSettings {
    /// How column noise is composed.
    pub shape: TerrainShape,
    /// Height of a column where the noise is zero.
    pub base_height: i32,
    /// Blocks of height per unit of noise.
    pub height_scale: f64,
    /// Columns below this height are flooded with water.
    pub sea_level: i32,
    /// Lowest block layer, always bedrock.
    pub min_y: i32,
    /// Highest block layer.
    pub max_y: i32,
    /// Cave carving, disabled when absent. Needs a 3D-capable kernel.
    pub caves: Option<CaveSettings>,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            shape: TerrainShape::default(),
            base_height: 64,
            height_scale: 24.0,
            sea_level: 62,
            min_y: 0,
            max_y: 255,
            caves: None,
        }
    }
}

/// Cave carving parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaveSettings {
    /// Largest fbm layer zoom, in blocks.
    pub zoom: f64,
    /// Blocks whose 3D fbm exceeds this value are carved out.
    pub threshold: f64,
}

/// The chunk square rendered by the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// Chunk x of the center chunk.
    pub center_chunk_x: i32,
    /// Chunk z of the center chunk.
    pub center_chunk_z: i32,
    /// Chunks rendered on each side of the center chunk.
    pub radius: i32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            center_chunk_x: 0,
            center_chunk_z: 0,
            radius: 2,
        }
    }
}

impl TerraConfig {
    /// Load and validate the config at `path`.
    ///
    /// A missing file is not an error: the defaults are used and a warning is logged.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::warn!("{} not found, using default config", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config = Self::from_json5(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a JSON5 config.
    pub fn from_json5(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json5::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let terrain = &self.terrain;
        if terrain.min_y >= terrain.max_y {
            return invalid(format!(
                "terrain.min_y ({}) must be below terrain.max_y ({})",
                terrain.min_y, terrain.max_y
            ));
        }
        if !terrain.height_scale.is_finite() {
            return invalid("terrain.height_scale must be finite");
        }
        terrain.shape.validate()?;
        if let Some(caves) = &terrain.caves {
            check_zoom("terrain.caves.zoom", caves.zoom)?;
            if !caves.threshold.is_finite() {
                return invalid("terrain.caves.threshold must be finite");
            }
        }
        if self.preview.radius < 0 {
            return invalid(format!(
                "preview.radius must not be negative, got {}",
                self.preview.radius
            ));
        }
        Ok(())
    }

    /// The configured seed, or `None` when a random seed should be drawn.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        seed_from_str(&self.seed)
    }
}

/// Resolve a seed string.
///
/// Empty strings return `None`. Integers (including negative ones) are used
/// directly; anything else hashes as `h = 31 * h + byte` over its UTF-8 bytes.
#[must_use]
pub fn seed_from_str(seed: &str) -> Option<u64> {
    let seed = seed.trim();
    if seed.is_empty() {
        return None;
    }
    let value = seed.parse::<i64>().unwrap_or_else(|_| {
        let mut hash: i64 = 0;
        for byte in seed.bytes() {
            hash = hash.wrapping_mul(31).wrapping_add(i64::from(byte));
        }
        hash
    });
    Some(value as u64)
}

fn invalid<T>(message: impl Into<String>) -> Result<T, ConfigError> {
    Err(ConfigError::Invalid(message.into()))
}

fn check_scale(scale: f64) -> Result<(), ConfigError> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        invalid(format!("terrain.shape.scale must be positive, got {scale}"))
    }
}

fn check_zoom(field: &str, zoom: f64) -> Result<(), ConfigError> {
    if zoom.is_finite() && zoom >= 1.0 {
        Ok(())
    } else {
        invalid(format!("{field} must be at least 1, got {zoom}"))
    }
}
