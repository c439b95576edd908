//! Column heights and cave density from a single noise kernel.
//!
//! Heights come from the configured [`TerrainShape`] evaluated in 2D at the column's
//! block coordinates. Caves use 3D fbm, so they need a kernel that implements
//! [`NoiseKernel3d`](terra_utils::noise::NoiseKernel3d); the 3D kernel is resolved
//! once at construction.

use glam::{DVec2, DVec3};
use terra_utils::noise::{Fractal, KernelType, NoiseError, NoiseKernel3dKind, NoiseKernelKind};
use thiserror::Error;

use crate::config::{TerrainSettings, TerrainShape};

/// Errors raised while setting up world generation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WorldgenError {
    /// The chosen kernel cannot serve a requested feature.
    #[error(transparent)]
    Noise(#[from] NoiseError),
}

/// Samples terrain height and cave density for a world.
#[derive(Debug, Clone)]
pub struct HeightSampler {
    kernel: NoiseKernelKind,
    /// Same seed and algorithm as `kernel`; present exactly when caves are enabled.
    cave_kernel: Option<NoiseKernel3dKind>,
    settings: TerrainSettings,
}

impl HeightSampler {
    /// Build the kernel for `seed` and bind it to the terrain settings.
    ///
    /// Fails with [`NoiseError::Unsupported3d`] when caves are enabled but the kernel
    /// has no 3D evaluation.
    pub fn new(
        seed: u64,
        kernel_type: KernelType,
        settings: &TerrainSettings,
    ) -> Result<Self, WorldgenError> {
        let kernel = NoiseKernelKind::new(kernel_type, seed);
        let cave_kernel = settings
            .caves
            .as_ref()
            .map(|_| NoiseKernel3dKind::new(kernel_type, seed))
            .transpose()?;
        log::debug!(
            "Height sampler using {kernel_type} noise with {} shape",
            settings.shape.name()
        );

        Ok(Self {
            kernel,
            cave_kernel,
            settings: settings.clone(),
        })
    }

    /// The kernel driving this sampler.
    #[must_use]
    pub const fn kernel(&self) -> &NoiseKernelKind {
        &self.kernel
    }

    /// The terrain settings this sampler was built with.
    #[must_use]
    pub const fn settings(&self) -> &TerrainSettings {
        &self.settings
    }

    /// Terrain noise at the column `(x, z)`, in block coordinates.
    #[must_use]
    pub fn noise_at(&self, x: i32, z: i32) -> f64 {
        let point = DVec2::new(f64::from(x), f64::from(z));
        let kernel = &self.kernel;
        match &self.settings.shape {
            TerrainShape::Octaves {
                octaves,
                persistence,
                amplitude,
                scale,
            } => kernel.octaves(point / *scale, *octaves, *persistence, *amplitude),
            TerrainShape::Amplitudes { amplitudes, scale } => {
                kernel.octaves_with_amplitudes(point / *scale, amplitudes)
            }
            TerrainShape::Turbulence { zoom } => kernel.turbulence(point, *zoom),
            TerrainShape::Billowy { zoom } => kernel.turbulence_billowy(point, *zoom),
            TerrainShape::Ridged { zoom } => kernel.turbulence_ridged(point, *zoom),
            TerrainShape::Fbm { zoom } => kernel.fbm(point, *zoom),
            TerrainShape::DomainWarp { zoom } => kernel.domain_warp(point, *zoom),
        }
    }

    /// Height of the terrain surface at the column `(x, z)`.
    ///
    /// `base_height + round(noise * height_scale)`, clamped to the world's height range.
    #[must_use]
    pub fn column_height(&self, x: i32, z: i32) -> i32 {
        let offset = (self.noise_at(x, z) * self.settings.height_scale).round();
        // `as` saturates and maps NaN to 0
        self.settings
            .base_height
            .saturating_add(offset as i32)
            .clamp(self.settings.min_y, self.settings.max_y)
    }

    /// Whether the block at `(x, y, z)` is carved out as cave.
    ///
    /// Always `false` when caves are disabled.
    #[must_use]
    pub fn is_cave(&self, x: i32, y: i32, z: i32) -> bool {
        let (Some(caves), Some(kernel)) = (&self.settings.caves, &self.cave_kernel) else {
            return false;
        };
        let point = DVec3::new(f64::from(x), f64::from(y), f64::from(z));
        kernel.fbm(point, caves.zoom) > caves.threshold
    }

    /// Whether cave carving is enabled.
    #[must_use]
    pub const fn has_caves(&self) -> bool {
        self.cave_kernel.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CaveSettings;

    fn settings_with(shape: TerrainShape) -> TerrainSettings {
        TerrainSettings {
            shape,
            ..TerrainSettings::default()
        }
    }

    #[test]
    fn test_caves_need_3d_kernel() {
        let settings = TerrainSettings {
            caves: Some(CaveSettings {
                zoom: 16.0,
                threshold: 0.5,
            }),
            ..TerrainSettings::default()
        };
        let err = HeightSampler::new(0, KernelType::SimplexTables, &settings)
            .expect_err("simplex tables has no 3D");
        assert_eq!(
            err,
            WorldgenError::Noise(NoiseError::Unsupported3d(KernelType::SimplexTables))
        );

        for kernel_type in KernelType::ALL.into_iter().filter(|t| t.supports_3d()) {
            assert!(HeightSampler::new(0, kernel_type, &settings).is_ok());
        }
    }

    #[test]
    fn test_simplex_tables_without_caves() {
        let sampler = HeightSampler::new(3, KernelType::SimplexTables, &TerrainSettings::default())
            .expect("2D-only kernel is fine without caves");
        assert!(!sampler.has_caves());
        assert!(!sampler.is_cave(0, 10, 0));
    }

    #[test]
    fn test_heights_clamped_to_world() {
        let settings = TerrainSettings {
            height_scale: 1e9,
            min_y: 0,
            max_y: 127,
            ..TerrainSettings::default()
        };
        let sampler = HeightSampler::new(9, KernelType::PerlinClassic, &settings)
            .expect("valid settings");
        for x in -40..40 {
            let h = sampler.column_height(x * 7, x * 3);
            assert!((0..=127).contains(&h), "height {h} at {x}");
        }
    }

    #[test]
    fn test_zero_scale_is_flat_at_base() {
        let settings = TerrainSettings {
            height_scale: 0.0,
            base_height: 70,
            ..TerrainSettings::default()
        };
        let sampler =
            HeightSampler::new(1, KernelType::PerlinImproved, &settings).expect("valid settings");
        assert!((-20..20).all(|x| sampler.column_height(x, -x) == 70));
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_single_octave_shape_is_raw_noise() {
        let settings = settings_with(TerrainShape::Octaves {
            octaves: 1,
            persistence: 0.5,
            amplitude: 1.0,
            scale: 32.0,
        });
        let sampler =
            HeightSampler::new(5, KernelType::PerlinImproved, &settings).expect("valid settings");
        let expected = sampler
            .kernel()
            .octaves(DVec2::new(100.0 / 32.0, -50.0 / 32.0), 1, 0.5, 1.0);
        assert_eq!(sampler.noise_at(100, -50), expected);
    }

    #[test]
    fn test_every_shape_is_finite() {
        let shapes = [
            TerrainShape::default(),
            TerrainShape::Amplitudes {
                amplitudes: vec![1.0, 0.3],
                scale: 40.0,
            },
            TerrainShape::Turbulence { zoom: 32.0 },
            TerrainShape::Billowy { zoom: 32.0 },
            TerrainShape::Ridged { zoom: 32.0 },
            TerrainShape::Fbm { zoom: 32.0 },
            TerrainShape::DomainWarp { zoom: 32.0 },
        ];
        for shape in shapes {
            let name = shape.name();
            let sampler = HeightSampler::new(77, KernelType::SimplexPatent, &settings_with(shape))
                .expect("valid settings");
            for x in -5..5 {
                assert!(sampler.noise_at(x * 13, x * 5).is_finite(), "{name}");
            }
        }
    }

    #[test]
    fn test_cave_density_uses_3d_fbm() {
        let caves = CaveSettings {
            zoom: 16.0,
            threshold: 0.1,
        };
        let settings = TerrainSettings {
            caves: Some(caves),
            ..TerrainSettings::default()
        };
        let sampler =
            HeightSampler::new(31, KernelType::SimplexPatent, &settings).expect("valid settings");
        let kernel = NoiseKernel3dKind::new(KernelType::SimplexPatent, 31).expect("3D kernel");
        for (x, y, z) in [(0, 10, 0), (-17, 40, 33), (250, 3, -90), (5, 63, 5)] {
            let point = DVec3::new(f64::from(x), f64::from(y), f64::from(z));
            assert_eq!(
                sampler.is_cave(x, y, z),
                kernel.fbm(point, caves.zoom) > caves.threshold,
                "({x}, {y}, {z})"
            );
        }
    }

    #[test]
    fn test_cave_threshold_extremes() {
        let mut settings = TerrainSettings {
            caves: Some(CaveSettings {
                zoom: 8.0,
                threshold: -10.0,
            }),
            ..TerrainSettings::default()
        };
        let everywhere =
            HeightSampler::new(4, KernelType::PerlinClassic, &settings).expect("valid settings");
        assert!((0..20).all(|y| everywhere.is_cave(3, y, 5)));

        settings.caves = Some(CaveSettings {
            zoom: 8.0,
            threshold: 10.0,
        });
        let nowhere =
            HeightSampler::new(4, KernelType::PerlinClassic, &settings).expect("valid settings");
        assert!((0..20).all(|y| !nowhere.is_cave(3, y, 5)));
    }
}
