//! The kernel evaluation contract and runtime kernel selection.

use std::fmt;

use enum_dispatch::enum_dispatch;
use serde::Deserialize;
use thiserror::Error;

use crate::noise::{PerlinClassic, PerlinImproved, SimplexPatent, SimplexTables};

/// Raw 2D noise evaluation.
///
/// Implementations are immutable after construction: the same kernel queried at the
/// same point returns a bit-identical value. Output range is kernel specific and not
/// normalized.
#[enum_dispatch]
pub trait NoiseKernel {
    /// Sample raw noise at a 2D point.
    fn value_2d(&self, x: f64, y: f64) -> f64;
}

/// Raw 3D noise evaluation, for kernels that support it.
///
/// [`SimplexTables`] does not implement this trait, so a 3D query against it is
/// rejected at compile time.
#[enum_dispatch]
pub trait NoiseKernel3d: NoiseKernel {
    /// Sample raw noise at a 3D point.
    fn value_3d(&self, x: f64, y: f64, z: f64) -> f64;
}

/// Errors raised when a kernel is asked for something it cannot do.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NoiseError {
    /// The kernel has no 3D evaluation.
    #[error("{0} noise does not support 3D evaluation")]
    Unsupported3d(KernelType),
}

/// Identifies one of the four kernel algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelType {
    /// Bit-pattern gradient simplex noise.
    SimplexPatent,
    /// Permutation-table simplex noise (2D only).
    SimplexTables,
    /// Improved (2002) Perlin noise.
    #[default]
    PerlinImproved,
    /// Classic (1985) Perlin noise.
    PerlinClassic,
}

impl KernelType {
    /// All kernel types, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::SimplexPatent,
        Self::SimplexTables,
        Self::PerlinImproved,
        Self::PerlinClassic,
    ];

    /// Whether kernels of this type implement 3D evaluation.
    #[must_use]
    pub const fn supports_3d(self) -> bool {
        !matches!(self, Self::SimplexTables)
    }

    /// The configuration name of this kernel type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SimplexPatent => "simplex_patent",
            Self::SimplexTables => "simplex_tables",
            Self::PerlinImproved => "perlin_improved",
            Self::PerlinClassic => "perlin_classic",
        }
    }
}

impl fmt::Display for KernelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A kernel chosen at runtime.
///
/// 2D sampling uses enum dispatch. Occasional 3D queries can go through
/// [`as_3d`](Self::as_3d), which fails with [`NoiseError::Unsupported3d`] for
/// [`SimplexTables`] and returns a trait object; repeated 3D sampling should use
/// [`NoiseKernel3dKind`].
#[enum_dispatch(NoiseKernel)]
#[derive(Debug, Clone)]
pub enum NoiseKernelKind {
    /// Bit-pattern gradient simplex noise.
    SimplexPatent(SimplexPatent),
    /// Permutation-table simplex noise.
    SimplexTables(SimplexTables),
    /// Improved Perlin noise.
    PerlinImproved(PerlinImproved),
    /// Classic Perlin noise.
    PerlinClassic(PerlinClassic),
}

impl NoiseKernelKind {
    /// Build the kernel of the given type from a seed.
    #[must_use]
    pub fn new(kernel_type: KernelType, seed: u64) -> Self {
        match kernel_type {
            KernelType::SimplexPatent => Self::SimplexPatent(SimplexPatent::new(seed)),
            KernelType::SimplexTables => Self::SimplexTables(SimplexTables::new(seed)),
            KernelType::PerlinImproved => Self::PerlinImproved(PerlinImproved::new(seed)),
            KernelType::PerlinClassic => Self::PerlinClassic(PerlinClassic::new(seed)),
        }
    }

    /// The algorithm this kernel runs.
    #[must_use]
    pub const fn kernel_type(&self) -> KernelType {
        match self {
            Self::SimplexPatent(_) => KernelType::SimplexPatent,
            Self::SimplexTables(_) => KernelType::SimplexTables,
            Self::PerlinImproved(_) => KernelType::PerlinImproved,
            Self::PerlinClassic(_) => KernelType::PerlinClassic,
        }
    }

    /// Borrow this kernel as a 3D-capable kernel.
    ///
    /// Callers sampling 3D on a hot path should build a [`NoiseKernel3dKind`] once
    /// instead, which keeps enum dispatch.
    pub fn as_3d(&self) -> Result<&dyn NoiseKernel3d, NoiseError> {
        match self {
            Self::SimplexPatent(kernel) => Ok(kernel),
            Self::PerlinImproved(kernel) => Ok(kernel),
            Self::PerlinClassic(kernel) => Ok(kernel),
            Self::SimplexTables(_) => Err(NoiseError::Unsupported3d(KernelType::SimplexTables)),
        }
    }

    /// Sample raw 3D noise, or fail if the kernel has no 3D evaluation.
    pub fn try_value_3d(&self, x: f64, y: f64, z: f64) -> Result<f64, NoiseError> {
        Ok(self.as_3d()?.value_3d(x, y, z))
    }
}

/// A 3D-capable kernel chosen at runtime.
///
/// The capability check happens once, at construction; sampling is then infallible
/// and goes through enum dispatch.
#[enum_dispatch(NoiseKernel, NoiseKernel3d)]
#[derive(Debug, Clone)]
pub enum NoiseKernel3dKind {
    /// Bit-pattern gradient simplex noise.
    SimplexPatent(SimplexPatent),
    /// Improved Perlin noise.
    PerlinImproved(PerlinImproved),
    /// Classic Perlin noise.
    PerlinClassic(PerlinClassic),
}

impl NoiseKernel3dKind {
    /// Build the 3D kernel of the given type from a seed, or fail if the type has
    /// no 3D evaluation.
    pub fn new(kernel_type: KernelType, seed: u64) -> Result<Self, NoiseError> {
        match kernel_type {
            KernelType::SimplexPatent => Ok(Self::SimplexPatent(SimplexPatent::new(seed))),
            KernelType::PerlinImproved => Ok(Self::PerlinImproved(PerlinImproved::new(seed))),
            KernelType::PerlinClassic => Ok(Self::PerlinClassic(PerlinClassic::new(seed))),
            KernelType::SimplexTables => Err(NoiseError::Unsupported3d(kernel_type)),
        }
    }

    /// The algorithm this kernel runs.
    #[must_use]
    pub const fn kernel_type(&self) -> KernelType {
        match self {
            Self::SimplexPatent(_) => KernelType::SimplexPatent,
            Self::PerlinImproved(_) => KernelType::PerlinImproved,
            Self::PerlinClassic(_) => KernelType::PerlinClassic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_type() {
        for kernel_type in KernelType::ALL {
            let kernel = NoiseKernelKind::new(kernel_type, 11);
            assert_eq!(kernel.kernel_type(), kernel_type);
            assert_eq!(kernel.as_3d().is_ok(), kernel_type.supports_3d());
        }
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_dispatch_matches_direct_call() {
        let direct = PerlinClassic::new(5);
        let kind = NoiseKernelKind::from(PerlinClassic::new(5));
        assert_eq!(kind.value_2d(3.7, -1.2), direct.value_2d(3.7, -1.2));
        assert_eq!(
            kind.try_value_3d(3.7, -1.2, 0.4),
            Ok(direct.value_3d(3.7, -1.2, 0.4))
        );
    }

    #[test]
    fn test_simplex_tables_rejects_3d() {
        let kernel = NoiseKernelKind::new(KernelType::SimplexTables, 0);
        assert_eq!(
            kernel.try_value_3d(0.5, 0.5, 0.5),
            Err(NoiseError::Unsupported3d(KernelType::SimplexTables))
        );
        assert_eq!(
            NoiseError::Unsupported3d(KernelType::SimplexTables).to_string(),
            "simplex_tables noise does not support 3D evaluation"
        );
    }

    #[test]
    fn test_3d_kind_matches_runtime_kind() {
        for kernel_type in KernelType::ALL {
            let kind = NoiseKernelKind::new(kernel_type, 21);
            match NoiseKernel3dKind::new(kernel_type, 21) {
                Ok(kernel_3d) => {
                    assert_eq!(kernel_3d.kernel_type(), kernel_type);
                    assert_eq!(
                        kernel_3d.value_3d(1.3, -0.7, 4.1).to_bits(),
                        kind.try_value_3d(1.3, -0.7, 4.1).map(f64::to_bits).unwrap_or_default()
                    );
                    assert_eq!(
                        kernel_3d.value_2d(1.3, -0.7).to_bits(),
                        kind.value_2d(1.3, -0.7).to_bits()
                    );
                }
                Err(err) => {
                    assert_eq!(err, NoiseError::Unsupported3d(kernel_type));
                    assert!(!kernel_type.supports_3d());
                }
            }
        }
    }

    #[test]
    fn test_kernel_type_deserialize() {
        #[derive(Deserialize)]
        struct Wrapper {
            kernel: KernelType,
        }
        let parsed: Wrapper =
            serde_json5::from_str("{ kernel: 'perlin_classic' }").expect("valid json5");
        assert_eq!(parsed.kernel, KernelType::PerlinClassic);
    }
}
