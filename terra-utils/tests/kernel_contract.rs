//! Cross-kernel contract tests.
//!
//! Every kernel must be deterministic for a given seed, shareable across threads
//! without synchronization, and reachable through the runtime [`NoiseKernelKind`].

use std::thread;

use glam::{DVec2, DVec3};
use terra_utils::noise::{
    Fractal, KernelType, NoiseError, NoiseKernel, NoiseKernel3d, NoiseKernel3dKind,
    NoiseKernelKind, PerlinClassic, PerlinImproved, SimplexPatent, SimplexTables,
};

const fn assert_send_sync<T: Send + Sync>() {}

const _: () = {
    assert_send_sync::<PerlinClassic>();
    assert_send_sync::<PerlinImproved>();
    assert_send_sync::<SimplexPatent>();
    assert_send_sync::<SimplexTables>();
    assert_send_sync::<NoiseKernelKind>();
    assert_send_sync::<NoiseKernel3dKind>();
};

fn grid() -> Vec<DVec2> {
    (-16..16)
        .flat_map(|x| (-16..16).map(move |z| DVec2::new(f64::from(x) * 0.37, f64::from(z) * 0.41)))
        .collect()
}

fn sample_grid(kernel: &NoiseKernelKind) -> Vec<f64> {
    grid()
        .into_iter()
        .map(|p| kernel.octaves(p, 4, 0.5, 1.0))
        .collect()
}

#[test]
fn every_kernel_is_deterministic_per_seed() {
    for kernel_type in KernelType::ALL {
        let a = NoiseKernelKind::new(kernel_type, 1337);
        let b = NoiseKernelKind::new(kernel_type, 1337);
        let first = sample_grid(&a);
        let second = sample_grid(&b);
        assert!(
            first.iter().zip(&second).all(|(x, y)| x.to_bits() == y.to_bits()),
            "{kernel_type} is not deterministic"
        );
    }
}

#[test]
fn seeded_kernels_depend_on_seed() {
    for kernel_type in KernelType::ALL {
        let a = sample_grid(&NoiseKernelKind::new(kernel_type, 1));
        let b = sample_grid(&NoiseKernelKind::new(kernel_type, 2));
        let differs = a.iter().zip(&b).any(|(x, y)| x.to_bits() != y.to_bits());
        assert_eq!(
            differs,
            kernel_type != KernelType::SimplexPatent,
            "{kernel_type} seed dependence"
        );
    }
}

#[test]
fn shared_kernel_gives_identical_results_across_threads() {
    for kernel_type in KernelType::ALL {
        let kernel = NoiseKernelKind::new(kernel_type, 99);
        let expected = sample_grid(&kernel);

        let results: Vec<Vec<f64>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| sample_grid(&kernel)))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("sampling thread panicked"))
                .collect()
        });

        for result in results {
            assert!(
                result.iter().zip(&expected).all(|(x, y)| x.to_bits() == y.to_bits()),
                "{kernel_type} differs across threads"
            );
        }
    }
}

#[test]
fn three_dimensional_support_matches_kernel_type() {
    for kernel_type in KernelType::ALL {
        let kernel = NoiseKernelKind::new(kernel_type, 5);
        match kernel.try_value_3d(0.3, 1.7, -2.2) {
            Ok(v) => {
                assert!(kernel_type.supports_3d());
                assert!(v.is_finite());
            }
            Err(NoiseError::Unsupported3d(t)) => {
                assert_eq!(t, kernel_type);
                assert!(!kernel_type.supports_3d());
            }
        }
    }
}

#[test]
fn runtime_kernel_matches_concrete_kernel() {
    let concrete = PerlinClassic::new(2024);
    let kind = NoiseKernelKind::new(KernelType::PerlinClassic, 2024);
    let kind_3d = kind.as_3d().expect("classic perlin supports 3D");
    for p in grid() {
        assert_eq!(
            concrete.value_2d(p.x, p.y).to_bits(),
            kind.value_2d(p.x, p.y).to_bits()
        );
        let p3 = DVec3::new(p.x, 0.5, p.y);
        assert_eq!(
            concrete.value_3d(p3.x, p3.y, p3.z).to_bits(),
            kind_3d.value_3d(p3.x, p3.y, p3.z).to_bits()
        );
        assert_eq!(
            concrete.domain_warp(p3, 8.0).to_bits(),
            kind_3d.domain_warp(p3, 8.0).to_bits()
        );
    }
}
