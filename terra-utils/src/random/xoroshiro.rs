//! Xoroshiro128++ random stream.

use crate::random::Random;

/// Golden ratio increment used when expanding a 64-bit seed.
const GOLDEN_RATIO_64: u64 = 0x9E37_79B9_7F4A_7C15;
/// Fractional part of `sqrt(2)`, xored into the seed before expansion.
const SILVER_RATIO_64: u64 = 0x6A09_E667_F3BC_C909;

/// Xoroshiro128++ generator with 128 bits of state.
#[derive(Debug, Clone)]
pub struct Xoroshiro {
    lo: u64,
    hi: u64,
}

impl Xoroshiro {
    /// Creates a generator from a 64-bit seed.
    ///
    /// The seed is expanded to 128 bits with the stafford-13 mixer so that
    /// nearby seeds produce unrelated streams.
    #[must_use]
    pub const fn from_seed(seed: u64) -> Self {
        let lo = seed ^ SILVER_RATIO_64;
        let hi = lo.wrapping_add(GOLDEN_RATIO_64);
        Self::from_state(mix_stafford_13(lo), mix_stafford_13(hi))
    }

    /// Creates a generator from raw state.
    ///
    /// An all-zero state would only ever produce zeros, so it is replaced
    /// with the expansion constants.
    #[must_use]
    pub const fn from_state(lo: u64, hi: u64) -> Self {
        if lo == 0 && hi == 0 {
            Self {
                lo: GOLDEN_RATIO_64,
                hi: SILVER_RATIO_64,
            }
        } else {
            Self { lo, hi }
        }
    }
}

impl Random for Xoroshiro {
    fn next_u64(&mut self) -> u64 {
        let s0 = self.lo;
        let mut s1 = self.hi;
        let result = s0.wrapping_add(s1).rotate_left(17).wrapping_add(s0);

        s1 ^= s0;
        self.lo = s0.rotate_left(49) ^ s1 ^ (s1 << 21);
        self.hi = s1.rotate_left(28);

        result
    }
}

const fn mix_stafford_13(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xoroshiro_deterministic() {
        let mut rng1 = Xoroshiro::from_seed(12345);
        let mut rng2 = Xoroshiro::from_seed(12345);
        for _ in 0..100 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_xoroshiro_seeds_diverge() {
        let mut rng1 = Xoroshiro::from_seed(0);
        let mut rng2 = Xoroshiro::from_seed(1);
        let same = (0..16).filter(|_| rng1.next_u64() == rng2.next_u64()).count();
        assert_eq!(same, 0);
    }

    #[test]
    fn test_zero_state_is_replaced() {
        let mut rng = Xoroshiro::from_state(0, 0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn test_next_f64_range() {
        let mut rng = Xoroshiro::from_seed(42);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "{v} outside [0, 1)");
        }
    }

    #[test]
    fn test_next_i32_bounded_range() {
        let mut rng = Xoroshiro::from_seed(42);
        let mut hits = [0u32; 7];
        for _ in 0..7_000 {
            let v = rng.next_i32_bounded(7);
            assert!((0..7).contains(&v), "{v} outside [0, 7)");
            hits[v as usize] += 1;
        }
        assert!(hits.iter().all(|&h| h > 700), "skewed distribution {hits:?}");
    }
}
