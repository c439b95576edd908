//! Seeded random streams used to build noise tables.
//!
//! Kernels consume the stream only during construction, so the same seed always
//! produces the same gradient and permutation tables.

pub mod xoroshiro;

/// A sequential source of pseudo-random values.
pub trait Random {
    /// Returns the next 64 random bits.
    fn next_u64(&mut self) -> u64;

    /// Returns a uniformly distributed value in `[0, 1)` with 53 bits of precision.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * f64::from_bits(0x3CA0_0000_0000_0000)
    }

    /// Returns a uniformly distributed value in `[0, bound)`.
    ///
    /// `bound` must be positive.
    fn next_i32_bounded(&mut self, bound: i32) -> i32 {
        debug_assert!(bound > 0, "bound must be positive, got {bound}");
        let bound = u64::from(bound.unsigned_abs());
        let mut product = u64::from(self.next_u64() as u32) * bound;
        let mut low = product & 0xFFFF_FFFF;
        if low < bound {
            // Reject the biased low range (Lemire's method)
            let threshold = (bound as u32).wrapping_neg() % bound as u32;
            while low < u64::from(threshold) {
                product = u64::from(self.next_u64() as u32) * bound;
                low = product & 0xFFFF_FFFF;
            }
        }
        (product >> 32) as i32
    }

    /// Returns a uniformly distributed value in `[-1, 1)`.
    fn next_signed_unit(&mut self) -> f64 {
        self.next_f64() * 2.0 - 1.0
    }
}

/// Shuffles `values` in place with a forward Fisher-Yates pass.
pub fn shuffle<T, R: Random + ?Sized>(values: &mut [T], random: &mut R) {
    let len = values.len();
    for i in 0..len {
        let offset = random.next_i32_bounded((len - i) as i32) as usize;
        values.swap(i, i + offset);
    }
}

/// Returns the identity permutation `0..=255` shuffled by `random`.
pub fn shuffled_permutation<R: Random + ?Sized>(random: &mut R) -> [u8; 256] {
    let mut p = [0u8; 256];
    for (i, val) in p.iter_mut().enumerate() {
        *val = i as u8;
    }
    shuffle(&mut p, random);
    p
}
