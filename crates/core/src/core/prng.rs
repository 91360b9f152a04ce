// Small seeded PRNG for particle attributes and confetti launch jitter.
//
// Not cryptographically secure. Determinism matters more than quality here:
// the same seed must rebuild the same field on every platform.

#[derive(Debug, Clone)]
pub struct Prng {
    state: u64,
}

impl Prng {
    pub fn new(seed: u64) -> Self {
        // xorshift has a fixed point at zero.
        let seed = if seed == 0 { 0x9E3779B97F4A7C15 } else { seed };
        Self { state: seed }
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        // xorshift64*
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn next_f32_01(&mut self) -> f32 {
        // 24 bits keep the result strictly below 1.0 after rounding to f32.
        let x = self.next_u32() >> 8;
        (x as f32) / ((1u32 << 24) as f32)
    }

    /// Uniform in `[low, high)`.
    #[inline]
    pub fn gen_range_f32(&mut self, low: f32, high: f32) -> f32 {
        scale_unit(self.next_f32_01(), low, high)
    }
}

/// Map `unit` in `[0, 1)` onto `[low, high)`.
///
/// The product is formed in f64; rounding back to f32 can still land on
/// `high`, so that case steps down to the next representable value.
pub fn scale_unit(unit: f32, low: f32, high: f32) -> f32 {
    let v = (low as f64 + (high as f64 - low as f64) * unit as f64) as f32;
    if v >= high && high > low {
        next_below(high)
    } else {
        v
    }
}

fn next_below(x: f32) -> f32 {
    if x > 0.0 {
        f32::from_bits(x.to_bits() - 1)
    } else if x < 0.0 {
        f32::from_bits(x.to_bits() + 1)
    } else {
        -f32::from_bits(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Prng::new(7);
        let mut b = Prng::new(7);
        for _ in 0..32 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn zero_seed_is_not_stuck() {
        let mut p = Prng::new(0);
        let first = p.next_u32();
        let second = p.next_u32();
        assert_ne!(first, second);
    }

    #[test]
    fn unit_floats_stay_below_one() {
        let mut p = Prng::new(99);
        for _ in 0..10_000 {
            let x = p.next_f32_01();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn largest_unit_value_stays_below_high() {
        let top = 1.0 - 1.0 / (1u32 << 24) as f32;
        for (low, high) in [(0.4, 1.0), (0.03, 0.07), (-1.0, 0.0), (-2.0, -0.5), (0.0, 1.0)] {
            let v = scale_unit(top, low, high);
            assert!(v < high, "scale_unit(top, {low}, {high}) = {v}");
            assert!(v >= low);
        }
        assert_eq!(scale_unit(0.0, 0.4, 1.0), 0.4);
    }

    #[test]
    fn ranged_draws_stay_in_bounds() {
        let mut p = Prng::new(3);
        for _ in 0..50_000 {
            let v = p.gen_range_f32(0.4, 1.0);
            assert!((0.4..1.0).contains(&v));
        }
    }
}
