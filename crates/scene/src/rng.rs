//! Deterministic layout randomness.
//!
//! Scene layout (building sizes, web irregularity, particle placement) must
//! be identical for the same story seed on every host, so it uses a small,
//! fully specified generator instead of whatever `rand` picks:
//!
//! SplitMix64 (Steele, Lea, Flood 2014). State advances by the golden-ratio
//! increment `0x9E3779B97F4A7C15`; output is the state passed through the
//! `(x ^ x>>30) * 0xBF58476D1CE4E5B9`, `(x ^ x>>27) * 0x94D049BB133111EB`,
//! `x ^ x>>31` finalizer. Floats take the top 53 bits.
//!
//! Per-frame effects (window flicker, hover jitter) are not layout and use an
//! injected [`rand::Rng`] instead.

use rand::RngCore;

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// SplitMix64 layout generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutRng {
    state: u64,
}

impl LayoutRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Independent generator for a named sub-stream (e.g. one building
    /// layer), so adding entities to one stream never shifts another.
    pub fn fork(&self, stream: u64) -> Self {
        let mut mixer = Self::new(self.state ^ stream.wrapping_mul(GOLDEN_GAMMA));
        Self::new(mixer.next())
    }

    pub fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        (self.next() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Uniform in `[min, max)`.
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform in `[-half, half)`.
    pub fn centered(&mut self, half: f64) -> f64 {
        self.range(-half, half)
    }
}

impl RngCore for LayoutRng {
    fn next_u32(&mut self) -> u32 {
        (self.next() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.next().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_reference_sequence() {
        // Published SplitMix64 outputs for seed 1234567.
        let mut rng = LayoutRng::new(1234567);
        assert_eq!(rng.next(), 6457827717110365317);
        assert_eq!(rng.next(), 3203168211198807973);
        assert_eq!(rng.next(), 9817491932198370423);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let mut a = LayoutRng::new(42);
        let mut b = LayoutRng::new(42);
        let xs: Vec<f64> = (0..16).map(|_| a.range(-3.0, 3.0)).collect();
        let ys: Vec<f64> = (0..16).map(|_| b.range(-3.0, 3.0)).collect();
        assert_eq!(xs, ys);
        assert!(xs.iter().all(|x| (-3.0..3.0).contains(x)));
    }

    #[test]
    fn test_forks_are_independent() {
        let root = LayoutRng::new(7);
        let mut back = root.fork(1);
        let mut fore = root.fork(2);
        assert_ne!(back.next(), fore.next());
        assert_eq!(root.fork(1), root.fork(1));
    }

    #[test]
    fn test_usable_as_rand_rng() {
        let mut rng = LayoutRng::new(9);
        let v: f64 = rng.random_range(0.8..1.2);
        assert!((0.8..1.2).contains(&v));
        let mut buf = [0u8; 13];
        rng.fill_bytes(&mut buf);
        assert!(buf.iter().any(|b| *b != 0));
    }
}
