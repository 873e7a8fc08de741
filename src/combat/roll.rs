//! Inclusive damage ranges

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive uniform integer range, e.g. `1..=4`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRange {
    pub min: u32,
    pub max: u32,
}

impl DamageRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    /// Draw one value, both bounds included
    pub fn roll<R: Rng>(&self, rng: &mut R) -> u32 {
        if self.min >= self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_roll_covers_both_bounds() {
        let range = DamageRange::new(1, 4);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut seen = [false; 5];
        for _ in 0..500 {
            let value = range.roll(&mut rng);
            assert!((1..=4).contains(&value));
            seen[value as usize] = true;
        }
        assert!(seen[1] && seen[2] && seen[3] && seen[4]);
    }

    #[test]
    fn test_degenerate_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(DamageRange::new(3, 3).roll(&mut rng), 3);
    }
}
