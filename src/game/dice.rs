use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A six-sided die. The engine accepts any roll in `1..=6`, this is just a
/// convenient source of them.
pub struct Die {
    rng: StdRng,
}

impl Die {
    pub fn new() -> Self {
        Die {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Die with a reproducible roll sequence.
    pub fn seeded(seed: u64) -> Self {
        Die {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn roll(&mut self) -> u8 {
        self.rng.random_range(1..=6)
    }
}

impl Default for Die {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolls_in_range() {
        let mut die = Die::new();
        for _ in 0..1000 {
            let roll = die.roll();
            assert!((1..=6).contains(&roll), "roll {roll} out of range");
        }
    }

    #[test]
    fn test_every_face_appears() {
        let mut die = Die::seeded(7);
        let mut seen = [false; 6];
        for _ in 0..600 {
            seen[(die.roll() - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = Die::seeded(42);
        let mut b = Die::seeded(42);
        let rolls_a: Vec<u8> = (0..50).map(|_| a.roll()).collect();
        let rolls_b: Vec<u8> = (0..50).map(|_| b.roll()).collect();
        assert_eq!(rolls_a, rolls_b);
    }
}
