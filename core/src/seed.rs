//! Random seeds for the posts appended by infinite scroll.

use log::warn;

pub const SEED_LEN: usize = 6;

pub trait SeedSource {
    fn next_seed(&mut self) -> String;
}

/// Seeds from the platform RNG (`crypto.getRandomValues` in the browser).
#[derive(Default)]
pub struct RandomSeeds {
    fallback: u64,
}

impl SeedSource for RandomSeeds {
    fn next_seed(&mut self) -> String {
        let mut bytes = [0u8; 8];
        let value = match getrandom::getrandom(&mut bytes) {
            Ok(()) => u64::from_le_bytes(bytes),
            Err(err) => {
                warn!("random source unavailable, using counter seed: {}", err);
                self.fallback = self.fallback.wrapping_add(0x9e37_79b9_7f4a_7c15);
                self.fallback
            }
        };

        let mut seed = to_base36(value);
        seed.truncate(SEED_LEN);
        seed
    }
}

/// Replays a fixed list of seeds, cycling when exhausted.
pub struct FixedSeeds {
    seeds: Vec<String>,
    next: usize,
}

impl FixedSeeds {
    pub fn new<S: Into<String>>(seeds: Vec<S>) -> Self {
        FixedSeeds {
            seeds: seeds.into_iter().map(Into::into).collect(),
            next: 0,
        }
    }
}

impl SeedSource for FixedSeeds {
    fn next_seed(&mut self) -> String {
        if self.seeds.is_empty() {
            return "seed".to_owned();
        }
        let seed = self.seeds[self.next % self.seeds.len()].clone();
        self.next += 1;
        seed
    }
}

pub fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_owned();
    }

    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();

    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base36_digits() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }

    #[test]
    fn random_seed_shape() {
        let seed = RandomSeeds::default().next_seed();

        assert!(!seed.is_empty() && seed.len() <= SEED_LEN);
        assert!(seed.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn fixed_seeds_cycle() {
        let mut seeds = FixedSeeds::new(vec!["a", "b"]);
        assert_eq!(seeds.next_seed(), "a");
        assert_eq!(seeds.next_seed(), "b");
        assert_eq!(seeds.next_seed(), "a");
    }
}
