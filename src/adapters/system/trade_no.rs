//! Trade-number generators.

use std::sync::Mutex;

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::checkout::{TradeNo, TRADE_NO_LENGTH};
use crate::ports::TradeNoGenerator;

fn sample<R: Rng>(rng: &mut R) -> TradeNo {
    let value: String = rng
        .sample_iter(&Alphanumeric)
        .take(TRADE_NO_LENGTH)
        .map(char::from)
        .collect();
    TradeNo::new(value)
}

/// Draws from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTradeNoGenerator;

impl TradeNoGenerator for RandomTradeNoGenerator {
    fn generate(&self) -> TradeNo {
        sample(&mut rand::thread_rng())
    }
}

/// Reproducible sequence from a fixed seed.
#[derive(Debug)]
pub struct SeededTradeNoGenerator {
    rng: Mutex<StdRng>,
}

impl SeededTradeNoGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl TradeNoGenerator for SeededTradeNoGenerator {
    fn generate(&self) -> TradeNo {
        // A poisoned lock still holds a usable RNG.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        sample(&mut *rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn is_well_formed(trade_no: &TradeNo) -> bool {
        trade_no.as_str().len() == TRADE_NO_LENGTH
            && trade_no.as_str().chars().all(|c| c.is_ascii_alphanumeric())
    }

    #[test]
    fn random_trade_numbers_are_twenty_alphanumerics() {
        let generator = RandomTradeNoGenerator;
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            let trade_no = generator.generate();
            assert!(is_well_formed(&trade_no), "malformed: {}", trade_no);
            seen.insert(trade_no.into_inner());
        }
        assert_eq!(seen.len(), 1000);
    }

    #[test]
    fn seeded_generator_is_reproducible() {
        let a = SeededTradeNoGenerator::new(7);
        let b = SeededTradeNoGenerator::new(7);

        for _ in 0..5 {
            assert_eq!(a.generate(), b.generate());
        }
    }

    #[test]
    fn seeded_generator_advances() {
        let generator = SeededTradeNoGenerator::new(7);
        let first = generator.generate();
        let second = generator.generate();

        assert!(is_well_formed(&first));
        assert_ne!(first, second);
    }
}
