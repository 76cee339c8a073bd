//! Random implementations.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::infrastructure::ports::RandomPort;

/// System random - uses the thread-local RNG.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_index(&self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper.max(1))
    }
}

/// Seeded random - the same seed replays the same run.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomPort for SeededRandom {
    fn gen_index(&self, upper: usize) -> usize {
        // A poisoned generator is still a valid generator.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(0..upper.max(1))
    }
}

/// Scripted random for testing: replays `rolls` in order, each reduced
/// modulo `upper`, then keeps returning 0.
#[cfg(test)]
pub struct ScriptedRandom(Mutex<std::collections::VecDeque<usize>>);

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(rolls: impl IntoIterator<Item = usize>) -> Self {
        Self(Mutex::new(rolls.into_iter().collect()))
    }
}

#[cfg(test)]
impl RandomPort for ScriptedRandom {
    fn gen_index(&self, upper: usize) -> usize {
        let next = self
            .0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(0);
        next % upper.max(1)
    }
}
