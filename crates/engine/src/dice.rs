//! The rand-backed dice roller
//!
//! Implements the rules core's dice port. Advantage and disadvantage roll
//! two d20s and keep the higher/lower; both dice land in `rolls` so the
//! host can show the discarded die. Setting both flags cancels to a single
//! die.

use battlemat_rules::{D20Roll, DiceRoller, RollOptions};
use rand::rngs::ThreadRng;
use rand::Rng;

/// Dice roller over any `rand` RNG
///
/// Production code uses [`RandRoller::new`] (thread RNG); tests seed a
/// `StdRng` through [`RandRoller::with_rng`] for reproducible sequences.
pub struct RandRoller<R: Rng> {
    rng: R,
}

impl RandRoller<ThreadRng> {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for RandRoller<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandRoller<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DiceRoller for RandRoller<R> {
    fn roll_d20(&mut self, modifier: i32, options: RollOptions) -> D20Roll {
        let first: i32 = self.rng.gen_range(1..=20);
        let advantage = options.advantage && !options.disadvantage;
        let disadvantage = options.disadvantage && !options.advantage;

        if advantage || disadvantage {
            let second: i32 = self.rng.gen_range(1..=20);
            let kept = if advantage {
                first.max(second)
            } else {
                first.min(second)
            };
            D20Roll::from_kept_die(kept, vec![first, second], modifier)
        } else {
            D20Roll::from_kept_die(first, vec![first], modifier)
        }
    }
}
