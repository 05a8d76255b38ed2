use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Injectable random source for one battle.
///
/// Every draw names its reason so scripted tests can be read top to bottom
/// and an exhausted script points at the exact roll that overran it. Live
/// battles use the seeded variant; the seed lives with the battle record, so
/// a replayed action makes the same draws.
#[derive(Debug, Clone)]
pub struct BattleRng {
    source: RngSource,
}

#[derive(Debug, Clone)]
enum RngSource {
    Scripted { outcomes: Vec<u16>, index: usize },
    Seeded(StdRng),
}

impl BattleRng {
    /// A deterministic source seeded per battle.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(StdRng::seed_from_u64(seed)),
        }
    }

    /// A scripted source for tests. Outcomes are consumed in order and must
    /// be in 1..=10_000; running out panics with the reason of the draw that
    /// overran the script.
    pub fn new_for_test(outcomes: Vec<u16>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    /// Draw the next outcome in 1..=10_000.
    pub fn next_outcome(&mut self, reason: &str) -> u16 {
        match &mut self.source {
            RngSource::Seeded(rng) => rng.random_range(1..=10_000),
            RngSource::Scripted { outcomes, index } => {
                if *index >= outcomes.len() {
                    panic!(
                        "BattleRng script exhausted! Tried to get a value for: '{}'. Need more outcomes.",
                        reason
                    );
                }
                let outcome = outcomes[*index];

                #[cfg(test)]
                println!("[RNG] Consumed {} for: {}", outcome, reason);

                *index += 1;
                outcome
            }
        }
    }

    /// Roll against a probability in [0.0, 1.0]. A scripted outcome of N
    /// succeeds when N <= probability * 10_000.
    pub fn chance(&mut self, probability: f64, reason: &str) -> bool {
        let threshold = (probability.clamp(0.0, 1.0) * 10_000.0).round() as u16;
        self.next_outcome(reason) <= threshold
    }
}
